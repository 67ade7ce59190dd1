use crate::models::{
    project::{Project, ProjectId},
    task::{Task, TaskId},
};

/// Plain container of every project, each embedding its tasks.
///
/// Holds no behaviour beyond lookups; mutations go through
/// [`ProjectStore`](crate::store::ProjectStore).
#[derive(Debug, Default, Clone)]
pub struct Store {
    pub projects: Vec<Project>,
}

impl Store {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn get_project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn get_project_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| &p.id == id)
    }

    pub fn get_task(&self, project_id: &ProjectId, task_id: &TaskId) -> Option<&Task> {
        self.get_project(project_id)
            .and_then(|project| project.get_task(task_id))
    }

    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    /// Removes the project (and with it every task it owns).
    pub fn remove_project(&mut self, id: &ProjectId) -> Option<Project> {
        let index = self.projects.iter().position(|p| &p.id == id)?;
        Some(self.projects.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_data::sample_projects;

    #[test]
    fn test_lookups_on_sample_data() {
        let store = Store::new(sample_projects());

        let project = store.get_project(&ProjectId::from("project-2")).unwrap();
        assert_eq!(project.title, "E-commerce Dashboard");

        let task = store
            .get_task(&ProjectId::from("project-2"), &TaskId::from("task-6"))
            .unwrap();
        assert_eq!(task.title, "Set up project repository");

        assert!(
            store
                .get_task(&ProjectId::from("project-1"), &TaskId::from("task-6"))
                .is_none()
        );
    }

    #[test]
    fn test_remove_project_keeps_order_of_the_rest() {
        let mut store = Store::new(sample_projects());

        let removed = store.remove_project(&ProjectId::from("project-2")).unwrap();
        assert_eq!(removed.tasks.len(), 2);

        let ids: Vec<_> = store.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["project-1", "project-3", "project-4"]);
        assert!(store.remove_project(&ProjectId::from("project-2")).is_none());
    }
}
