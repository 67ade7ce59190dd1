//! Hand-authored seed data and the two derived read-only queries that the
//! front end builds its views from.

use jiff::{Timestamp, civil};

use crate::models::{
    CalendarEvent, CalendarEventKind, Project, ProjectId, ProjectStatus, Task, TaskId, TaskStatus,
};

/// UTC midnight of the given day.
fn day(year: i16, month: i8, day: i8) -> Timestamp {
    let since_epoch = civil::date(year, month, day).duration_since(civil::date(1970, 1, 1));
    Timestamp::UNIX_EPOCH + since_epoch
}

struct SampleTask {
    id: &'static str,
    title: &'static str,
    description: Option<&'static str>,
    status: TaskStatus,
    due_date: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

fn task(
    id: &'static str,
    title: &'static str,
    status: TaskStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
) -> SampleTask {
    SampleTask {
        id,
        title,
        description: None,
        status,
        due_date: None,
        created_at,
        updated_at,
    }
}

fn into_tasks(project_id: &ProjectId, tasks: Vec<SampleTask>) -> Vec<Task> {
    tasks
        .into_iter()
        .map(|t| Task {
            id: TaskId::from(t.id),
            project_id: project_id.clone(),
            title: t.title.to_string(),
            description: t.description.map(str::to_string),
            status: t.status,
            due_date: t.due_date,
            created_at: t.created_at,
            updated_at: t.updated_at,
        })
        .collect()
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// The initial data set the store is seeded with at startup.
pub fn sample_projects() -> Vec<Project> {
    use TaskStatus::{Complete, Pending};

    let portfolio = ProjectId::from("project-1");
    let dashboard = ProjectId::from("project-2");
    let task_app = ProjectId::from("project-3");
    let fitness = ProjectId::from("project-4");

    vec![
        Project {
            tasks: into_tasks(
                &portfolio,
                vec![
                    task(
                        "task-1",
                        "Design homepage layout",
                        Complete,
                        day(2025, 3, 1),
                        day(2025, 3, 3),
                    ),
                    task(
                        "task-2",
                        "Implement projects section",
                        Complete,
                        day(2025, 3, 3),
                        day(2025, 3, 5),
                    ),
                    SampleTask {
                        description: Some(
                            "Create a contact form with email validation and submission",
                        ),
                        due_date: Some(day(2025, 4, 25)),
                        ..task(
                            "task-3",
                            "Add contact form",
                            Pending,
                            day(2025, 3, 5),
                            day(2025, 3, 5),
                        )
                    },
                    SampleTask {
                        due_date: Some(day(2025, 4, 30)),
                        ..task(
                            "task-4",
                            "Optimize for mobile",
                            Pending,
                            day(2025, 3, 10),
                            day(2025, 3, 10),
                        )
                    },
                ],
            ),
            id: portfolio,
            title: String::from("Personal Portfolio Site"),
            description: Some(String::from(
                "My personal portfolio website showcasing my projects and skills.",
            )),
            status: ProjectStatus::InProgress,
            github_url: Some(String::from("https://github.com/user/portfolio")),
            deployment_url: Some(String::from("https://portfolio.example.com")),
            tech_stack: labels(&["Next.js", "TypeScript", "Tailwind CSS", "Framer Motion"]),
            start_date: Some(day(2025, 3, 1)),
            target_completion_date: Some(day(2025, 4, 30)),
            created_at: day(2025, 3, 1),
            updated_at: day(2025, 4, 10),
        },
        Project {
            tasks: into_tasks(
                &dashboard,
                vec![
                    SampleTask {
                        due_date: Some(day(2025, 4, 20)),
                        ..task(
                            "task-5",
                            "Create project plan",
                            Pending,
                            day(2025, 4, 10),
                            day(2025, 4, 10),
                        )
                    },
                    task(
                        "task-6",
                        "Set up project repository",
                        Pending,
                        day(2025, 4, 10),
                        day(2025, 4, 10),
                    ),
                ],
            ),
            id: dashboard,
            title: String::from("E-commerce Dashboard"),
            description: Some(String::from(
                "Admin dashboard for managing an e-commerce store.",
            )),
            status: ProjectStatus::NotStarted,
            github_url: None,
            deployment_url: None,
            tech_stack: labels(&["React", "Redux", "Node.js", "Express", "MongoDB"]),
            start_date: Some(day(2025, 4, 15)),
            target_completion_date: Some(day(2025, 6, 30)),
            created_at: day(2025, 4, 10),
            updated_at: day(2025, 4, 10),
        },
        Project {
            tasks: into_tasks(
                &task_app,
                vec![
                    task(
                        "task-7",
                        "Create project structure",
                        Complete,
                        day(2025, 2, 1),
                        day(2025, 2, 3),
                    ),
                    task(
                        "task-8",
                        "Implement authentication",
                        Complete,
                        day(2025, 2, 3),
                        day(2025, 2, 10),
                    ),
                    task(
                        "task-9",
                        "Add drag and drop feature",
                        Complete,
                        day(2025, 2, 10),
                        day(2025, 2, 20),
                    ),
                    task(
                        "task-10",
                        "Deploy to production",
                        Complete,
                        day(2025, 2, 25),
                        day(2025, 3, 1),
                    ),
                ],
            ),
            id: task_app,
            title: String::from("Task Management App"),
            description: Some(String::from(
                "A simple task management application with drag-and-drop functionality.",
            )),
            status: ProjectStatus::Completed,
            github_url: Some(String::from("https://github.com/user/task-app")),
            deployment_url: Some(String::from("https://tasks.example.com")),
            tech_stack: labels(&["React", "TypeScript", "Firebase", "Tailwind CSS"]),
            start_date: Some(day(2025, 2, 1)),
            target_completion_date: Some(day(2025, 3, 15)),
            created_at: day(2025, 2, 1),
            updated_at: day(2025, 3, 1),
        },
        Project {
            tasks: into_tasks(
                &fitness,
                vec![
                    task(
                        "task-11",
                        "Create wireframes",
                        Complete,
                        day(2025, 1, 15),
                        day(2025, 1, 20),
                    ),
                    task(
                        "task-12",
                        "Set up React Native environment",
                        Complete,
                        day(2025, 1, 20),
                        day(2025, 1, 25),
                    ),
                    task(
                        "task-13",
                        "Implement user authentication",
                        Pending,
                        day(2025, 1, 25),
                        day(2025, 1, 30),
                    ),
                ],
            ),
            id: fitness,
            title: String::from("Mobile Fitness App"),
            description: Some(String::from(
                "A mobile application for tracking workouts and nutrition.",
            )),
            status: ProjectStatus::OnHold,
            github_url: Some(String::from("https://github.com/user/fitness-app")),
            deployment_url: None,
            tech_stack: labels(&["React Native", "TypeScript", "Redux", "Firebase"]),
            start_date: Some(day(2025, 1, 15)),
            target_completion_date: None,
            created_at: day(2025, 1, 15),
            updated_at: day(2025, 2, 1),
        },
    ]
}

/// Tasks of the given project in their stored order, or nothing if the
/// project does not exist.
pub fn tasks_for_project(projects: &[Project], project_id: &ProjectId) -> Vec<Task> {
    projects
        .iter()
        .find(|p| &p.id == project_id)
        .map(|p| p.tasks.clone())
        .unwrap_or_default()
}

/// One event per date found across all projects: start, target completion,
/// then every task due date, project by project.
pub fn calendar_events(projects: &[Project]) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for project in projects {
        if let Some(date) = project.start_date {
            events.push(CalendarEvent {
                id: format!("start-{}", project.id),
                title: format!("Start: {}", project.title),
                kind: CalendarEventKind::ProjectStart,
                project_id: project.id.clone(),
                project_title: project.title.clone(),
                date,
                task_id: None,
            });
        }

        if let Some(date) = project.target_completion_date {
            events.push(CalendarEvent {
                id: format!("complete-{}", project.id),
                title: format!("Due: {}", project.title),
                kind: CalendarEventKind::ProjectDue,
                project_id: project.id.clone(),
                project_title: project.title.clone(),
                date,
                task_id: None,
            });
        }

        for task in &project.tasks {
            if let Some(date) = task.due_date {
                events.push(CalendarEvent {
                    id: format!("task-{}", task.id),
                    title: task.title.clone(),
                    kind: CalendarEventKind::TaskDue,
                    project_id: project.id.clone(),
                    project_title: project.title.clone(),
                    date,
                    task_id: Some(task.id.clone()),
                });
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_is_utc_midnight() {
        assert_eq!(day(1970, 1, 1), Timestamp::UNIX_EPOCH);
        assert_eq!(day(2025, 4, 25), "2025-04-25T00:00:00Z".parse::<Timestamp>().unwrap());
        assert_eq!(day(1969, 12, 31), "1969-12-31T00:00:00Z".parse::<Timestamp>().unwrap());
    }

    #[test]
    fn test_sample_projects_shape() {
        let projects = sample_projects();
        assert_eq!(projects.len(), 4);

        let task_counts: Vec<_> = projects.iter().map(|p| p.tasks.len()).collect();
        assert_eq!(task_counts, vec![4, 2, 4, 3]);

        for project in &projects {
            assert!(!project.title.is_empty());
            for task in &project.tasks {
                assert_eq!(task.project_id, project.id);
                assert!(task.updated_at <= project.updated_at);
            }
        }
    }

    #[test]
    fn test_tasks_for_project() {
        let projects = sample_projects();

        let tasks = tasks_for_project(&projects, &ProjectId::from("project-4"));
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Create wireframes",
                "Set up React Native environment",
                "Implement user authentication"
            ]
        );

        assert!(tasks_for_project(&projects, &ProjectId::from("project-99")).is_empty());
    }

    #[test]
    fn test_calendar_events_from_sample_data() {
        let events = calendar_events(&sample_projects());

        // 4 starts, 3 targets (fitness app has none), 3 task due dates
        assert_eq!(events.len(), 10);

        let first: Vec<_> = events.iter().take(4).map(|e| e.id.as_str()).collect();
        assert_eq!(
            first,
            vec![
                "start-project-1",
                "complete-project-1",
                "task-task-3",
                "task-task-4"
            ]
        );
        assert_eq!(events[0].title, "Start: Personal Portfolio Site");
        assert_eq!(events[1].title, "Due: Personal Portfolio Site");
        assert_eq!(events[2].kind, CalendarEventKind::TaskDue);
        assert_eq!(events[2].task_id, Some(TaskId::from("task-3")));
        assert_eq!(events[2].project_title, "Personal Portfolio Site");
    }

    #[test]
    fn test_calendar_events_one_per_date() {
        let mut projects = sample_projects();
        projects.truncate(1);
        projects[0].tasks.truncate(3);

        // start + target + task-3 due date
        assert_eq!(calendar_events(&projects).len(), 3);

        projects[0].start_date = None;
        projects[0].target_completion_date = None;
        assert_eq!(calendar_events(&projects).len(), 1);
    }
}
