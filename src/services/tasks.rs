use jiff::Timestamp;
use thiserror::Error;

use crate::{
    models::{NewTask, ProjectId, Task, TaskId, TaskPatch, TaskStatus},
    store::{ProjectStore, StoreError},
};

#[derive(Debug, Error)]
pub enum AddTaskError {
    #[error("Task title is required")]
    TitleRequired,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default)]
pub struct AddTaskParameters {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
}

/// New tasks always start out pending.
pub fn add_task(
    store: &mut ProjectStore,
    project_id: &ProjectId,
    parameters: AddTaskParameters,
) -> Result<Task, AddTaskError> {
    let title = parameters.title.trim();
    if title.is_empty() {
        return Err(AddTaskError::TitleRequired);
    }

    Ok(store.add_task(
        project_id,
        NewTask {
            title: title.to_string(),
            description: parameters.description.filter(|d| !d.trim().is_empty()),
            status: TaskStatus::Pending,
            due_date: parameters.due_date,
        },
    )?)
}

#[derive(Debug, Error)]
pub enum EditTaskError {
    #[error("Task title cannot be empty")]
    TitleRequired,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn edit_task(
    store: &mut ProjectStore,
    project_id: &ProjectId,
    task_id: &TaskId,
    mut patch: TaskPatch,
) -> Result<Task, EditTaskError> {
    if let Some(title) = patch.title.as_mut() {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(EditTaskError::TitleRequired);
        }
        *title = trimmed.to_string();
    }
    patch.description = patch
        .description
        .map(|d| d.filter(|d| !d.trim().is_empty()));

    Ok(store.update_task(project_id, task_id, patch)?)
}

/// Flips `pending` and `complete`.
pub fn toggle_task_status(
    store: &mut ProjectStore,
    project_id: &ProjectId,
    task_id: &TaskId,
) -> Result<Task, StoreError> {
    let current = store
        .get_task(project_id, task_id)
        .map(|t| t.status)
        .ok_or_else(|| match store.get(project_id) {
            Some(_) => StoreError::TaskNotFound {
                project_id: project_id.clone(),
                task_id: task_id.clone(),
            },
            None => StoreError::ProjectNotFound(project_id.clone()),
        })?;

    store.update_task(project_id, task_id, TaskPatch::status(current.toggled()))
}

/// Removes the task, telling the caller when there was nothing to remove.
pub fn delete_task(
    store: &mut ProjectStore,
    project_id: &ProjectId,
    task_id: &TaskId,
) -> Result<Task, StoreError> {
    store
        .delete_task(project_id, task_id)
        .ok_or_else(|| StoreError::TaskNotFound {
            project_id: project_id.clone(),
            task_id: task_id.clone(),
        })
}
