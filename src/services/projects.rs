use jiff::Timestamp;
use thiserror::Error;

use crate::{
    models::{NewProject, Project, ProjectId, ProjectPatch, ProjectStatus},
    store::{ProjectStore, StoreError},
};

#[derive(Debug, Error)]
pub enum CreateProjectError {
    #[error("Project title is required")]
    TitleRequired,
}

#[derive(Debug, Default)]
pub struct CreateProjectParameters {
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub github_url: Option<String>,
    pub deployment_url: Option<String>,
    pub tech_stack: Vec<String>,
    pub start_date: Option<Timestamp>,
    pub target_completion_date: Option<Timestamp>,
}

pub fn create_project(
    store: &mut ProjectStore,
    parameters: CreateProjectParameters,
) -> Result<Project, CreateProjectError> {
    let title = parameters.title.trim();
    if title.is_empty() {
        return Err(CreateProjectError::TitleRequired);
    }

    let mut tech_stack: Vec<String> = Vec::new();
    for label in parameters.tech_stack {
        let label = label.trim();
        if !label.is_empty() && !tech_stack.iter().any(|t| t == label) {
            tech_stack.push(label.to_string());
        }
    }

    Ok(store.create(NewProject {
        title: title.to_string(),
        description: non_blank(parameters.description),
        status: parameters.status,
        github_url: non_blank(parameters.github_url),
        deployment_url: non_blank(parameters.deployment_url),
        tech_stack,
        start_date: parameters.start_date,
        target_completion_date: parameters.target_completion_date,
    }))
}

#[derive(Debug, Error)]
pub enum UpdateProjectError {
    #[error("Project title cannot be empty")]
    TitleRequired,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Edits title and free-text details. Blank optional values clear the field.
pub fn edit_project_details(
    store: &mut ProjectStore,
    project_id: &ProjectId,
    mut patch: ProjectPatch,
) -> Result<Project, UpdateProjectError> {
    if let Some(title) = patch.title.as_mut() {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(UpdateProjectError::TitleRequired);
        }
        *title = trimmed.to_string();
    }
    patch.description = patch.description.map(non_blank);
    patch.github_url = patch.github_url.map(non_blank);
    patch.deployment_url = patch.deployment_url.map(non_blank);

    Ok(store.update(project_id, patch)?)
}

/// Any status may move to any other.
pub fn set_project_status(
    store: &mut ProjectStore,
    project_id: &ProjectId,
    status: ProjectStatus,
) -> Result<Project, StoreError> {
    store.update(
        project_id,
        ProjectPatch {
            status: Some(status),
            ..ProjectPatch::default()
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    TargetCompletion,
}

pub fn set_project_date(
    store: &mut ProjectStore,
    project_id: &ProjectId,
    field: DateField,
    date: Option<Timestamp>,
) -> Result<Project, StoreError> {
    let patch = match field {
        DateField::Start => ProjectPatch {
            start_date: Some(date),
            ..ProjectPatch::default()
        },
        DateField::TargetCompletion => ProjectPatch {
            target_completion_date: Some(date),
            ..ProjectPatch::default()
        },
    };
    store.update(project_id, patch)
}

#[derive(Debug, Error)]
pub enum TechStackError {
    #[error("Technology name cannot be empty")]
    EmptyLabel,

    #[error("'{0}' is already in the tech stack")]
    AlreadyPresent(String),

    #[error("'{0}' is not in the tech stack")]
    NotPresent(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn add_tech(
    store: &mut ProjectStore,
    project_id: &ProjectId,
    label: &str,
) -> Result<Project, TechStackError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(TechStackError::EmptyLabel);
    }

    let project = store
        .get(project_id)
        .ok_or_else(|| StoreError::ProjectNotFound(project_id.clone()))?;

    if project.tech_stack.iter().any(|t| t == label) {
        return Err(TechStackError::AlreadyPresent(label.to_string()));
    }

    let mut tech_stack = project.tech_stack.clone();
    tech_stack.push(label.to_string());

    Ok(store.update(
        project_id,
        ProjectPatch {
            tech_stack: Some(tech_stack),
            ..ProjectPatch::default()
        },
    )?)
}

pub fn remove_tech(
    store: &mut ProjectStore,
    project_id: &ProjectId,
    label: &str,
) -> Result<Project, TechStackError> {
    let project = store
        .get(project_id)
        .ok_or_else(|| StoreError::ProjectNotFound(project_id.clone()))?;

    if !project.tech_stack.iter().any(|t| t == label) {
        return Err(TechStackError::NotPresent(label.to_string()));
    }

    let tech_stack = project
        .tech_stack
        .iter()
        .filter(|t| *t != label)
        .cloned()
        .collect();

    Ok(store.update(
        project_id,
        ProjectPatch {
            tech_stack: Some(tech_stack),
            ..ProjectPatch::default()
        },
    )?)
}

pub struct DeleteProjectResult {
    pub project: Project,
    pub cascaded_tasks_count: usize,
}

/// Deletes the project and reports how many tasks went with it. The store
/// itself treats unknown ids as a no-op; here the caller is told about it.
pub fn delete_project(
    store: &mut ProjectStore,
    project_id: &ProjectId,
) -> Result<DeleteProjectResult, StoreError> {
    let project = store
        .delete(project_id)
        .ok_or_else(|| StoreError::ProjectNotFound(project_id.clone()))?;

    Ok(DeleteProjectResult {
        cascaded_tasks_count: project.tasks.len(),
        project,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
