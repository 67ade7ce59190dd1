use jiff::{Timestamp, civil::Date};
use thiserror::Error;

use ptrack::{
    ProjectId, ProjectStatus, ProjectStore,
    config::Config,
    services::queries::{self, ProjectFilter},
};

use crate::ui;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Failed to serialize output to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn dashboard(
    store: &ProjectStore,
    status: Option<ProjectStatus>,
    search: Option<String>,
    json: bool,
) -> Result<(), ViewError> {
    let filter = ProjectFilter { status, search };
    let projects = queries::filter_projects(store.projects(), &filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    let counts = queries::status_counts(store.projects(), filter.search.as_deref());
    ui::render_view_header("PROJECTS", projects.len(), "project");
    ui::render_status_tabs(&counts, status);
    println!();

    if projects.is_empty() {
        println!("  No projects found. Create your first project to get started!");
        return Ok(());
    }

    for project in projects {
        ui::render_project_line(project);
    }
    Ok(())
}

pub fn project_detail(
    store: &ProjectStore,
    config: &Config,
    project_id: &str,
    json: bool,
) -> Result<(), ViewError> {
    let project = store
        .get(&ProjectId::from(project_id))
        .ok_or_else(|| ViewError::ProjectNotFound(project_id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(project)?);
    } else {
        ui::render_project_detail(project, &config.time_zone);
    }
    Ok(())
}

pub fn project_tasks(
    store: &ProjectStore,
    config: &Config,
    project_id: &str,
    json: bool,
) -> Result<(), ViewError> {
    let id = ProjectId::from(project_id);
    let project = store
        .get(&id)
        .ok_or_else(|| ViewError::ProjectNotFound(project_id.to_string()))?;
    let tasks = store.tasks_for_project(&id);

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        ui::render_view_header(&project.title, tasks.len(), "task");
        ui::render_task_sections(&tasks, &config.time_zone);
    }
    Ok(())
}

/// Parses "YYYY-MM" into the first day of that month.
pub fn parse_month(input: &str) -> Result<Date, ViewError> {
    format!("{}-01", input.trim())
        .parse::<Date>()
        .map_err(|_| ViewError::InvalidMonth(input.to_string()))
}

pub fn calendar(
    store: &ProjectStore,
    config: &Config,
    month: Option<&str>,
    json: bool,
) -> Result<(), ViewError> {
    let tz = &config.time_zone;
    let first_of_month = match month {
        Some(month) => parse_month(month)?,
        None => Timestamp::now().to_zoned(tz.clone()).date().first_of_month(),
    };

    let events = store.calendar_events();
    let in_month = queries::events_in_month(
        &events,
        first_of_month.year(),
        first_of_month.month(),
        tz,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&in_month)?);
        return Ok(());
    }

    ui::render_month_grid(first_of_month, &events, tz);
    if in_month.is_empty() {
        println!("  No deadlines this month");
    } else {
        for event in in_month {
            ui::render_event_line(event, tz);
        }
    }
    Ok(())
}
