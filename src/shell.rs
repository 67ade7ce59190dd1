//! Interactive session: one in-memory store, many commands, until `quit` or
//! end of input.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand, ValueEnum};
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use thiserror::Error;

use ptrack::{
    ProjectId, ProjectPatch, ProjectStatus, ProjectStore, StoreError, TaskId, TaskPatch,
    config::Config,
    services::{
        projects::{
            self, CreateProjectError, CreateProjectParameters, DateField, TechStackError,
            UpdateProjectError,
        },
        tasks::{self, AddTaskError, AddTaskParameters, EditTaskError},
    },
};

use crate::{
    ui,
    views::{self, ViewError},
};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Unterminated quote in input")]
    UnterminatedQuote,

    #[error("Invalid date '{0}', expected YYYY-MM-DD, an RFC 3339 timestamp, or 'none'")]
    InvalidDate(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    CreateProject(#[from] CreateProjectError),

    #[error(transparent)]
    UpdateProject(#[from] UpdateProjectError),

    #[error(transparent)]
    TechStack(#[from] TechStackError),

    #[error(transparent)]
    AddTask(#[from] AddTaskError),

    #[error(transparent)]
    EditTask(#[from] EditTaskError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Whether the command named a project or task that does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            ShellError::Store(e)
            | ShellError::UpdateProject(UpdateProjectError::Store(e))
            | ShellError::TechStack(TechStackError::Store(e))
            | ShellError::AddTask(AddTaskError::Store(e))
            | ShellError::EditTask(EditTaskError::Store(e)) => e.is_not_found(),
            ShellError::View(ViewError::ProjectNotFound(_)) => true,
            _ => false,
        }
    }
}

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateFieldArg {
    Start,
    Target,
}

impl From<DateFieldArg> for DateField {
    fn from(value: DateFieldArg) -> Self {
        match value {
            DateFieldArg::Start => DateField::Start,
            DateFieldArg::Target => DateField::TargetCompletion,
        }
    }
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Show the project dashboard
    List {
        #[arg(short, long)]
        status: Option<ProjectStatus>,
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Show a project with its tasks
    Show { project: String },

    /// Show deadlines for a month (YYYY-MM, defaults to the current one)
    Calendar { month: Option<String> },

    /// Create a new project
    New {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, default_value = "not-started")]
        status: ProjectStatus,
        #[arg(long)]
        github: Option<String>,
        #[arg(long)]
        deploy: Option<String>,
        /// Add a technology (can be used multiple times)
        #[arg(short, long, action = clap::ArgAction::Append)]
        tech: Vec<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        target: Option<String>,
    },

    /// Edit project details (pass an empty string to clear an optional field)
    Edit {
        project: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        github: Option<String>,
        #[arg(long)]
        deploy: Option<String>,
    },

    /// Change a project's status
    Status {
        project: String,
        status: ProjectStatus,
    },

    /// Set or clear ("none") a project's start or target date
    Date {
        project: String,
        #[arg(value_enum)]
        field: DateFieldArg,
        value: String,
    },

    /// Add a technology to a project's stack
    TechAdd { project: String, label: String },

    /// Remove a technology from a project's stack
    TechRm { project: String, label: String },

    /// Delete a project and all of its tasks
    Rm {
        project: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a task to a project
    Task {
        project: String,
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },

    /// Edit a task (due "none" clears the date)
    EditTask {
        project: String,
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },

    /// Flip a task between pending and complete
    Toggle { project: String, task: String },

    /// Delete a task
    RmTask {
        project: String,
        task: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(store: &mut ProjectStore, config: &Config) -> io::Result<()> {
    let subscription = store.subscribe(ui::render_notification);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("ptrack shell, type 'help' for commands, 'quit' to leave");

    loop {
        print!("ptrack> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let tokens = match split_line(&line) {
            Ok(tokens) if tokens.is_empty() => continue,
            Ok(tokens) => tokens,
            Err(e) => {
                ui::render_error(e);
                continue;
            }
        };

        let parsed = match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => parsed,
            Err(e) => {
                // clap renders help and usage errors itself
                let _ = e.print();
                continue;
            }
        };

        match execute(store, config, parsed.command, &mut ask) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::debug!(error = %e, "shell command failed");
                let not_found = e.is_not_found();
                ui::render_error(e);
                if not_found {
                    ui::render_hint("Run 'list' to see project ids, 'show <project>' for task ids");
                }
            }
        }
    }

    store.unsubscribe(subscription);
    Ok(())
}

/// Prints `question` and reads a yes/no answer; anything but "y"/"yes"
/// (including end of input) declines.
fn ask(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn execute(
    store: &mut ProjectStore,
    config: &Config,
    command: ShellCommand,
    confirm: &mut dyn FnMut(&str) -> io::Result<bool>,
) -> Result<Flow, ShellError> {
    let tz = &config.time_zone;

    match command {
        ShellCommand::List { status, search } => views::dashboard(store, status, search, false)?,
        ShellCommand::Show { project } => views::project_detail(store, config, &project, false)?,
        ShellCommand::Calendar { month } => {
            views::calendar(store, config, month.as_deref(), false)?
        }
        ShellCommand::New {
            title,
            description,
            status,
            github,
            deploy,
            tech,
            start,
            target,
        } => {
            let project = projects::create_project(
                store,
                CreateProjectParameters {
                    title,
                    description,
                    status,
                    github_url: github,
                    deployment_url: deploy,
                    tech_stack: tech,
                    start_date: parse_optional_date(start.as_deref(), tz)?,
                    target_completion_date: parse_optional_date(target.as_deref(), tz)?,
                },
            )?;
            println!("  {} {}", project.title, project.id);
        }
        ShellCommand::Edit {
            project,
            title,
            description,
            github,
            deploy,
        } => {
            projects::edit_project_details(
                store,
                &ProjectId::from(project.as_str()),
                ProjectPatch {
                    title,
                    description: description.map(Some),
                    github_url: github.map(Some),
                    deployment_url: deploy.map(Some),
                    ..ProjectPatch::default()
                },
            )?;
        }
        ShellCommand::Status { project, status } => {
            projects::set_project_status(store, &ProjectId::from(project.as_str()), status)?;
        }
        ShellCommand::Date {
            project,
            field,
            value,
        } => {
            let date = parse_date(&value, tz)?;
            projects::set_project_date(
                store,
                &ProjectId::from(project.as_str()),
                field.into(),
                date,
            )?;
        }
        ShellCommand::TechAdd { project, label } => {
            projects::add_tech(store, &ProjectId::from(project.as_str()), &label)?;
        }
        ShellCommand::TechRm { project, label } => {
            projects::remove_tech(store, &ProjectId::from(project.as_str()), &label)?;
        }
        ShellCommand::Rm { project, yes } => {
            let project_id = ProjectId::from(project.as_str());
            if !yes {
                if let Some(existing) = store.get(&project_id) {
                    let question = format!(
                        "Delete '{}' and its {} {}?",
                        existing.title,
                        existing.tasks.len(),
                        if existing.tasks.len() == 1 { "task" } else { "tasks" }
                    );
                    if !confirm(&question)? {
                        println!("  Cancelled");
                        return Ok(Flow::Continue);
                    }
                }
            }

            let result = projects::delete_project(store, &project_id)?;
            println!(
                "  Removed '{}' and {} {}",
                result.project.title,
                result.cascaded_tasks_count,
                if result.cascaded_tasks_count == 1 {
                    "task"
                } else {
                    "tasks"
                }
            );
        }
        ShellCommand::Task {
            project,
            title,
            description,
            due,
        } => {
            let task = tasks::add_task(
                store,
                &ProjectId::from(project.as_str()),
                AddTaskParameters {
                    title,
                    description,
                    due_date: parse_optional_date(due.as_deref(), tz)?,
                },
            )?;
            println!("  {} {}", task.title, task.id);
        }
        ShellCommand::EditTask {
            project,
            task,
            title,
            description,
            due,
        } => {
            let due_date = match due {
                Some(value) => Some(parse_date(&value, tz)?),
                None => None,
            };
            tasks::edit_task(
                store,
                &ProjectId::from(project.as_str()),
                &TaskId::from(task.as_str()),
                TaskPatch {
                    title,
                    description: description.map(Some),
                    status: None,
                    due_date,
                },
            )?;
        }
        ShellCommand::Toggle { project, task } => {
            let task = tasks::toggle_task_status(
                store,
                &ProjectId::from(project.as_str()),
                &TaskId::from(task.as_str()),
            )?;
            println!("  {} is now {}", task.title, task.status);
        }
        ShellCommand::RmTask { project, task, yes } => {
            let project_id = ProjectId::from(project.as_str());
            let task_id = TaskId::from(task.as_str());
            if !yes {
                if let Some(existing) = store.get_task(&project_id, &task_id) {
                    let question = format!("Delete task '{}'?", existing.title);
                    if !confirm(&question)? {
                        println!("  Cancelled");
                        return Ok(Flow::Continue);
                    }
                }
            }

            tasks::delete_task(store, &project_id, &task_id)?;
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn parse_optional_date(
    value: Option<&str>,
    tz: &TimeZone,
) -> Result<Option<Timestamp>, ShellError> {
    match value {
        Some(value) => parse_date(value, tz),
        None => Ok(None),
    }
}

/// Accepts "none", a civil date (midnight in `tz`) or a full timestamp.
fn parse_date(value: &str, tz: &TimeZone) -> Result<Option<Timestamp>, ShellError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") || value.is_empty() {
        return Ok(None);
    }

    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Ok(Some(timestamp));
    }

    value
        .parse::<Date>()
        .and_then(|date| date.to_zoned(tz.clone()))
        .map(|zoned| Some(zoned.timestamp()))
        .map_err(|_| ShellError::InvalidDate(value.to_string()))
}

/// Splits a command line on whitespace, keeping quoted runs together.
fn split_line(line: &str) -> Result<Vec<String>, ShellError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ShellError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use ptrack::TaskStatus;

    use super::*;

    fn config() -> Config {
        Config {
            time_zone: TimeZone::UTC,
            ..Config::default()
        }
    }

    fn run_line_answering(
        store: &mut ProjectStore,
        line: &str,
        answer: bool,
    ) -> (Result<Flow, ShellError>, Vec<String>) {
        let tokens = split_line(line).expect("line should split");
        let parsed = ShellLine::try_parse_from(tokens).expect("line should parse");
        let mut questions = Vec::new();
        let mut confirm = |question: &str| {
            questions.push(question.to_string());
            Ok::<_, io::Error>(answer)
        };
        let result = execute(store, &config(), parsed.command, &mut confirm);
        (result, questions)
    }

    fn run_line(store: &mut ProjectStore, line: &str) -> Result<Flow, ShellError> {
        run_line_answering(store, line, true).0
    }

    #[test]
    fn test_split_line_handles_quotes() {
        assert_eq!(
            split_line(r#"new "My App" -t 'Tailwind CSS' -d "say \"hi\"""#).unwrap(),
            vec!["new", "My App", "-t", "Tailwind CSS", "-d", "say \"hi\""]
        );
        assert_eq!(split_line("  ").unwrap(), Vec::<String>::new());
        assert_eq!(split_line(r#"edit p -d """#).unwrap(), vec!["edit", "p", "-d", ""]);
        assert!(matches!(
            split_line("new \"open"),
            Err(ShellError::UnterminatedQuote)
        ));
    }

    #[test]
    fn test_parse_date() {
        let tz = TimeZone::UTC;
        assert_eq!(parse_date("none", &tz).unwrap(), None);
        assert_eq!(
            parse_date("2025-04-30", &tz).unwrap(),
            Some("2025-04-30T00:00:00Z".parse().unwrap())
        );
        assert_eq!(
            parse_date("2025-04-30T12:00:00Z", &tz).unwrap(),
            Some("2025-04-30T12:00:00Z".parse().unwrap())
        );
        assert!(matches!(
            parse_date("next week", &tz),
            Err(ShellError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_session_scenario() {
        let mut store = ProjectStore::default();

        run_line(&mut store, r#"new "X" --status not-started -t Rust"#).unwrap();
        let project_id = store.projects()[0].id.to_string();
        assert_eq!(store.projects()[0].status, ProjectStatus::NotStarted);

        run_line(&mut store, &format!("task {project_id} T1 --due 2025-06-01")).unwrap();
        let task_id = store.projects()[0].tasks[0].id.to_string();
        assert_eq!(store.projects()[0].tasks[0].status, TaskStatus::Pending);

        run_line(&mut store, &format!("toggle {project_id} {task_id}")).unwrap();
        assert_eq!(store.projects()[0].tasks[0].status, TaskStatus::Complete);

        run_line(&mut store, &format!("date {project_id} start 2025-05-01")).unwrap();
        assert_eq!(store.calendar_events().len(), 2);

        let err = run_line(&mut store, &format!("tech-add {project_id} Rust")).unwrap_err();
        assert!(matches!(
            err,
            ShellError::TechStack(TechStackError::AlreadyPresent(_))
        ));

        run_line(&mut store, &format!("rm {project_id}")).unwrap();
        assert!(store.projects().is_empty());

        let err = run_line(&mut store, &format!("toggle {project_id} {task_id}")).unwrap_err();
        assert!(matches!(
            err,
            ShellError::Store(StoreError::ProjectNotFound(_))
        ));
        assert!(err.is_not_found());

        assert!(matches!(run_line(&mut store, "exit"), Ok(Flow::Quit)));
    }

    #[test]
    fn test_edit_with_empty_description_clears_it() {
        let mut store = ProjectStore::from_sample_data();
        run_line(&mut store, r#"edit project-1 -d """#).unwrap();
        assert_eq!(store.projects()[0].description, None);
    }

    #[test]
    fn test_declined_project_delete_keeps_project() {
        let mut store = ProjectStore::from_sample_data();

        let (result, questions) = run_line_answering(&mut store, "rm project-2", false);

        assert!(matches!(result, Ok(Flow::Continue)));
        assert_eq!(questions, vec!["Delete 'E-commerce Dashboard' and its 2 tasks?"]);
        assert!(store.get(&ProjectId::from("project-2")).is_some());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_confirmed_task_delete_removes_task() {
        let mut store = ProjectStore::from_sample_data();

        let (result, questions) = run_line_answering(&mut store, "rm-task project-2 task-6", true);

        assert!(result.is_ok());
        assert_eq!(questions, vec!["Delete task 'Set up project repository'?"]);
        assert!(
            store
                .get_task(&ProjectId::from("project-2"), &TaskId::from("task-6"))
                .is_none()
        );
    }

    #[test]
    fn test_declined_task_delete_keeps_task() {
        let mut store = ProjectStore::from_sample_data();

        let (result, _) = run_line_answering(&mut store, "rm-task project-2 task-6", false);

        assert!(result.is_ok());
        assert_eq!(store.tasks_for_project(&ProjectId::from("project-2")).len(), 2);
    }

    #[test]
    fn test_yes_flag_skips_confirmation() {
        let mut store = ProjectStore::from_sample_data();

        let (result, questions) = run_line_answering(&mut store, "rm project-4 --yes", false);

        assert!(result.is_ok());
        assert!(questions.is_empty());
        assert!(store.get(&ProjectId::from("project-4")).is_none());
    }

    #[test]
    fn test_delete_of_unknown_project_reports_not_found_without_asking() {
        let mut store = ProjectStore::from_sample_data();

        let (result, questions) = run_line_answering(&mut store, "rm project-404", true);

        let err = result.unwrap_err();
        assert!(err.is_not_found());
        assert!(questions.is_empty());
    }

    #[test]
    fn test_validation_errors_are_not_not_found() {
        let mut store = ProjectStore::from_sample_data();

        let err = run_line(&mut store, "tech-add project-1 TypeScript").unwrap_err();
        assert!(!err.is_not_found());

        let err = run_line(&mut store, "show project-404").unwrap_err();
        assert!(err.is_not_found());
    }
}
