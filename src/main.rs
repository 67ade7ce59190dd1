use clap::{Parser, Subcommand};

use ptrack::{
    ProjectStatus, ProjectStore,
    config::{Config, ConfigArgs},
    logging,
};

mod shell;
mod ui;
mod views;

#[derive(Parser)]
#[command(
    name = "ptrack",
    version,
    about = "Keep track of personal projects, their tasks and deadlines"
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the project dashboard
    List {
        /// Only projects with this status
        #[arg(short, long)]
        status: Option<ProjectStatus>,

        /// Case-insensitive match on title, description or tech stack
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Print JSON instead of the formatted view
        #[arg(long)]
        json: bool,
    },

    /// Show a project with its tasks
    Show {
        project_id: String,

        #[arg(long)]
        json: bool,
    },

    /// List the tasks of a project
    Tasks {
        project_id: String,

        #[arg(long)]
        json: bool,
    },

    /// Show project and task deadlines for a month
    Calendar {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session to create and edit projects
    Shell,
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::from_args(cli.config) {
        Ok(config) => config,
        Err(e) => {
            ui::render_error(e);
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init(&config.log_filter) {
        ui::render_error(e);
        std::process::exit(2);
    }
    config.apply_color();

    // Lives for the whole process; state is gone once it exits.
    let mut store = ProjectStore::new(config.seed.projects());
    tracing::debug!(seed = ?config.seed, projects = store.projects().len(), "store initialized");

    let result = match cli.command {
        Some(Commands::List {
            status,
            search,
            json,
        }) => views::dashboard(&store, status, search, json),
        Some(Commands::Show { project_id, json }) => {
            views::project_detail(&store, &config, &project_id, json)
        }
        Some(Commands::Tasks { project_id, json }) => {
            views::project_tasks(&store, &config, &project_id, json)
        }
        Some(Commands::Calendar { month, json }) => {
            views::calendar(&store, &config, month.as_deref(), json)
        }
        Some(Commands::Shell) => {
            if let Err(e) = shell::run(&mut store, &config) {
                ui::render_error(e);
                std::process::exit(1);
            }
            Ok(())
        }
        None => views::dashboard(&store, None, None, false),
    };

    if let Err(e) = result {
        ui::render_error(e);
        std::process::exit(1);
    }
}
