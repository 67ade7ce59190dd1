//! Runtime settings, resolved once at startup from command-line flags and
//! `PTRACK_*` environment variables.

use clap::{Args, ValueEnum};
use jiff::tz::TimeZone;
use thiserror::Error;

use crate::{models::Project, sample_data};

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown time zone '{name}': {source}")]
    UnknownTimeZone {
        name: String,
        #[source]
        source: jiff::Error,
    },

    #[error("Log filter cannot be empty")]
    EmptyLogFilter,
}

/// What the store starts with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Seed {
    #[default]
    Sample,
    Empty,
}

impl Seed {
    pub fn projects(self) -> Vec<Project> {
        match self {
            Seed::Sample => sample_data::sample_projects(),
            Seed::Empty => vec![],
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Initial data set
    #[arg(long, value_enum, env = "PTRACK_SEED", default_value_t = Seed::Sample, global = true)]
    pub seed: Seed,

    /// Log filter, e.g. "info" or "ptrack=debug" (logs go to stderr)
    #[arg(long, env = "PTRACK_LOG", default_value = DEFAULT_LOG_FILTER, global = true)]
    pub log_level: String,

    /// IANA time zone used to place dates on the calendar (defaults to the system zone)
    #[arg(long, env = "PTRACK_TZ", global = true)]
    pub tz: Option<String>,

    /// When to colorize output
    #[arg(
        long,
        value_enum,
        env = "PTRACK_COLOR",
        default_value_t = ColorChoice::Auto,
        global = true
    )]
    pub color: ColorChoice,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub seed: Seed,
    pub log_filter: String,
    pub time_zone: TimeZone,
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: Seed::Sample,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            time_zone: TimeZone::UTC,
            color: ColorChoice::Auto,
        }
    }
}

impl Config {
    pub fn from_args(args: ConfigArgs) -> Result<Self, ConfigError> {
        let log_filter = args.log_level.trim().to_string();
        if log_filter.is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }

        let time_zone = match args.tz.as_deref().map(str::trim) {
            None | Some("") => TimeZone::system(),
            Some(name) => TimeZone::get(name).map_err(|source| ConfigError::UnknownTimeZone {
                name: name.to_string(),
                source,
            })?,
        };

        Ok(Self {
            seed: args.seed,
            log_filter,
            time_zone,
            color: args.color,
        })
    }

    /// Applies the colour choice process-wide.
    pub fn apply_color(&self) {
        match self.color {
            ColorChoice::Auto => colored::control::unset_override(),
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ConfigArgs {
        ConfigArgs {
            seed: Seed::Sample,
            log_level: String::from("info"),
            tz: Some(String::from("UTC")),
            color: ColorChoice::Never,
        }
    }

    #[test]
    fn test_from_args() {
        let config = Config::from_args(args()).unwrap();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.seed, Seed::Sample);
        assert_eq!(
            config.time_zone.to_offset(jiff::Timestamp::UNIX_EPOCH),
            jiff::tz::Offset::UTC
        );
    }

    #[test]
    fn test_unknown_time_zone() {
        let err = Config::from_args(ConfigArgs {
            tz: Some(String::from("Mars/Olympus_Mons")),
            ..args()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownTimeZone { ref name, .. } if name == "Mars/Olympus_Mons"
        ));
    }

    #[test]
    fn test_empty_log_filter() {
        let err = Config::from_args(ConfigArgs {
            log_level: String::from(" "),
            ..args()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyLogFilter));
    }

    #[test]
    fn test_seed_projects() {
        assert_eq!(Seed::Sample.projects().len(), 4);
        assert!(Seed::Empty.projects().is_empty());
    }
}
