//! Read-side views layered over the store: dashboard filtering, progress and
//! calendar bucketing. Nothing here mutates state.

use jiff::{civil::Date, tz::TimeZone};

use crate::models::{CalendarEvent, Project, ProjectStatus, Task, TaskStatus};

#[derive(Debug, Default, Clone)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }

        match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => matches_search(project, term),
        }
    }
}

/// Case-insensitive substring match against title, description and tech
/// stack.
pub fn matches_search(project: &Project, term: &str) -> bool {
    let needle = term.to_lowercase();

    project.title.to_lowercase().contains(&needle)
        || project
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || project
            .tech_stack
            .iter()
            .any(|tech| tech.to_lowercase().contains(&needle))
}

/// Projects passing the filter, in store order.
pub fn filter_projects<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub on_hold: usize,
}

impl StatusCounts {
    pub fn get(&self, status: ProjectStatus) -> usize {
        match status {
            ProjectStatus::NotStarted => self.not_started,
            ProjectStatus::InProgress => self.in_progress,
            ProjectStatus::Completed => self.completed,
            ProjectStatus::OnHold => self.on_hold,
        }
    }
}

/// Counts per status tab, applying the same search term to every tab.
pub fn status_counts(projects: &[Project], search: Option<&str>) -> StatusCounts {
    let mut counts = StatusCounts::default();
    let filter = ProjectFilter {
        status: None,
        search: search.map(str::to_string),
    };

    for project in projects.iter().filter(|p| filter.matches(p)) {
        counts.all += 1;
        match project.status {
            ProjectStatus::NotStarted => counts.not_started += 1,
            ProjectStatus::InProgress => counts.in_progress += 1,
            ProjectStatus::Completed => counts.completed += 1,
            ProjectStatus::OnHold => counts.on_hold += 1,
        }
    }

    counts
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// 0.0 to 100.0; 0 when the project has no tasks
    pub percent: f64,
}

pub fn progress(project: &Project) -> Progress {
    let total = project.tasks.len();
    let completed = project
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Complete)
        .count();
    let percent = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    };

    Progress {
        completed,
        total,
        percent,
    }
}

/// Splits tasks into (pending, complete), keeping their order.
pub fn partition_tasks(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    tasks.iter().partition(|t| t.status == TaskStatus::Pending)
}

fn civil_date(event: &CalendarEvent, tz: &TimeZone) -> Date {
    event.date.to_zoned(tz.clone()).date()
}

/// Events falling on the given civil day in `tz`.
pub fn events_on<'a>(
    events: &'a [CalendarEvent],
    day: Date,
    tz: &TimeZone,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|e| civil_date(e, tz) == day)
        .collect()
}

/// Events within the given month in `tz`, sorted by date (stable, so events
/// on the same instant keep their generation order).
pub fn events_in_month<'a>(
    events: &'a [CalendarEvent],
    year: i16,
    month: i8,
    tz: &TimeZone,
) -> Vec<&'a CalendarEvent> {
    let mut in_month: Vec<_> = events
        .iter()
        .filter(|e| {
            let date = civil_date(e, tz);
            date.year() == year && date.month() == month
        })
        .collect();
    in_month.sort_by_key(|e| e.date);
    in_month
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_data::{calendar_events, sample_projects};

    fn titles<'a>(projects: &[&'a Project]) -> Vec<&'a str> {
        projects.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_filter_by_status() {
        let projects = sample_projects();
        let filter = ProjectFilter {
            status: Some(ProjectStatus::OnHold),
            search: None,
        };
        assert_eq!(
            titles(&filter_projects(&projects, &filter)),
            vec!["Mobile Fitness App"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_description_and_stack() {
        let projects = sample_projects();

        let by_stack = ProjectFilter {
            status: None,
            search: Some(String::from("tailwind")),
        };
        assert_eq!(
            titles(&filter_projects(&projects, &by_stack)),
            vec!["Personal Portfolio Site", "Task Management App"]
        );

        let by_description = ProjectFilter {
            status: None,
            search: Some(String::from("WORKOUTS")),
        };
        assert_eq!(
            titles(&filter_projects(&projects, &by_description)),
            vec!["Mobile Fitness App"]
        );

        let combined = ProjectFilter {
            status: Some(ProjectStatus::Completed),
            search: Some(String::from("react")),
        };
        assert_eq!(
            titles(&filter_projects(&projects, &combined)),
            vec!["Task Management App"]
        );
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let projects = sample_projects();
        let filter = ProjectFilter {
            status: None,
            search: Some(String::new()),
        };
        assert_eq!(filter_projects(&projects, &filter).len(), 4);
    }

    #[test]
    fn test_search_term_is_matched_as_typed() {
        let projects = sample_projects();

        // "Tailwind CSS" contains one space, never two
        let filter = ProjectFilter {
            status: None,
            search: Some(String::from("  ")),
        };
        assert!(filter_projects(&projects, &filter).is_empty());

        let filter = ProjectFilter {
            status: None,
            search: Some(String::from(" native")),
        };
        assert_eq!(titles(&filter_projects(&projects, &filter)), vec!["Mobile Fitness App"]);
    }

    #[test]
    fn test_status_counts() {
        let projects = sample_projects();

        let counts = status_counts(&projects, None);
        assert_eq!(counts.all, 4);
        for status in ProjectStatus::ALL {
            assert_eq!(counts.get(status), 1);
        }

        let counts = status_counts(&projects, Some("firebase"));
        assert_eq!(counts.all, 2);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.on_hold, 1);
        assert_eq!(counts.in_progress, 0);
    }

    #[test]
    fn test_progress() {
        let projects = sample_projects();

        let portfolio = progress(&projects[0]);
        assert_eq!((portfolio.completed, portfolio.total), (2, 4));
        assert_eq!(portfolio.percent, 50.0);

        assert_eq!(progress(&projects[2]).percent, 100.0);

        let mut empty = projects[1].clone();
        empty.tasks.clear();
        assert_eq!(progress(&empty).percent, 0.0);
    }

    #[test]
    fn test_partition_tasks_keeps_order() {
        let projects = sample_projects();
        let (pending, complete) = partition_tasks(&projects[0].tasks);

        let pending: Vec<_> = pending.iter().map(|t| t.id.as_str()).collect();
        let complete: Vec<_> = complete.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(pending, vec!["task-3", "task-4"]);
        assert_eq!(complete, vec!["task-1", "task-2"]);
    }

    #[test]
    fn test_events_on_day() {
        let events = calendar_events(&sample_projects());

        let day = jiff::civil::date(2025, 4, 30);
        let on_day = events_on(&events, day, &TimeZone::UTC);
        let ids: Vec<_> = on_day.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["complete-project-1", "task-task-4"]);
    }

    #[test]
    fn test_events_on_day_respect_time_zone() {
        let events = calendar_events(&sample_projects());
        let tz = TimeZone::fixed(jiff::tz::offset(-5));

        // midnight UTC on the 30th is still the 29th five hours west
        let day = jiff::civil::date(2025, 4, 29);
        assert_eq!(events_on(&events, day, &tz).len(), 2);
        assert!(events_on(&events, day, &TimeZone::UTC).is_empty());
    }

    #[test]
    fn test_events_in_month_sorted() {
        let events = calendar_events(&sample_projects());
        let april = events_in_month(&events, 2025, 4, &TimeZone::UTC);

        let ids: Vec<_> = april.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "start-project-2",
                "task-task-5",
                "task-task-3",
                "complete-project-1",
                "task-task-4",
            ]
        );
    }
}
