use colored::*;
use jiff::{Timestamp, civil::Date, tz::TimeZone};

use ptrack::{
    CalendarEvent, CalendarEventKind, Project, ProjectStatus, StoreEvent, Task, TaskStatus,
    services::queries::{self, StatusCounts},
};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Colored badge for a project status
pub fn status_badge(status: ProjectStatus) -> ColoredString {
    let label = format!("[{}]", status.label());
    match status {
        ProjectStatus::NotStarted => label.dimmed(),
        ProjectStatus::InProgress => label.blue(),
        ProjectStatus::Completed => label.green(),
        ProjectStatus::OnHold => label.yellow(),
    }
}

/// Get the appropriate status glyph for a task
pub fn get_status_glyph(task: &Task, is_overdue: bool) -> ColoredString {
    if task.status == TaskStatus::Complete {
        "✓".dimmed()
    } else if is_overdue {
        "●".red()
    } else {
        "○".normal()
    }
}

/// Print `left` with `right` pushed to the terminal's right edge when it fits
fn print_aligned(styled_left: ColoredString, left_visible_len: usize, right: &str) {
    if right.is_empty() {
        println!("{}", styled_left);
        return;
    }

    let terminal_width = get_terminal_width();
    let total_content = left_visible_len + right.chars().count();

    if total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        println!("{}{}{}", styled_left, " ".repeat(padding), right.dimmed());
    } else {
        // Not enough space for right alignment, just print normally
        println!("{}", styled_left);
    }
}

/// Render one project line: title and badge on the left, progress on the right
pub fn render_project_line(project: &Project) {
    let progress = queries::progress(project);
    let left = format!("  {}  {}", "•", project.title);
    let left_visible_len = left.chars().count() + 1 + status_badge(project.status).chars().count();
    let styled_left = format!("{} {}", left.bold(), status_badge(project.status)).normal();

    let right = if progress.total == 0 {
        String::from("no tasks")
    } else {
        format!(
            "{}/{} tasks  {:>3.0}%",
            progress.completed, progress.total, progress.percent
        )
    };

    print_aligned(styled_left, left_visible_len, &right);
    println!("     {}", project.id.to_string().dimmed());

    if let Some(description) = &project.description {
        println!("     {}", description);
    }
    if !project.tech_stack.is_empty() {
        println!("     {}", project.tech_stack.join(" · ").cyan());
    }
    println!();
}

/// Render a single task line with glyph, title, and right-aligned due date
pub fn render_task_line(task: &Task, tz: &TimeZone) {
    let overdue = is_overdue(task);
    let glyph = get_status_glyph(task, overdue);
    let left = format!("  {}  {}", glyph, task.title);
    let left_visible_len = format!("  {}  {}", " ", task.title).chars().count();

    let styled_left = if task.status == TaskStatus::Complete {
        left.dimmed()
    } else {
        left.bold()
    };

    let right = task
        .due_date
        .map(|due| format!("due {}", format_date(due, tz)))
        .unwrap_or_default();

    print_aligned(styled_left, left_visible_len, &right);
    println!("       {}", task.id.to_string().dimmed());
    if let Some(description) = &task.description {
        println!("       {}", description);
    }
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize, noun: &str) {
    let word = if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    };
    println!("\n  {} ({} {})\n", title.cyan().bold(), count, word);
}

/// Render a section header (e.g., "Pending", "Completed")
pub fn render_section_header(title: &str) {
    println!("\n  ─── {} ───\n", title.bold());
}

/// Dashboard tabs: "All (4)  In Progress (1)  ..."
pub fn render_status_tabs(counts: &StatusCounts, selected: Option<ProjectStatus>) {
    let mut tabs = vec![tab(&format!("All ({})", counts.all), selected.is_none())];
    for status in ProjectStatus::ALL {
        tabs.push(tab(
            &format!("{} ({})", status.label(), counts.get(status)),
            selected == Some(status),
        ));
    }
    let line: Vec<String> = tabs.into_iter().map(|t| t.to_string()).collect();
    println!("  {}", line.join("  "));
}

fn tab(label: &str, selected: bool) -> ColoredString {
    if selected {
        label.cyan().bold().underline()
    } else {
        label.dimmed()
    }
}

pub fn render_project_detail(project: &Project, tz: &TimeZone) {
    println!(
        "\n  {} {}\n",
        project.title.cyan().bold(),
        status_badge(project.status)
    );
    println!("  {} {}", "Id:".dimmed(), project.id);
    if let Some(description) = &project.description {
        println!("  {} {}", "Description:".dimmed(), description);
    }
    if let Some(url) = &project.github_url {
        println!("  {} {}", "GitHub:".dimmed(), url.blue());
    }
    if let Some(url) = &project.deployment_url {
        println!("  {} {}", "Live:".dimmed(), url.blue());
    }
    if !project.tech_stack.is_empty() {
        println!("  {} {}", "Stack:".dimmed(), project.tech_stack.join(", "));
    }
    println!(
        "  {} {}",
        "Start:".dimmed(),
        format_optional_date(project.start_date, tz)
    );
    println!(
        "  {} {}",
        "Target:".dimmed(),
        format_optional_date(project.target_completion_date, tz)
    );

    let progress = queries::progress(project);
    println!(
        "  {} {}/{} tasks ({:.0}%)",
        "Progress:".dimmed(),
        progress.completed,
        progress.total,
        progress.percent
    );
    println!(
        "  {} {}",
        "Updated:".dimmed(),
        format_date(project.updated_at, tz)
    );

    render_task_sections(&project.tasks, tz);
}

/// Pending tasks first, then completed ones
pub fn render_task_sections(tasks: &[Task], tz: &TimeZone) {
    if tasks.is_empty() {
        println!("\n  No tasks yet");
        return;
    }

    let (pending, complete) = queries::partition_tasks(tasks);

    if !pending.is_empty() {
        render_section_header(&format!("Pending ({})", pending.len()));
        for task in pending {
            render_task_line(task, tz);
        }
    }

    if !complete.is_empty() {
        render_section_header(&format!("Completed ({})", complete.len()));
        for task in complete {
            render_task_line(task, tz);
        }
    }
}

fn event_marker(kind: CalendarEventKind) -> ColoredString {
    match kind {
        CalendarEventKind::ProjectStart => "▶".green(),
        CalendarEventKind::ProjectDue => "◆".red(),
        CalendarEventKind::TaskDue => "•".yellow(),
    }
}

/// Days of the month that have at least one event in `tz`
fn marked_days(first_of_month: Date, events: &[CalendarEvent], tz: &TimeZone) -> Vec<i8> {
    (1..=first_of_month.days_in_month())
        .filter(|&day| {
            let date = jiff::civil::date(first_of_month.year(), first_of_month.month(), day);
            !queries::events_on(events, date, tz).is_empty()
        })
        .collect()
}

/// Month grid, Sunday first, days with events marked with `*`
pub fn render_month_grid(first_of_month: Date, events: &[CalendarEvent], tz: &TimeZone) {
    println!(
        "\n  {}\n",
        first_of_month.strftime("%B %Y").to_string().cyan().bold()
    );
    println!("  Sun  Mon  Tue  Wed  Thu  Fri  Sat");

    let offset = first_of_month.weekday().to_sunday_zero_offset() as usize;
    let days = first_of_month.days_in_month();
    let marked = marked_days(first_of_month, events, tz);
    let mut line = String::from("  ");
    line.push_str(&"     ".repeat(offset));

    for day in 1..=days {
        let cell = if marked.contains(&day) {
            format!("{:>3}*", day).yellow().bold().to_string()
        } else {
            format!("{:>3} ", day)
        };
        line.push_str(&cell);
        line.push(' ');

        if (offset + day as usize) % 7 == 0 {
            println!("{}", line.trim_end());
            line = String::from("  ");
        }
    }
    if !line.trim().is_empty() {
        println!("{}", line.trim_end());
    }
    println!();
}

pub fn render_event_line(event: &CalendarEvent, tz: &TimeZone) {
    let date = event.date.to_zoned(tz.clone()).date();
    let context = if event.kind == CalendarEventKind::TaskDue {
        format!("  ({})", event.project_title)
    } else {
        String::new()
    };
    println!(
        "  {}  {}  {}{}",
        date.strftime("%a %d").to_string().dimmed(),
        event_marker(event.kind),
        event.title,
        context.dimmed()
    );
}

/// Transient confirmation after a successful change
pub fn render_notification(event: &StoreEvent) {
    println!("{} {}", "✓".green(), event.message().green());
}

pub fn render_error(message: impl std::fmt::Display) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn render_hint(message: &str) {
    eprintln!("  {}", message.dimmed());
}

/// Check if a pending task is past its due date
pub fn is_overdue(task: &Task) -> bool {
    if task.status == TaskStatus::Complete {
        return false;
    }
    task.due_date.is_some_and(|due| due < Timestamp::now())
}

/// Format a date for display (e.g., "Today", "Tomorrow", "Apr 30 2025")
pub fn format_date(timestamp: Timestamp, tz: &TimeZone) -> String {
    let date = timestamp.to_zoned(tz.clone()).date();
    let today = Timestamp::now().to_zoned(tz.clone()).date();

    if date == today {
        "Today".to_string()
    } else if today.tomorrow().is_ok_and(|tomorrow| tomorrow == date) {
        "Tomorrow".to_string()
    } else if today.yesterday().is_ok_and(|yesterday| yesterday == date) {
        "Yesterday".to_string()
    } else {
        date.strftime("%b %d %Y").to_string()
    }
}

fn format_optional_date(timestamp: Option<Timestamp>, tz: &TimeZone) -> String {
    timestamp
        .map(|t| format_date(t, tz))
        .unwrap_or_else(|| String::from("not set"))
}
