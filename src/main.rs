// Study Calendar Application
// Main entry point

use anyhow::{Context, Result};

use study_calendar::config::AppConfig;
use study_calendar::planner::RevisionCalendar;
use study_calendar::services::database::Database;
use study_calendar::utils::duration::format_minutes;
use study_calendar::utils::time_of_day::TimeOfDay;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Study Calendar");

    let config = AppConfig::load();
    let db_path = config.database_path();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory {}", parent.display())
            })?;
        }
    }

    let db = Database::new(
        db_path
            .to_str()
            .context("Database path is not valid UTF-8")?,
    )?;
    db.initialize_schema()?;

    let mut calendar = RevisionCalendar::new(db);
    calendar.load_initial();

    print_week(&calendar);
    print_selected_day(&calendar);
    print_countdown(&calendar);

    Ok(())
}

/// Render the visible week as a text grid, exams first on each day.
fn print_week(calendar: &RevisionCalendar) {
    println!("Week of {}", calendar.week_label());

    for &day in calendar.week() {
        let marker = if day == calendar.selected_date() {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, day.format("%a %b %e"));

        for exam in calendar.exams_for_day(day) {
            println!(
                "    EXAM {} ({}) at {}",
                exam.name,
                exam.subject_display().name,
                exam.time.format("%H:%M")
            );
        }

        for event in calendar.events_for_day(day) {
            let status = if event.completed { "x" } else { " " };
            println!(
                "    [{}] {} {} - {}",
                status,
                event.time.format("%H:%M"),
                event.subject_display().name,
                format_minutes(event.duration_minutes)
            );
        }
    }
}

/// Render the selected date's sessions grouped by time of day.
fn print_selected_day(calendar: &RevisionCalendar) {
    let grouped = calendar.grouped_events();
    if grouped.is_empty() {
        return;
    }

    println!();
    println!(
        "Sessions on {}:",
        calendar.selected_date().format("%b %e, %Y")
    );

    let buckets = [
        (TimeOfDay::Morning, &grouped.morning),
        (TimeOfDay::Afternoon, &grouped.afternoon),
        (TimeOfDay::Night, &grouped.night),
    ];

    for (bucket, events) in buckets {
        if events.is_empty() {
            continue;
        }
        println!("  {}", bucket.label());
        for event in events {
            println!(
                "    {} {} - {}",
                event.time.format("%H:%M"),
                event.subject_display().name,
                format_minutes(event.duration_minutes)
            );
        }
    }
}

fn print_countdown(calendar: &RevisionCalendar) {
    println!();
    match calendar.next_exam() {
        Some(exam) => {
            let days = exam.days_remaining();
            let when = match days {
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                n => format!("in {} days", n),
            };
            println!(
                "Next exam: {} ({}) {}",
                exam.name,
                exam.subject_display().name,
                when
            );
        }
        None => println!("No upcoming exams"),
    }
}
