//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `nexlog_core` end to end over literal fixtures.
//! - Keep output deterministic by pinning the clock.

use chrono::NaiveDate;
use log::error;
use nexlog_core::{
    CommentAuthor, FixedClock, InMemoryLogRepository, LoadBatch, Person, PersonDirectory, Role,
    TimelineConfig, TimelineError, TimelineService,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_failed module=cli reason={err}");
            eprintln!("nexlog_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), TimelineError> {
    let config = TimelineConfig::default();
    if let Err(err) = nexlog_core::init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let today = day(2024, 3, 8);
    let directory = PersonDirectory::new(vec![
        Person::new(1, "John Doe", Role::Teacher),
        Person::new(2, "Jane Smith", Role::Teacher),
        Person::new(3, "Bob Johnson", Role::Teacher),
        Person::new(9, "Dana Reyes", Role::Admin),
    ]);
    let admin = directory
        .find(9)
        .map(CommentAuthor::from)
        .unwrap_or_else(|| CommentAuthor::from_role(Role::Admin));

    let mut timeline = TimelineService::new(
        InMemoryLogRepository::new(),
        directory,
        FixedClock(today),
        config,
    );

    let first = timeline.submit_log(1, day(2024, 3, 1), "Fractions review", None)?;
    timeline.submit_log(
        2,
        day(2024, 3, 3),
        "Lab safety briefing",
        Some("https://example.com"),
    )?;
    timeline.submit_log(3, day(2024, 3, 7), "Reading circle", None)?;
    timeline.post_comment(first.id, admin, "Great pacing")?;

    println!("nexlog_core version={}", nexlog_core::core_version());
    let metrics = timeline.metrics();
    println!(
        "total_logs={} total_comments={} avg_comments={:.2} last_{}_days={}",
        metrics.total_logs,
        metrics.total_comments,
        metrics.average_comments_per_log,
        metrics.trailing_window_days,
        metrics.logs_in_trailing_window
    );
    println!("unread_for_teacher={}", timeline.total_unread(Role::Teacher));

    let batch_size = timeline.config().effective_load_batch_size();
    let keys = timeline.ordered_keys().to_vec();
    match nexlog_core::load_more(&keys, 0, batch_size)? {
        LoadBatch::Keys(batch) => {
            let rendered: Vec<String> = batch.iter().map(ToString::to_string).collect();
            println!("first_batch={}", rendered.join(","));
        }
        LoadBatch::Exhausted => println!("first_batch=<empty>"),
    }

    Ok(())
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
