//! Day listing: tasks due by tomorrow plus the day's calendar events.

use agenda_core::display;
use agenda_core::event::CalendarEvent;
use anyhow::Result;
use chrono::NaiveDate;
use futures::future::join_all;

use crate::calendar::CalendarClient;
use crate::config::Config;
use crate::notion::NotionClient;
use crate::render;

pub async fn run(config: &Config, date: NaiveDate) -> Result<()> {
    let label = day_label(date);

    let notion = NotionClient::new(&config.api_key, &config.database_id);
    let tasks = notion.tasks_due_by_tomorrow(date).await?;
    render::print_list(
        &format!("Tasks for {label}:"),
        &display::task_lines(&tasks),
        "Nothing due",
    );

    if config.calendar_urls.is_empty() {
        return Ok(());
    }

    println!();
    let calendar = CalendarClient::new();
    let fetches = join_all(
        config
            .calendar_urls
            .iter()
            .map(|url| calendar.fetch_day_events(url, date)),
    )
    .await;

    let mut events: Vec<CalendarEvent> = Vec::new();
    let mut failed = Vec::new();
    for (url, result) in config.calendar_urls.iter().zip(fetches) {
        match result {
            Ok(batch) => events.extend(batch),
            Err(e) => failed.push((url, e)),
        }
    }
    // Feeds fan out concurrently; re-sort the merged set rather than
    // trusting completion order.
    events.sort_by_key(|e| (e.start, e.end));

    let lines: Vec<String> = events.iter().map(display::event_line).collect();
    render::print_list(&format!("Events for {label}:"), &lines, "No events");
    for (url, error) in &failed {
        render::print_feed_error(url, error);
    }

    Ok(())
}

/// "today", "tomorrow", "yesterday", or the date itself.
fn day_label(date: NaiveDate) -> String {
    let today = chrono::Local::now().date_naive();
    match (date - today).num_days() {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}
