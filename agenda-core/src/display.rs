//! Rendering of events and tasks into single display lines.
//!
//! These lines double as the candidate strings fed to the ranking engine,
//! so they stay plain text; terminal coloring happens in the CLI.

use crate::event::CalendarEvent;
use crate::task::TaskItem;

/// One line for a calendar event, clauses in fixed order, absent fields
/// omitted: `{summary}, a {description} from {start} to {end} at {location}`.
///
/// Times are 24-hour `HH:MM`. The time clause is always present; the others
/// only when their field is.
pub fn event_line(event: &CalendarEvent) -> String {
    let mut line = String::new();
    if let Some(summary) = &event.summary {
        line.push_str(&format!("{summary}, "));
    }
    if let Some(description) = &event.description {
        line.push_str(&format!("a {description} "));
    }
    line.push_str(&format!(
        "from {} to {} ",
        event.start.format("%H:%M"),
        event.end.format("%H:%M")
    ));
    if let Some(location) = &event.location {
        line.push_str(&format!("at {location} "));
    }
    line.trim_end().to_string()
}

/// One line for a task: `{name}, a {kind} for {group} due on {due}`.
pub fn task_line(task: &TaskItem) -> String {
    format!(
        "{}, a {} for {} due on {}",
        task.name, task.kind, task.group_name, task.due
    )
}

/// Render a batch of tasks, preserving order.
pub fn task_lines(tasks: &[TaskItem]) -> Vec<String> {
    tasks.iter().map(task_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event() -> CalendarEvent {
        let day = NaiveDate::from_ymd_opt(2024, 7, 3).unwrap();
        CalendarEvent {
            name: None,
            summary: Some("Standup".into()),
            description: Some("team check-in".into()),
            location: Some("Room 2".into()),
            start: day.and_hms_opt(9, 0, 0).unwrap(),
            end: day.and_hms_opt(9, 15, 0).unwrap(),
        }
    }

    #[test]
    fn renders_every_clause_in_order() {
        assert_eq!(
            event_line(&event()),
            "Standup, a team check-in from 09:00 to 09:15 at Room 2"
        );
    }

    #[test]
    fn omits_clauses_for_absent_fields() {
        let mut e = event();
        e.description = None;
        e.location = None;
        let line = event_line(&e);
        assert_eq!(line, "Standup, from 09:00 to 09:15");
        assert!(!line.contains("at "));
        assert!(!line.contains("  "));
    }

    #[test]
    fn time_clause_survives_alone() {
        let mut e = event();
        e.summary = None;
        e.description = None;
        e.location = None;
        assert_eq!(event_line(&e), "from 09:00 to 09:15");
    }

    #[test]
    fn task_line_follows_the_fixed_template() {
        let task = TaskItem {
            name: "Essay".into(),
            due: NaiveDate::from_ymd_opt(2024, 7, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            kind: "assignment".into(),
            group_name: "Maths".into(),
        };
        assert_eq!(
            task_line(&task),
            "Essay, a assignment for Maths due on 2024-07-03 00:00:00"
        );
    }
}
