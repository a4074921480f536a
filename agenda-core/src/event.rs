//! Calendar event display record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single event pulled out of an iCalendar feed.
///
/// Text fields the feed may omit stay `None` so the formatter can skip
/// their clauses entirely. Start and end are always present; all-day
/// events carry midnight as their time component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}
