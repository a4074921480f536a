//! iCalendar document parsing using the icalendar crate's parser.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use icalendar::{
    DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{AgendaError, AgendaResult};
use crate::event::CalendarEvent;

/// Extract the events overlapping `date` from an iCalendar document.
///
/// An event is on `date` when `start.date() <= date <= end.date()`,
/// comparing dates only, inclusive on both ends. A VEVENT without a usable
/// DTSTART or DTEND is logged and skipped; a document that does not parse
/// at all is an error.
///
/// The result is sorted ascending by `(start, end)`, stable under
/// duplicate keys.
pub fn events_on(content: &str, date: NaiveDate) -> AgendaResult<Vec<CalendarEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded)
        .map_err(|e| AgendaError::Parse(format!("invalid iCalendar document: {e}")))?;

    let mut events = Vec::new();

    for vevent in calendar.components.iter().filter(|c| c.name == "VEVENT") {
        let Some(start) = event_time(vevent, "DTSTART") else {
            log::warn!("skipping VEVENT without a usable DTSTART");
            continue;
        };
        let Some(end) = event_time(vevent, "DTEND") else {
            log::warn!("skipping VEVENT without a usable DTEND");
            continue;
        };

        if start.date() <= date && date <= end.date() {
            events.push(CalendarEvent {
                name: text_prop(vevent, "NAME"),
                summary: text_prop(vevent, "SUMMARY"),
                description: text_prop(vevent, "DESCRIPTION"),
                location: text_prop(vevent, "LOCATION"),
                start,
                end,
            });
        }
    }

    events.sort_by_key(|e| (e.start, e.end));
    Ok(events)
}

fn text_prop(component: &Component<'_>, name: &str) -> Option<String> {
    component.find_prop(name).map(|p| p.val.to_string())
}

fn event_time(component: &Component<'_>, name: &str) -> Option<NaiveDateTime> {
    let prop = component.find_prop(name)?;
    let dpt = DatePerhapsTime::try_from(prop).ok()?;
    Some(to_wall_clock(dpt))
}

/// Reduce an ICS timestamp to its wall-clock value. Bare dates become
/// midnight; UTC and zoned stamps keep their clock reading unconverted.
fn to_wall_clock(dpt: DatePerhapsTime) -> NaiveDateTime {
    match dpt {
        DatePerhapsTime::Date(d) => d.and_time(NaiveTime::MIN),
        DatePerhapsTime::DateTime(dt) => match dt {
            icalendar::CalendarDateTime::Utc(dt) => dt.naive_utc(),
            icalendar::CalendarDateTime::Floating(naive) => naive,
            icalendar::CalendarDateTime::WithTimezone { date_time, .. } => date_time,
        },
    }
}
