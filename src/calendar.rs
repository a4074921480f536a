//! HTTP adapter for iCalendar feeds.

use std::time::Duration;

use agenda_core::event::CalendarEvent;
use agenda_core::ics;
use agenda_core::{AgendaError, AgendaResult};
use chrono::NaiveDate;
use url::Url;

/// Seconds before an unresponsive feed is given up on.
const FEED_TIMEOUT_SECS: u64 = 10;

/// Fetches iCalendar documents and extracts per-day events.
pub struct CalendarClient {
    http: reqwest::Client,
}

impl CalendarClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Fetch `url` and return the events on `date`, sorted by `(start, end)`.
    ///
    /// Transport failures and non-success statuses surface as `Fetch`; a
    /// malformed document surfaces as `Parse`. One outbound call per
    /// invocation, no caching.
    pub async fn fetch_day_events(
        &self,
        url: &str,
        date: NaiveDate,
    ) -> AgendaResult<Vec<CalendarEvent>> {
        let url = Url::parse(url)
            .map_err(|e| AgendaError::Fetch(format!("invalid calendar URL '{url}': {e}")))?;

        let response = self
            .http
            .get(url.clone())
            .timeout(Duration::from_secs(FEED_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| AgendaError::Fetch(format!("calendar feed {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(AgendaError::Fetch(format!(
                "calendar feed {url} returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AgendaError::Fetch(format!("calendar feed {url}: {e}")))?;

        ics::events_on(&body, date)
    }
}

impl Default for CalendarClient {
    fn default() -> Self {
        Self::new()
    }
}
