//! HTTP client for the Notion database API.
//!
//! Query rows are parsed independently so a bad row is dropped, not fatal.
//! Group names come from the `Class` relation, one page fetch per distinct
//! ID. That lookup is an N+1 pattern: fine for a personal database, too
//! chatty for large result sets.

use std::collections::HashMap;
use std::time::Duration;

use agenda_core::task::{self, TaskItem, TaskRow};
use agenda_core::{AgendaError, AgendaResult};
use chrono::NaiveDate;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{Value, json};

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Seconds allowed for a database query.
const QUERY_TIMEOUT_SECS: u64 = 100;
/// Seconds allowed for a single page fetch.
const PAGE_TIMEOUT_SECS: u64 = 10;

/// Rows requested per query when the caller has no tighter bound.
pub const DEFAULT_QUERY_LIMIT: u32 = 100;

#[derive(Deserialize)]
struct QueryResponse {
    results: Vec<Value>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    database_id: String,
}

impl NotionClient {
    pub fn new(api_key: &str, database_id: &str) -> Self {
        Self::with_base_url(api_key, database_id, DEFAULT_BASE_URL)
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(api_key: &str, database_id: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            database_id: database_id.to_string(),
        }
    }

    /// Up to `limit` incomplete tasks, in store order.
    ///
    /// A failed query propagates; "no results" and "unreachable" are
    /// distinguishable at the call site.
    pub async fn incomplete_tasks(&self, limit: u32) -> AgendaResult<Vec<TaskItem>> {
        let payload = json!({
            "page_size": limit,
            "filter": {
                "property": "Complete",
                "checkbox": { "equals": false }
            }
        });
        let rows = self.query(payload).await?;
        Ok(self.resolve_items(rows).await)
    }

    /// Incomplete tasks due before `today + 1 day`, ascending by due date.
    pub async fn tasks_due_by_tomorrow(&self, today: NaiveDate) -> AgendaResult<Vec<TaskItem>> {
        let tomorrow = (today + chrono::Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        let payload = json!({
            "sorts": [ { "property": "Date", "direction": "ascending" } ],
            "filter": {
                "and": [
                    { "property": "Complete", "checkbox": { "equals": false } },
                    { "property": "Date", "date": { "before": tomorrow } }
                ]
            }
        });
        let rows = self.query(payload).await?;
        Ok(self.resolve_items(rows).await)
    }

    /// POST a query to the database, returning the raw result rows.
    async fn query(&self, payload: Value) -> AgendaResult<Vec<Value>> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .timeout(Duration::from_secs(QUERY_TIMEOUT_SECS))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AgendaError::Fetch(format!("task query: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(AgendaError::Api(format!("task query failed: {message}")));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| AgendaError::Api(format!("task query response: {e}")))?;
        Ok(body.results)
    }

    /// Parse rows and attach group names. Bad rows and failed resolutions
    /// are logged and dropped; survivors keep the query's ordering.
    async fn resolve_items(&self, rows: Vec<Value>) -> Vec<TaskItem> {
        let parsed: Vec<TaskRow> = rows
            .iter()
            .filter_map(|row| match TaskRow::from_value(row) {
                Ok(row) => Some(row),
                Err(e) => {
                    log::warn!("skipping task row: {e}");
                    None
                }
            })
            .collect();

        // Resolve each distinct group once, concurrently.
        let mut ids: Vec<&str> = parsed.iter().map(|row| row.group_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();

        let lookups = join_all(
            ids.iter()
                .map(|id| async move { (id.to_string(), self.resolve_group_name(id).await) }),
        )
        .await;

        let names: HashMap<String, String> = lookups
            .into_iter()
            .filter_map(|(id, name)| name.map(|n| (id, n)))
            .collect();

        parsed
            .into_iter()
            .filter_map(|row| match names.get(&row.group_id) {
                Some(name) => Some(row.into_item(name.clone())),
                None => {
                    log::warn!(
                        "dropping task '{}': group {} did not resolve",
                        row.name,
                        row.group_id
                    );
                    None
                }
            })
            .collect()
    }

    /// Fetch the related page and extract its title text. Any failure is
    /// logged and reported as `None`; it must not take the batch down.
    pub async fn resolve_group_name(&self, page_id: &str) -> Option<String> {
        let value = match self.fetch_page(page_id).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("group page {page_id}: {e}");
                return None;
            }
        };

        match task::group_name_from_page(&value) {
            Ok(name) => Some(name),
            Err(e) => {
                log::warn!("group page {page_id}: {e}");
                None
            }
        }
    }

    async fn fetch_page(&self, page_id: &str) -> AgendaResult<Value> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .timeout(Duration::from_secs(PAGE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| AgendaError::Fetch(format!("page fetch: {e}")))?;

        if !response.status().is_success() {
            return Err(AgendaError::Fetch(format!(
                "page fetch returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AgendaError::Api(format!("page response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn row(name: &str, date: &str, kind: &str, class_id: &str) -> Value {
        json!({
            "properties": {
                "Name": { "title": [ { "plain_text": name } ] },
                "Date": { "date": { "start": date } },
                "Type": { "select": { "name": kind } },
                "Class": { "relation": [ { "id": class_id } ] },
                "Complete": { "checkbox": false }
            }
        })
    }

    fn group_page(title: &str) -> Value {
        json!({
            "properties": { "Class": { "title": [ { "plain_text": title } ] } }
        })
    }

    #[tokio::test]
    async fn incomplete_tasks_resolves_groups_and_isolates_failures() {
        let mut server = Server::new_async().await;

        let query_mock = server
            .mock("POST", "/databases/db-1/query")
            .match_header("Notion-Version", NOTION_VERSION)
            .match_header("Authorization", "Bearer key")
            .match_body(Matcher::PartialJson(json!({
                "filter": { "property": "Complete", "checkbox": { "equals": false } }
            })))
            .with_status(200)
            .with_body(
                json!({ "results": [
                    row("Essay", "2024-07-03", "assignment", "class-1"),
                    row("Lab report", "2024-07-04", "report", "class-gone"),
                    { "properties": {} },
                ] })
                .to_string(),
            )
            .create_async()
            .await;

        let page_mock = server
            .mock("GET", "/pages/class-1")
            .with_status(200)
            .with_body(group_page("Maths").to_string())
            .create_async()
            .await;

        let gone_mock = server
            .mock("GET", "/pages/class-gone")
            .with_status(404)
            .create_async()
            .await;

        let client = NotionClient::with_base_url("key", "db-1", &server.url());
        let items = client.incomplete_tasks(100).await.unwrap();

        query_mock.assert_async().await;
        page_mock.assert_async().await;
        gone_mock.assert_async().await;

        // The bad row and the unresolvable group are dropped; the sibling
        // survives fully resolved.
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Essay");
        assert_eq!(items[0].group_name, "Maths");
    }

    #[tokio::test]
    async fn shared_groups_are_resolved_once_and_order_is_kept() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/databases/db-1/query")
            .with_status(200)
            .with_body(
                json!({ "results": [
                    row("Second essay", "2024-07-05", "assignment", "class-1"),
                    row("First essay", "2024-07-03", "assignment", "class-1"),
                ] })
                .to_string(),
            )
            .create_async()
            .await;

        let page_mock = server
            .mock("GET", "/pages/class-1")
            .with_status(200)
            .with_body(group_page("Maths").to_string())
            .expect(1)
            .create_async()
            .await;

        let client = NotionClient::with_base_url("key", "db-1", &server.url());
        let items = client.incomplete_tasks(100).await.unwrap();

        page_mock.assert_async().await;

        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Second essay", "First essay"]);
    }

    #[tokio::test]
    async fn due_by_tomorrow_sends_the_date_filter() {
        let mut server = Server::new_async().await;

        let query_mock = server
            .mock("POST", "/databases/db-1/query")
            .match_body(Matcher::PartialJson(json!({
                "sorts": [ { "property": "Date", "direction": "ascending" } ],
                "filter": { "and": [
                    { "property": "Complete", "checkbox": { "equals": false } },
                    { "property": "Date", "date": { "before": "2024-07-04" } }
                ] }
            })))
            .with_status(200)
            .with_body(json!({ "results": [] }).to_string())
            .create_async()
            .await;

        let client = NotionClient::with_base_url("key", "db-1", &server.url());
        let today = NaiveDate::from_ymd_opt(2024, 7, 3).unwrap();
        let items = client.tasks_due_by_tomorrow(today).await.unwrap();

        query_mock.assert_async().await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn api_error_status_propagates_with_its_message() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/databases/db-1/query")
            .with_status(400)
            .with_body(json!({ "object": "error", "message": "bad filter" }).to_string())
            .create_async()
            .await;

        let client = NotionClient::with_base_url("key", "db-1", &server.url());
        let err = client.incomplete_tasks(100).await.unwrap_err();

        match err {
            AgendaError::Api(message) => assert!(message.contains("bad filter")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
