//! Typed view of the task database's query rows.
//!
//! Rows arrive as `{ properties: { Name, Date, Type, Class } }` where
//! `Class` is a relation whose target page must be fetched separately to
//! obtain a human-readable name. Each row is parsed on its own so one bad
//! row cannot poison a batch.

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AgendaError, AgendaResult};
use crate::instant::parse_instant;

/// One usable query row, before its group relation is resolved.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub name: String,
    pub due: NaiveDateTime,
    pub kind: String,
    pub group_id: String,
}

/// A task whose group relation resolved to a name. Ready to render.
#[derive(Debug, Clone)]
pub struct TaskItem {
    pub name: String,
    pub due: NaiveDateTime,
    pub kind: String,
    pub group_name: String,
}

#[derive(Deserialize)]
struct Row {
    properties: RowProperties,
}

#[derive(Deserialize)]
struct RowProperties {
    #[serde(rename = "Name")]
    name: TitleProperty,
    #[serde(rename = "Date")]
    date: DateProperty,
    #[serde(rename = "Type")]
    kind: SelectProperty,
    #[serde(rename = "Class")]
    class: RelationProperty,
}

#[derive(Deserialize)]
struct TitleProperty {
    title: Vec<RichText>,
}

#[derive(Deserialize)]
struct RichText {
    plain_text: String,
}

#[derive(Deserialize)]
struct DateProperty {
    date: Option<DateValue>,
}

#[derive(Deserialize)]
struct DateValue {
    start: String,
}

#[derive(Deserialize)]
struct SelectProperty {
    select: Option<SelectValue>,
}

#[derive(Deserialize)]
struct SelectValue {
    name: String,
}

#[derive(Deserialize)]
struct RelationProperty {
    relation: Vec<RelationRef>,
}

#[derive(Deserialize)]
struct RelationRef {
    id: String,
}

impl TaskRow {
    /// Parse one query-response row. Any absent or malformed field makes
    /// the row unusable; the caller decides whether to drop or abort.
    pub fn from_value(value: &Value) -> AgendaResult<TaskRow> {
        let row: Row = serde_json::from_value(value.clone())
            .map_err(|e| AgendaError::MissingField(format!("task row: {e}")))?;

        let name = row
            .properties
            .name
            .title
            .into_iter()
            .next()
            .ok_or_else(|| AgendaError::MissingField("Name title is empty".into()))?
            .plain_text;
        let due_raw = row
            .properties
            .date
            .date
            .ok_or_else(|| AgendaError::MissingField("Date has no value".into()))?
            .start;
        let due = parse_instant(&due_raw)?;
        let kind = row
            .properties
            .kind
            .select
            .ok_or_else(|| AgendaError::MissingField("Type has no selection".into()))?
            .name;
        let group_id = row
            .properties
            .class
            .relation
            .into_iter()
            .next()
            .ok_or_else(|| AgendaError::MissingField("Class relation is empty".into()))?
            .id;

        Ok(TaskRow {
            name,
            due,
            kind,
            group_id,
        })
    }

    /// Attach the resolved group name, producing a renderable item.
    pub fn into_item(self, group_name: String) -> TaskItem {
        TaskItem {
            name: self.name,
            due: self.due,
            kind: self.kind,
            group_name,
        }
    }
}

// The related page's title column is itself named `Class` in the store.
#[derive(Deserialize)]
struct GroupPage {
    properties: GroupPageProperties,
}

#[derive(Deserialize)]
struct GroupPageProperties {
    #[serde(rename = "Class")]
    class: GroupTitleProperty,
}

#[derive(Deserialize)]
struct GroupTitleProperty {
    title: Vec<RichText>,
}

/// Extract a group page's title text.
pub fn group_name_from_page(value: &Value) -> AgendaResult<String> {
    let page: GroupPage = serde_json::from_value(value.clone())
        .map_err(|e| AgendaError::MissingField(format!("group page: {e}")))?;

    page.properties
        .class
        .title
        .into_iter()
        .next()
        .map(|t| t.plain_text)
        .ok_or_else(|| AgendaError::MissingField("group page title is empty".into()))
}
