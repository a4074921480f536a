//! Fuzzy search across the incomplete tasks.

use agenda_core::display;
use agenda_core::rank::rank;
use anyhow::Result;

use crate::config::Config;
use crate::notion::{DEFAULT_QUERY_LIMIT, NotionClient};
use crate::render;

pub async fn run(config: &Config, query: &str, k: usize) -> Result<()> {
    let client = NotionClient::new(&config.api_key, &config.database_id);
    let items = client.incomplete_tasks(DEFAULT_QUERY_LIMIT).await?;

    let choices = display::task_lines(&items);
    let results = rank(query, &choices, k);

    render::print_search_results(&results);
    Ok(())
}
