//! Terminal output helpers.

use agenda_core::rank::RankedResult;
use owo_colors::OwoColorize;

const SEPARATOR: &str = "---------------";

/// Ranked search results as `- {candidate} (relevance: {score})` lines.
pub fn print_search_results(results: &[RankedResult]) {
    println!("{}", "Search Results:".bold());
    println!("{SEPARATOR}");
    if results.is_empty() {
        println!("{}", "No matches".dimmed());
        return;
    }
    for result in results {
        let relevance = format!("(relevance: {})", result.score);
        println!("- {} {}", result.candidate, relevance.dimmed());
    }
}

/// A labeled `- {line}` list with a dimmed placeholder when empty.
pub fn print_list(header: &str, lines: &[String], empty_label: &str) {
    println!("{}", header.bold());
    println!("{SEPARATOR}");
    if lines.is_empty() {
        println!("{}", empty_label.dimmed());
        return;
    }
    for line in lines {
        println!("- {line}");
    }
}

/// One red line for a feed that could not be read; siblings keep printing.
pub fn print_feed_error(url: &str, error: &impl std::fmt::Display) {
    println!("- {} {}", url.dimmed(), error.to_string().red());
}
