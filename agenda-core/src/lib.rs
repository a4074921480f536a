//! Core types for the agenda CLI.
//!
//! This crate holds the pure half of the pipeline: canonical instant
//! parsing, iCalendar event extraction, task-row parsing, display-line
//! formatting, and fuzzy ranking. Network adapters live in the CLI crate
//! and feed their payloads through here.

pub mod display;
pub mod error;
pub mod event;
pub mod ics;
pub mod instant;
pub mod rank;
pub mod task;

pub use error::{AgendaError, AgendaResult};
