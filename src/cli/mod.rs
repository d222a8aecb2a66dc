//! Terminal front end: setup and one-shot queries against the local data

pub mod map;
pub mod quotes;
pub mod setup;
pub mod ui;

/// How one-shot query results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
