use crate::config::CategoryConfig;
use crate::error::Result;
use crate::types::{FlatRow, MatchRecord};

/// Yields raw match records for a category, one per match file.
pub trait RecordSource: Send + Sync {
    /// Identifiers of every match in the category, in processing order
    fn match_ids(&self, category: &CategoryConfig) -> Result<Vec<String>>;

    /// Read and parse one match. A file that is not a match record at all
    /// returns `CricketError::MalformedFile`.
    fn read_match(&self, match_id: &str) -> Result<MatchRecord>;
}

/// Persists the accumulated rows of one category as a flat table.
pub trait TableSink: Send + Sync {
    /// Write all rows for the category, replacing any earlier output.
    /// Returns a human-readable description of the destination.
    fn write(&self, category: &CategoryConfig, rows: &[FlatRow]) -> Result<String>;
}
