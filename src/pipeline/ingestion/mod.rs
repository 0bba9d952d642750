// Pipeline ingestion: locating and reading match files

pub mod match_source;

// Re-export key types and functions for external use
pub use match_source::DirectoryMatchSource;
