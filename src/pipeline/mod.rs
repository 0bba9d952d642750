// Data pipeline: ingestion, processing, storage, and analysis

pub mod analysis;
pub mod ingestion;
pub mod processing;
pub mod storage;

// Re-export key types and functions from each stage
pub use processing::flatten;
