//! Metrics for the flatten → load → query pipeline
//!
//! Metric names live in one enum so every phase records against the same
//! strings. Recording is a no-op until [`init`] installs the Prometheus
//! recorder.

use std::fmt;
use std::sync::OnceLock;
use tracing::info;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Flatten metrics
    FlattenFilesProcessed,
    FlattenFilesSkipped,
    FlattenDeliveriesSkipped,
    FlattenRowsEmitted,
    FlattenDuration,

    // Load metrics
    LoadRowsInserted,
    LoadTablesReplaced,
    LoadErrors,

    // Query metrics
    QueryRunsSuccess,
    QueryRunsError,
    QueryRowsWritten,
    QueryDuration,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Flatten metrics
            MetricName::FlattenFilesProcessed => "cricket_flatten_files_processed_total",
            MetricName::FlattenFilesSkipped => "cricket_flatten_files_skipped_total",
            MetricName::FlattenDeliveriesSkipped => "cricket_flatten_deliveries_skipped_total",
            MetricName::FlattenRowsEmitted => "cricket_flatten_rows_emitted_total",
            MetricName::FlattenDuration => "cricket_flatten_duration_seconds",

            // Load metrics
            MetricName::LoadRowsInserted => "cricket_load_rows_inserted_total",
            MetricName::LoadTablesReplaced => "cricket_load_tables_replaced_total",
            MetricName::LoadErrors => "cricket_load_errors_total",

            // Query metrics
            MetricName::QueryRunsSuccess => "cricket_query_runs_success_total",
            MetricName::QueryRunsError => "cricket_query_runs_error_total",
            MetricName::QueryRowsWritten => "cricket_query_rows_written_total",
            MetricName::QueryDuration => "cricket_query_duration_seconds",
        }
    }

    /// Get all metric names as an iterator
    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            FlattenFilesProcessed,
            FlattenFilesSkipped,
            FlattenDeliveriesSkipped,
            FlattenRowsEmitted,
            FlattenDuration,
            LoadRowsInserted,
            LoadTablesReplaced,
            LoadErrors,
            QueryRunsSuccess,
            QueryRunsError,
            QueryRowsWritten,
            QueryDuration,
        ]
        .into_iter()
    }

    /// Returns (phase, description)
    pub fn metadata(&self) -> (&'static str, &'static str) {
        match self {
            MetricName::FlattenFilesProcessed => ("flatten", "Match files flattened"),
            MetricName::FlattenFilesSkipped => ("flatten", "Match files skipped as malformed"),
            MetricName::FlattenDeliveriesSkipped => ("flatten", "Deliveries skipped as malformed"),
            MetricName::FlattenRowsEmitted => ("flatten", "Delivery rows written to the sink"),
            MetricName::FlattenDuration => ("flatten", "Time to flatten one category"),
            MetricName::LoadRowsInserted => ("load", "Rows inserted into SQLite"),
            MetricName::LoadTablesReplaced => ("load", "Tables dropped and reloaded"),
            MetricName::LoadErrors => ("load", "Categories that failed to load"),
            MetricName::QueryRunsSuccess => ("query", "Catalog queries that succeeded"),
            MetricName::QueryRunsError => ("query", "Catalog queries that failed"),
            MetricName::QueryRowsWritten => ("query", "Result rows written to CSV"),
            MetricName::QueryDuration => ("query", "Time to run one catalog query"),
        }
    }
}

static METRICS_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it again is a no-op.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;

    for name in MetricName::all_metrics() {
        let (_, description) = name.metadata();
        if name.as_str().ends_with("_seconds") {
            ::metrics::describe_histogram!(name.as_str(), description);
        } else {
            ::metrics::describe_counter!(name.as_str(), description);
        }
    }

    METRICS_HANDLE.set(handle).ok();
    info!("Metrics system initialized");
    Ok(())
}

/// Render the current metrics in Prometheus exposition format
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|handle| handle.render())
}

pub mod flatten {
    use super::MetricName;

    pub fn file_processed(category: &str) {
        ::metrics::counter!(MetricName::FlattenFilesProcessed.as_str(), "category" => category.to_string())
            .increment(1);
    }

    pub fn file_skipped(category: &str) {
        ::metrics::counter!(MetricName::FlattenFilesSkipped.as_str(), "category" => category.to_string())
            .increment(1);
    }

    pub fn deliveries_skipped(category: &str, count: usize) {
        ::metrics::counter!(MetricName::FlattenDeliveriesSkipped.as_str(), "category" => category.to_string())
            .increment(count as u64);
    }

    pub fn rows_emitted(category: &str, count: usize) {
        ::metrics::counter!(MetricName::FlattenRowsEmitted.as_str(), "category" => category.to_string())
            .increment(count as u64);
    }

    pub fn duration(category: &str, secs: f64) {
        ::metrics::histogram!(MetricName::FlattenDuration.as_str(), "category" => category.to_string())
            .record(secs);
    }
}

pub mod load {
    use super::MetricName;

    pub fn table_replaced(table: &str, rows: usize) {
        ::metrics::counter!(MetricName::LoadTablesReplaced.as_str(), "table" => table.to_string())
            .increment(1);
        ::metrics::counter!(MetricName::LoadRowsInserted.as_str(), "table" => table.to_string())
            .increment(rows as u64);
    }

    pub fn error(table: &str) {
        ::metrics::counter!(MetricName::LoadErrors.as_str(), "table" => table.to_string())
            .increment(1);
    }
}

pub mod query {
    use super::MetricName;

    pub fn success(name: &str, rows: usize, secs: f64) {
        ::metrics::counter!(MetricName::QueryRunsSuccess.as_str(), "query" => name.to_string())
            .increment(1);
        ::metrics::counter!(MetricName::QueryRowsWritten.as_str(), "query" => name.to_string())
            .increment(rows as u64);
        ::metrics::histogram!(MetricName::QueryDuration.as_str(), "query" => name.to_string())
            .record(secs);
    }

    pub fn error(name: &str) {
        ::metrics::counter!(MetricName::QueryRunsError.as_str(), "query" => name.to_string())
            .increment(1);
    }
}
