pub mod flatten_use_case;
pub mod load_use_case;
pub mod ports;
pub mod query_use_case;

pub use flatten_use_case::{FlattenReport, FlattenUseCase};
pub use load_use_case::{LoadReport, LoadUseCase};
pub use query_use_case::{QueryOutcome, QueryReport, QueryUseCase};

use crate::config::CategoryConfig;
use crate::error::{CricketError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Flatten several categories concurrently, one blocking worker per category.
///
/// Each category is independent; results come back in the order the
/// categories were given. A failed category does not cancel the others.
pub async fn flatten_categories(
    use_case: Arc<FlattenUseCase>,
    categories: Vec<CategoryConfig>,
) -> Vec<(String, Result<FlattenReport>)> {
    let handles: Vec<_> = categories
        .into_iter()
        .map(|category| {
            let use_case = Arc::clone(&use_case);
            let name = category.name.clone();
            let handle =
                tokio::task::spawn_blocking(move || use_case.run_category(&category));
            (name, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(CricketError::Task(e.to_string())),
        };
        results.push((name, result));
    }
    results
}

/// Everything a CLI invocation did, persisted as JSON next to the CSVs
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub flatten: Vec<FlattenReport>,
    pub flatten_failures: Vec<(String, String)>,
    pub load: Option<LoadReport>,
    pub query: Option<QueryReport>,
}

/// Write the run summary to `<output_dir>/run_summary_<timestamp>.json`
pub fn persist_summary(summary: &RunSummary, output_dir: &Path) -> Result<String> {
    fs::create_dir_all(output_dir)?;

    let timestamp = summary.finished_at.format("%Y%m%d_%H%M%S");
    let filepath = output_dir.join(format!("run_summary_{timestamp}.json"));

    let json_content = serde_json::to_string_pretty(summary)?;
    fs::write(&filepath, json_content)?;

    Ok(filepath.to_string_lossy().to_string())
}
