use crate::observability::metrics;
use crate::pipeline::analysis::{catalog, NamedQuery, QueryRunner};
use crate::pipeline::storage::CricketDb;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub name: String,
    pub rows: usize,
    pub output_file: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryReport {
    pub succeeded: Vec<QueryOutcome>,
    /// (query name, error)
    pub failed: Vec<(String, String)>,
}

/// Runs catalog queries and saves each result set to `<results_dir>/<name>.csv`.
pub struct QueryUseCase<'a> {
    db: &'a CricketDb,
    results_dir: PathBuf,
}

impl<'a> QueryUseCase<'a> {
    pub fn new(db: &'a CricketDb, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            results_dir: results_dir.into(),
        }
    }

    /// Warn about catalog tables that have not been loaded yet; queries
    /// touching them will fail individually.
    fn check_tables(&self) {
        for table in catalog::referenced_tables() {
            match self.db.table_exists(table) {
                Ok(true) => {}
                Ok(false) => warn!("Table {} is not loaded; queries using it will fail", table),
                Err(e) => warn!("Could not inspect table {}: {}", table, e),
            }
        }
    }

    pub fn run(&self, queries: &[&NamedQuery]) -> QueryReport {
        self.check_tables();
        let runner = QueryRunner::new(self.db);
        let mut report = QueryReport::default();

        for query in queries {
            let started = Instant::now();
            let path = self.results_dir.join(format!("{}.csv", query.name));
            let outcome = runner
                .run(query)
                .and_then(|table| table.write_csv(&path).map(|_| table.rows.len()));

            match outcome {
                Ok(rows) => {
                    metrics::query::success(query.name, rows, started.elapsed().as_secs_f64());
                    info!("✅ Saved: {}", path.display());
                    report.succeeded.push(QueryOutcome {
                        name: query.name.to_string(),
                        rows,
                        output_file: path.to_string_lossy().to_string(),
                    });
                }
                Err(e) => {
                    metrics::query::error(query.name);
                    error!("Query {} failed: {}", query.name, e);
                    report.failed.push((query.name.to_string(), e.to_string()));
                }
            }
        }

        info!(
            "Ran {} queries ({} failed)",
            queries.len(),
            report.failed.len()
        );
        report
    }
}
