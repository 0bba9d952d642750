use crate::app::ports::{RecordSource, TableSink};
use crate::config::CategoryConfig;
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::flatten::flatten_match;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of flattening one category
#[derive(Debug, Clone, Serialize)]
pub struct FlattenReport {
    pub category: String,
    pub files_seen: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub deliveries_skipped: usize,
    pub rows_written: usize,
    pub destination: String,
    pub errors: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Reads every match of a category, flattens it and hands the accumulated
/// rows to the sink in one write.
pub struct FlattenUseCase {
    source: Box<dyn RecordSource>,
    sink: Box<dyn TableSink>,
}

impl FlattenUseCase {
    pub fn new(source: Box<dyn RecordSource>, sink: Box<dyn TableSink>) -> Self {
        Self { source, sink }
    }

    pub fn run_category(&self, category: &CategoryConfig) -> Result<FlattenReport> {
        let span = tracing::info_span!("flatten", category = %category.name);
        let _enter = span.enter();
        let started = Instant::now();

        let match_ids = self.source.match_ids(category)?;
        info!("🔧 Flattening {} match files", match_ids.len());

        let mut rows = Vec::new();
        let mut errors = Vec::new();
        let mut files_processed = 0;
        let mut files_skipped = 0;
        let mut deliveries_skipped = 0;

        for (i, match_id) in match_ids.iter().enumerate() {
            let record = match self.source.read_match(match_id) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping match file {}: {}", match_id, e);
                    metrics::flatten::file_skipped(&category.name);
                    files_skipped += 1;
                    errors.push(e.to_string());
                    continue;
                }
            };

            let flattened = flatten_match(&category.name, match_id, &record);
            if !flattened.skipped.is_empty() {
                metrics::flatten::deliveries_skipped(&category.name, flattened.skipped.len());
                deliveries_skipped += flattened.skipped.len();
                errors.extend(flattened.skipped.iter().map(|e| e.to_string()));
            }
            rows.extend(flattened.rows);
            files_processed += 1;
            metrics::flatten::file_processed(&category.name);

            if (i + 1) % 500 == 0 {
                debug!("Flattened {}/{} files", i + 1, match_ids.len());
            }
        }

        let destination = self.sink.write(category, &rows)?;
        metrics::flatten::rows_emitted(&category.name, rows.len());
        metrics::flatten::duration(&category.name, started.elapsed().as_secs_f64());

        info!(
            "✅ Flattened {} files into {} rows ({} files skipped, {} deliveries skipped)",
            files_processed,
            rows.len(),
            files_skipped,
            deliveries_skipped
        );

        Ok(FlattenReport {
            category: category.name.clone(),
            files_seen: match_ids.len(),
            files_processed,
            files_skipped,
            deliveries_skipped,
            rows_written: rows.len(),
            destination,
            errors,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CricketError;
    use crate::pipeline::storage::InMemoryTableSink;
    use crate::types::MatchRecord;
    use serde_json::json;

    /// Source backed by a fixed list of (id, json) pairs; `None` simulates an unreadable file
    struct MockSource {
        matches: Vec<(String, Option<serde_json::Value>)>,
    }

    impl RecordSource for MockSource {
        fn match_ids(&self, _category: &CategoryConfig) -> Result<Vec<String>> {
            Ok(self.matches.iter().map(|(id, _)| id.clone()).collect())
        }

        fn read_match(&self, match_id: &str) -> Result<MatchRecord> {
            match self.matches.iter().find(|(id, _)| id == match_id) {
                Some((_, Some(value))) => Ok(serde_json::from_value(value.clone())?),
                _ => Err(CricketError::MalformedFile {
                    file: match_id.to_string(),
                    reason: "unreadable".to_string(),
                }),
            }
        }
    }

    fn one_over(team: &str, batters: &[&str]) -> serde_json::Value {
        let deliveries: Vec<serde_json::Value> = batters
            .iter()
            .map(|b| json!({"batter": b, "bowler": "x", "runs": {"batter": 1, "extras": 0, "total": 1}}))
            .collect();
        json!({
            "info": {"dates": ["2023-05-28"], "venue": "Narendra Modi Stadium", "teams": [team, "Other"]},
            "innings": [{"team": team, "overs": [{"over": 0, "deliveries": deliveries}]}]
        })
    }

    #[test]
    fn test_rows_accumulate_in_file_order_and_bad_files_are_skipped() {
        let source = MockSource {
            matches: vec![
                ("m1.json".to_string(), Some(one_over("CSK", &["a", "b"]))),
                ("broken.json".to_string(), None),
                ("m2.json".to_string(), Some(one_over("GT", &["c"]))),
            ],
        };
        let sink = InMemoryTableSink::new();
        let use_case = FlattenUseCase::new(Box::new(source), Box::new(sink.clone()));
        let category = CategoryConfig::new("IPL", "IPL", "ipl_matches.csv", "ipl_matches");

        let report = use_case.run_category(&category).unwrap();
        assert_eq!(report.files_seen, 3);
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.rows_written, 3);
        assert_eq!(report.destination, "memory://IPL");
        assert_eq!(report.errors.len(), 1);

        let rows = sink.rows("IPL").unwrap();
        let order: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.batting_team.as_str(), r.batter.as_str()))
            .collect();
        assert_eq!(order, vec![("CSK", "a"), ("CSK", "b"), ("GT", "c")]);
        assert!(rows.iter().all(|r| r.match_type == "IPL"));
    }

    #[test]
    fn test_empty_category_still_writes() {
        let sink = InMemoryTableSink::new();
        let use_case = FlattenUseCase::new(
            Box::new(MockSource { matches: vec![] }),
            Box::new(sink.clone()),
        );
        let category = CategoryConfig::new("Test", "Test", "test_matches.csv", "test_matches");

        let report = use_case.run_category(&category).unwrap();
        assert_eq!(report.rows_written, 0);
        assert_eq!(sink.rows("Test"), Some(vec![]));
    }
}
