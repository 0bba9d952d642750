use crate::config::CategoryConfig;
use crate::error::{CricketError, Result};
use crate::observability::metrics;
use crate::pipeline::storage::CricketDb;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// (table, rows) for every table that was replaced
    pub loaded: Vec<(String, usize)>,
    pub errors: Vec<String>,
}

/// Loads each category's flattened CSV into its SQLite table.
pub struct LoadUseCase<'a> {
    db: &'a mut CricketDb,
    csv_dir: PathBuf,
}

impl<'a> LoadUseCase<'a> {
    pub fn new(db: &'a mut CricketDb, csv_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            csv_dir: csv_dir.into(),
        }
    }

    pub fn load_category(&mut self, category: &CategoryConfig) -> Result<usize> {
        let path = self.csv_dir.join(&category.csv_file);
        if !path.exists() {
            return Err(CricketError::Config(format!(
                "no flattened CSV for {} at {}",
                category.name,
                path.display()
            )));
        }
        let rows = self.db.load_csv(&category.table, &path)?;
        metrics::load::table_replaced(&category.table, rows);
        Ok(rows)
    }

    /// Load every category; a failure is recorded and the next category still loads.
    pub fn load_all(&mut self, categories: &[CategoryConfig]) -> LoadReport {
        let mut report = LoadReport::default();
        for category in categories {
            match self.load_category(category) {
                Ok(rows) => {
                    info!("💾 {} → {} ({} rows)", category.csv_file, category.table, rows);
                    report.loaded.push((category.table.clone(), rows));
                }
                Err(e) => {
                    error!("Failed to load {}: {}", category.name, e);
                    metrics::load::error(&category.table);
                    report.errors.push(format!("{}: {}", category.name, e));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::TableSink;
    use crate::pipeline::storage::CsvTableSink;
    use crate::types::FlatRow;
    use tempfile::tempdir;

    fn row(extras_type: Option<&str>) -> FlatRow {
        FlatRow {
            match_type: "ODIs".to_string(),
            date: "2023-11-19".to_string(),
            venue: "Ahmedabad".to_string(),
            team1: "India".to_string(),
            team2: "Australia".to_string(),
            batting_team: "Australia".to_string(),
            over: None,
            batter: "TM Head".to_string(),
            bowler: "JJ Bumrah".to_string(),
            runs_batter: 0,
            runs_extras: 1,
            runs_total: 1,
            extras_type: extras_type.map(str::to_string),
            wicket_kind: None,
            player_out: None,
            winner: Some("Australia".to_string()),
        }
    }

    #[test]
    fn test_load_all_reports_missing_csv_and_continues() {
        let dir = tempdir().unwrap();
        let odi = CategoryConfig::new("ODIs", "ODIs", "odi_matches.csv", "odi_matches");
        let test = CategoryConfig::new("Test", "Test", "test_matches.csv", "test_matches");
        CsvTableSink::new(dir.path())
            .write(&odi, &[row(Some("wides")), row(None)])
            .unwrap();

        let mut db = CricketDb::open_in_memory().unwrap();
        let report = LoadUseCase::new(&mut db, dir.path()).load_all(&[test, odi]);

        assert_eq!(report.loaded, vec![("odi_matches".to_string(), 2)]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Test:"));

        let nulls: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM odi_matches WHERE extras_type IS NULL AND over IS NULL",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(nulls, 1);
    }
}
