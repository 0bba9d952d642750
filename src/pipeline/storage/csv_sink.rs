use crate::app::ports::TableSink;
use crate::config::CategoryConfig;
use crate::error::Result;
use crate::types::FlatRow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes each category to `<output_dir>/<category.csv_file>` with a header row.
/// Null columns are written as empty fields.
pub struct CsvTableSink {
    output_dir: PathBuf,
}

impl CsvTableSink {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, category: &CategoryConfig) -> PathBuf {
        self.output_dir.join(&category.csv_file)
    }
}

impl TableSink for CsvTableSink {
    fn write(&self, category: &CategoryConfig, rows: &[FlatRow]) -> Result<String> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(category);

        let mut writer = csv::Writer::from_path(&path)?;
        if rows.is_empty() {
            // serde only emits the header alongside the first record
            writer.write_record(crate::types::FLAT_COLUMNS)?;
        }
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!("💾 Saved {} rows for {} to {}", rows.len(), category.name, path.display());
        Ok(path.to_string_lossy().to_string())
    }
}

/// Read a flattened CSV back into rows.
pub fn read_rows(path: &Path) -> Result<Vec<FlatRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
