use crate::error::Result;
use crate::pipeline::analysis::catalog::NamedQuery;
use crate::pipeline::storage::CricketDb;
use rusqlite::types::ValueRef;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Result set of one query, with every value rendered as text
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    /// `None` is SQL NULL
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultTable {
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|v| v.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Executes catalog queries against the delivery store. Stateless apart
/// from the borrowed connection.
pub struct QueryRunner<'a> {
    db: &'a CricketDb,
}

impl<'a> QueryRunner<'a> {
    pub fn new(db: &'a CricketDb) -> Self {
        Self { db }
    }

    pub fn run(&self, query: &NamedQuery) -> Result<ResultTable> {
        debug!("Running query {}", query.name);
        let mut stmt = self.db.connection().prepare(query.sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(render_value(row.get_ref(i)?));
            }
            rows.push(values);
        }

        Ok(ResultTable { columns, rows })
    }
}

fn render_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{f:.1}")),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).to_string()),
    }
}
