use crate::app::ports::TableSink;
use crate::config::CategoryConfig;
use crate::error::Result;
use crate::types::FlatRow;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// In-memory table sink for development/testing
#[derive(Clone, Default)]
pub struct InMemoryTableSink {
    tables: Arc<Mutex<HashMap<String, Vec<FlatRow>>>>,
}

impl InMemoryTableSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows last written for a category, if any
    pub fn rows(&self, category: &str) -> Option<Vec<FlatRow>> {
        let tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.get(category).cloned()
    }
}

impl TableSink for InMemoryTableSink {
    fn write(&self, category: &CategoryConfig, rows: &[FlatRow]) -> Result<String> {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.insert(category.name.clone(), rows.to_vec());

        debug!("Stored {} rows for {} in memory", rows.len(), category.name);
        Ok(format!("memory://{}", category.name))
    }
}
