use crate::app::ports::RecordSource;
use crate::config::CategoryConfig;
use crate::constants::MATCH_FILE_EXTENSION;
use crate::error::{CricketError, Result};
use crate::types::MatchRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads match files from `<data_root>/<category.source_dir>/*.json`.
pub struct DirectoryMatchSource {
    root: PathBuf,
}

impl DirectoryMatchSource {
    pub fn new<P: Into<PathBuf>>(data_root: P) -> Self {
        Self {
            root: data_root.into(),
        }
    }

    fn category_dir(&self, category: &CategoryConfig) -> PathBuf {
        self.root.join(&category.source_dir)
    }

    fn is_match_file(path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(MATCH_FILE_EXTENSION))
                .unwrap_or(false)
    }
}

impl RecordSource for DirectoryMatchSource {
    fn match_ids(&self, category: &CategoryConfig) -> Result<Vec<String>> {
        let dir = self.category_dir(category);
        let entries = fs::read_dir(&dir).map_err(|e| {
            CricketError::Config(format!(
                "Cannot read match directory '{}' for category {}: {}",
                dir.display(),
                category.name,
                e
            ))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if Self::is_match_file(&path) {
                paths.push(path);
            }
        }
        // Directory order is platform dependent; sort so output order is stable
        paths.sort();

        debug!(
            "Found {} match files in {} for {}",
            paths.len(),
            dir.display(),
            category.name
        );
        Ok(paths
            .into_iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect())
    }

    fn read_match(&self, match_id: &str) -> Result<MatchRecord> {
        let bytes = fs::read(match_id).map_err(|e| CricketError::MalformedFile {
            file: match_id.to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| CricketError::MalformedFile {
            file: match_id.to_string(),
            reason: e.to_string(),
        })
    }
}
