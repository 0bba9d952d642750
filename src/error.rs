use thiserror::Error;

#[derive(Error, Debug)]
pub enum CricketError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The whole match file could not be read as a match record.
    #[error("Malformed match file {file}: {reason}")]
    MalformedFile { file: String, reason: String },

    /// A single delivery entry was not a delivery record.
    #[error("Malformed delivery in {file} (innings {innings}, over {over}, delivery {delivery}): {reason}")]
    MalformedDelivery {
        file: String,
        innings: usize,
        over: usize,
        delivery: usize,
        reason: String,
    },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, CricketError>;
