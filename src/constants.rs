/// Match-format category tags, as written into the `match_type` column
pub const IPL: &str = "IPL";
pub const ODIS: &str = "ODIs";
pub const T20: &str = "T20";
pub const TEST: &str = "Test";

// SQLite table names the query catalog is written against
pub const IPL_TABLE: &str = "ipl_matches";
pub const ODI_TABLE: &str = "odi_matches";
pub const T20_TABLE: &str = "t20_matches";
pub const TEST_TABLE: &str = "test_matches";

// Default filesystem layout
pub const DEFAULT_CONFIG_FILE: &str = "cricket.toml";
pub const CONFIG_ENV_VAR: &str = "CRICKET_CONFIG";
pub const DEFAULT_OUTPUT_DIR: &str = "CSVs";
pub const DEFAULT_DATABASE: &str = "cricket.db";
pub const DEFAULT_QUERY_RESULTS_DIR: &str = "Query_Results";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Extension of match files picked up by the directory source
pub const MATCH_FILE_EXTENSION: &str = "json";

/// Get all built-in category tags
pub fn get_supported_categories() -> Vec<&'static str> {
    vec![IPL, ODIS, T20, TEST]
}
