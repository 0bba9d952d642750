use serde::{Deserialize, Serialize};

/// Raw delivery entry as it appears in the match file; decoded lazily so a
/// single malformed entry does not reject the whole file.
pub type RawDelivery = serde_json::Value;

/// One match file: match-level info plus the innings tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRecord {
    pub info: Option<MatchInfo>,
    pub innings: Option<Vec<InningsRecord>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchInfo {
    pub dates: Option<Vec<String>>,
    pub venue: Option<String>,
    pub teams: Option<Vec<String>>,
    pub outcome: Option<MatchOutcome>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InningsRecord {
    pub team: Option<String>,
    pub overs: Option<Vec<OverRecord>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverRecord {
    pub over: Option<i64>,
    pub deliveries: Option<Vec<RawDelivery>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub batter: Option<String>,
    pub bowler: Option<String>,
    pub runs: Option<RunsBreakdown>,
    /// Keyed by extras type (wides, noballs, byes, ...); iterates in document order
    pub extras: Option<serde_json::Map<String, serde_json::Value>>,
    pub wickets: Option<Vec<WicketEvent>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunsBreakdown {
    pub batter: Option<i64>,
    pub extras: Option<i64>,
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WicketEvent {
    pub kind: Option<String>,
    pub player_out: Option<String>,
}

/// Match-level fields projected onto every delivery row of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchContext {
    pub category: String,
    pub date: String,
    pub venue: String,
    pub team1: String,
    pub team2: String,
    pub winner: Option<String>,
}

/// One row per delivery. Field order is the column order of the CSV and
/// SQL tables and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    pub match_type: String,
    pub date: String,
    pub venue: String,
    pub team1: String,
    pub team2: String,
    pub batting_team: String,
    pub over: Option<i64>,
    pub batter: String,
    pub bowler: String,
    pub runs_batter: i64,
    pub runs_extras: i64,
    pub runs_total: i64,
    pub extras_type: Option<String>,
    pub wicket_kind: Option<String>,
    pub player_out: Option<String>,
    pub winner: Option<String>,
}

/// Column names in `FlatRow` order
pub const FLAT_COLUMNS: [&str; 16] = [
    "match_type",
    "date",
    "venue",
    "team1",
    "team2",
    "batting_team",
    "over",
    "batter",
    "bowler",
    "runs_batter",
    "runs_extras",
    "runs_total",
    "extras_type",
    "wicket_kind",
    "player_out",
    "winner",
];
