//! Match flattening: match file tree → one row per delivery.
//!
//! The three stages are pure functions of their input. [`context`] runs once
//! per match, [`walker`] yields deliveries in document order and [`projector`]
//! turns each of them into a [`FlatRow`].

pub mod context;
pub mod projector;
pub mod walker;

pub use context::extract_context;
pub use projector::{decode_delivery, project};
pub use walker::{walk, WalkedDelivery};

use crate::error::CricketError;
use crate::types::{FlatRow, MatchRecord};
use tracing::warn;

/// Rows produced from one match, plus the deliveries that had to be skipped
#[derive(Debug, Default)]
pub struct FlattenedMatch {
    pub rows: Vec<FlatRow>,
    pub skipped: Vec<CricketError>,
}

/// Flatten a single match record.
///
/// `match_id` only labels diagnostics. A delivery that cannot be decoded is
/// skipped with a warning and the rest of the match is still flattened.
pub fn flatten_match(category: &str, match_id: &str, record: &MatchRecord) -> FlattenedMatch {
    let ctx = extract_context(category, record);
    let mut out = FlattenedMatch::default();

    for walked in walk(record) {
        match decode_delivery(walked.delivery) {
            Ok(delivery) => {
                out.rows
                    .push(project(&ctx, walked.batting_team, walked.over, &delivery));
            }
            Err(e) => {
                warn!(
                    file = %match_id,
                    innings = walked.innings_index,
                    over = walked.over_position,
                    delivery = walked.delivery_index,
                    "Skipping malformed delivery: {}",
                    e
                );
                out.skipped.push(CricketError::MalformedDelivery {
                    file: match_id.to_string(),
                    innings: walked.innings_index,
                    over: walked.over_position,
                    delivery: walked.delivery_index,
                    reason: e.to_string(),
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> MatchRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_delivery_example() {
        let rec = record(json!({
            "info": {"dates": ["2020-01-01"], "venue": "X", "teams": ["A", "B"], "outcome": {"winner": "A"}},
            "innings": [{"team": "A", "overs": [{"over": 0, "deliveries": [
                {"batter": "p1", "bowler": "p2", "runs": {"batter": 4, "extras": 0, "total": 4}}
            ]}]}]
        }));

        let out = flatten_match("IPL", "example.json", &rec);
        assert!(out.skipped.is_empty());
        assert_eq!(out.rows.len(), 1);

        let row = &out.rows[0];
        assert_eq!(row.match_type, "IPL");
        assert_eq!(row.date, "2020-01-01");
        assert_eq!(row.venue, "X");
        assert_eq!((row.team1.as_str(), row.team2.as_str()), ("A", "B"));
        assert_eq!(row.batting_team, "A");
        assert_eq!(row.over, Some(0));
        assert_eq!((row.batter.as_str(), row.bowler.as_str()), ("p1", "p2"));
        assert_eq!((row.runs_batter, row.runs_extras, row.runs_total), (4, 0, 4));
        assert_eq!(row.extras_type, None);
        assert_eq!(row.wicket_kind, None);
        assert_eq!(row.player_out, None);
        assert_eq!(row.winner.as_deref(), Some("A"));
    }

    #[test]
    fn test_row_count_and_context_propagation() {
        let rec = record(json!({
            "info": {"dates": ["2021-03-04"], "venue": "Lord's", "teams": ["England", "India"]},
            "innings": [
                {"team": "England", "overs": [
                    {"over": 0, "deliveries": [{"batter": "e1"}, {"batter": "e2"}, {"batter": "e3"}]},
                    {"over": 1, "deliveries": [{"batter": "e1"}]}
                ]},
                {"team": "India", "overs": [
                    {"over": 0, "deliveries": [{"batter": "i1"}, {"batter": "i2"}]}
                ]}
            ]
        }));

        let out = flatten_match("Test", "m.json", &rec);
        assert_eq!(out.rows.len(), 3 + 1 + 2);

        let first = &out.rows[0];
        for row in &out.rows {
            assert_eq!(row.match_type, first.match_type);
            assert_eq!(row.date, first.date);
            assert_eq!(row.venue, first.venue);
            assert_eq!(row.team1, first.team1);
            assert_eq!(row.team2, first.team2);
            assert_eq!(row.winner, None);
        }

        let batters: Vec<&str> = out.rows.iter().map(|r| r.batter.as_str()).collect();
        assert_eq!(batters, vec!["e1", "e2", "e3", "e1", "i1", "i2"]);
        assert_eq!(out.rows[4].batting_team, "India");
    }

    #[test]
    fn test_malformed_delivery_is_skipped() {
        let rec = record(json!({
            "innings": [{"team": "A", "overs": [{"over": 2, "deliveries": [
                {"batter": "ok1"},
                "garbage",
                {"batter": "ok2", "runs": {"batter": "six"}},
                {"batter": "ok3"}
            ]}]}]
        }));

        let out = flatten_match("ODIs", "bad.json", &rec);
        let batters: Vec<&str> = out.rows.iter().map(|r| r.batter.as_str()).collect();
        assert_eq!(batters, vec!["ok1", "ok3"]);
        assert_eq!(out.skipped.len(), 2);

        match &out.skipped[0] {
            CricketError::MalformedDelivery { file, innings, over, delivery, .. } => {
                assert_eq!(file, "bad.json");
                assert_eq!((*innings, *over, *delivery), (0, 0, 1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_innings_produces_no_rows() {
        let rec = record(json!({"info": {"teams": ["A", "B"]}, "innings": []}));
        let out = flatten_match("T20", "empty.json", &rec);
        assert!(out.rows.is_empty());
        assert!(out.skipped.is_empty());
    }
}
