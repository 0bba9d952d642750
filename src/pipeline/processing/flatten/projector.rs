use crate::types::{DeliveryRecord, FlatRow, MatchContext, RawDelivery};
use serde::Deserialize;
use tracing::debug;

/// Decode a raw delivery entry. Fails only when the entry is not shaped like
/// a delivery at all (not an object, or a field of the wrong type).
pub fn decode_delivery(raw: &RawDelivery) -> Result<DeliveryRecord, serde_json::Error> {
    DeliveryRecord::deserialize(raw)
}

impl DeliveryRecord {
    /// Extras type of this delivery: the first key of the extras mapping in
    /// document order. Simultaneous extras types collapse to that first key.
    /// A present but empty mapping has no type and yields `None`.
    pub fn extras_type(&self) -> Option<String> {
        let extras = self.extras.as_ref()?;
        let first = extras.keys().next().cloned();
        if first.is_none() {
            debug!("delivery has an empty extras mapping; extras_type left null");
        }
        first
    }

    /// Kind and dismissed player of the first wicket event only; further
    /// dismissals on the same delivery are not represented.
    pub fn first_wicket(&self) -> (Option<String>, Option<String>) {
        match self.wickets.as_deref().and_then(|w| w.first()) {
            Some(wicket) => (wicket.kind.clone(), wicket.player_out.clone()),
            None => (None, None),
        }
    }
}

/// Map one delivery plus its innings/over/match context onto the flat row shape.
pub fn project(
    ctx: &MatchContext,
    batting_team: Option<&str>,
    over: Option<i64>,
    delivery: &DeliveryRecord,
) -> FlatRow {
    let runs = delivery.runs.clone().unwrap_or_default();
    let (wicket_kind, player_out) = delivery.first_wicket();

    FlatRow {
        match_type: ctx.category.clone(),
        date: ctx.date.clone(),
        venue: ctx.venue.clone(),
        team1: ctx.team1.clone(),
        team2: ctx.team2.clone(),
        batting_team: batting_team.unwrap_or_default().to_string(),
        over,
        batter: delivery.batter.clone().unwrap_or_default(),
        bowler: delivery.bowler.clone().unwrap_or_default(),
        runs_batter: runs.batter.unwrap_or(0),
        runs_extras: runs.extras.unwrap_or(0),
        runs_total: runs.total.unwrap_or(0),
        extras_type: delivery.extras_type(),
        wicket_kind,
        player_out,
        winner: ctx.winner.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> MatchContext {
        MatchContext {
            category: "T20".to_string(),
            date: "2020-01-01".to_string(),
            venue: "X".to_string(),
            team1: "A".to_string(),
            team2: "B".to_string(),
            winner: Some("A".to_string()),
        }
    }

    fn delivery(value: serde_json::Value) -> DeliveryRecord {
        decode_delivery(&value).unwrap()
    }

    #[test]
    fn test_plain_delivery() {
        let d = delivery(json!({
            "batter": "p1", "bowler": "p2",
            "runs": {"batter": 4, "extras": 0, "total": 4}
        }));

        let row = project(&context(), Some("A"), Some(0), &d);
        assert_eq!(
            row,
            FlatRow {
                match_type: "T20".to_string(),
                date: "2020-01-01".to_string(),
                venue: "X".to_string(),
                team1: "A".to_string(),
                team2: "B".to_string(),
                batting_team: "A".to_string(),
                over: Some(0),
                batter: "p1".to_string(),
                bowler: "p2".to_string(),
                runs_batter: 4,
                runs_extras: 0,
                runs_total: 4,
                extras_type: None,
                wicket_kind: None,
                player_out: None,
                winner: Some("A".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let row = project(&context(), None, None, &delivery(json!({})));
        assert_eq!(row.batter, "");
        assert_eq!(row.bowler, "");
        assert_eq!(row.batting_team, "");
        assert_eq!(row.over, None);
        assert_eq!((row.runs_batter, row.runs_extras, row.runs_total), (0, 0, 0));
        assert_eq!(row.extras_type, None);
        assert_eq!(row.wicket_kind, None);
        assert_eq!(row.player_out, None);
    }

    #[test]
    fn test_partial_runs_breakdown() {
        let row = project(&context(), Some("B"), Some(3), &delivery(json!({"runs": {"total": 1}})));
        assert_eq!((row.runs_batter, row.runs_extras, row.runs_total), (0, 0, 1));
    }

    #[test]
    fn test_conflicting_runs_pass_through() {
        let d = delivery(json!({"runs": {"batter": 1, "extras": 1, "total": 7}}));
        let row = project(&context(), Some("A"), Some(0), &d);
        assert_eq!((row.runs_batter, row.runs_extras, row.runs_total), (1, 1, 7));
    }

    #[test]
    fn test_extras_type_takes_first_key_in_document_order() {
        let d = delivery(json!({
            "runs": {"batter": 0, "extras": 6, "total": 6},
            "extras": {"wides": 5, "noballs": 1}
        }));
        assert_eq!(d.extras_type().as_deref(), Some("wides"));
    }

    #[test]
    fn test_empty_extras_mapping_is_null() {
        let d = delivery(json!({"extras": {}}));
        let row = project(&context(), Some("A"), Some(0), &d);
        assert_eq!(row.extras_type, None);
    }

    #[test]
    fn test_first_wicket_only() {
        let d = delivery(json!({
            "wickets": [
                {"kind": "caught", "player_out": "A"},
                {"kind": "run out", "player_out": "B"}
            ]
        }));

        let row = project(&context(), Some("A"), Some(0), &d);
        assert_eq!(row.wicket_kind.as_deref(), Some("caught"));
        assert_eq!(row.player_out.as_deref(), Some("A"));
    }

    #[test]
    fn test_empty_wickets_list_is_null() {
        let row = project(&context(), Some("A"), Some(0), &delivery(json!({"wickets": []})));
        assert_eq!(row.wicket_kind, None);
        assert_eq!(row.player_out, None);
    }

    #[test]
    fn test_winner_copied_regardless_of_batting_team() {
        let d = delivery(json!({"batter": "b"}));
        assert_eq!(project(&context(), Some("A"), Some(0), &d).winner.as_deref(), Some("A"));
        assert_eq!(project(&context(), Some("B"), Some(0), &d).winner.as_deref(), Some("A"));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(decode_delivery(&json!("not a delivery")).is_err());
        assert!(decode_delivery(&json!(42)).is_err());
        assert!(decode_delivery(&json!({"runs": "four"})).is_err());
    }
}
