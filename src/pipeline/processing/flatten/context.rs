use crate::types::{MatchContext, MatchRecord};

/// Pull the match-level fields that every delivery row repeats.
///
/// Absence is normal input shape here: each missing field collapses to an
/// empty string (or `None` for the winner) and nothing is reported.
pub fn extract_context(category: &str, record: &MatchRecord) -> MatchContext {
    let info = record.info.as_ref();

    let date = info
        .and_then(|i| i.dates.as_ref())
        .and_then(|dates| dates.first())
        .cloned()
        .unwrap_or_default();

    let venue = info.and_then(|i| i.venue.clone()).unwrap_or_default();

    let teams = info.and_then(|i| i.teams.as_deref()).unwrap_or(&[]);
    let team1 = teams.first().cloned().unwrap_or_default();
    let team2 = teams.get(1).cloned().unwrap_or_default();

    let winner = info
        .and_then(|i| i.outcome.as_ref())
        .and_then(|o| o.winner.clone());

    MatchContext {
        category: category.to_string(),
        date,
        venue,
        team1,
        team2,
        winner,
    }
}
