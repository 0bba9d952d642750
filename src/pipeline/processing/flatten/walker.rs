use crate::types::{MatchRecord, RawDelivery};

/// A delivery located in the innings → over → delivery tree, together with
/// the innings and over context it inherits.
#[derive(Debug, Clone, Copy)]
pub struct WalkedDelivery<'a> {
    /// Position of the innings in the match file
    pub innings_index: usize,
    /// Position of the over within its innings (not the declared over number)
    pub over_position: usize,
    /// Position of the delivery within its over
    pub delivery_index: usize,
    pub batting_team: Option<&'a str>,
    /// Declared over number; `None` stays `None` since 0 is a real over
    pub over: Option<i64>,
    pub delivery: &'a RawDelivery,
}

/// Walk every delivery of a match in document order.
///
/// The iterator is lazy, borrows the record and keeps no state between calls,
/// so walking the same record twice yields the same sequence.
pub fn walk(record: &MatchRecord) -> impl Iterator<Item = WalkedDelivery<'_>> {
    record
        .innings
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .enumerate()
        .flat_map(|(innings_index, innings)| {
            let batting_team = innings.team.as_deref();
            innings
                .overs
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .enumerate()
                .flat_map(move |(over_position, over)| {
                    over.deliveries
                        .as_deref()
                        .unwrap_or(&[])
                        .iter()
                        .enumerate()
                        .map(move |(delivery_index, delivery)| WalkedDelivery {
                            innings_index,
                            over_position,
                            delivery_index,
                            batting_team,
                            over: over.over,
                            delivery,
                        })
                })
        })
}
