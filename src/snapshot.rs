use serde::Serialize;

use crate::{deck::Rank, outcome::Outcome, round::Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub rank: Rank,
    /// Face down on the table. The rank is still carried so the reveal can
    /// flip it without asking the round again.
    pub concealed: bool,
}

impl CardView {
    pub fn new(rank: Rank, concealed: bool) -> Self {
        CardView { rank, concealed }
    }
}

/// Everything the table needs to draw itself after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: Phase,
    pub generation: u32,
    pub player_cards: Vec<CardView>,
    pub dealer_cards: Vec<CardView>,
    /// `None` while the hand is empty. A natural is reported as 21.
    pub player_score: Option<u32>,
    /// Counts only face-up cards.
    pub dealer_score: Option<u32>,
    pub dealer_must_hit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}
