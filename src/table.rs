use log::LevelFilter;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    deck::{Rank, ACE},
    round::Phase,
    snapshot::Snapshot,
};

fn default_deal_delay_ms() -> u32 {
    300
}

fn default_reveal_delay_ms() -> u32 {
    300
}

fn default_dealer_delay_ms() -> u32 {
    1_000
}

fn default_result_delay_ms() -> u32 {
    1_000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_deal_delay_ms")]
    pub deal_delay_ms: u32,
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u32,
    #[serde(default = "default_dealer_delay_ms")]
    pub dealer_delay_ms: u32,
    #[serde(default = "default_result_delay_ms")]
    pub result_delay_ms: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            seed: None,
            deal_delay_ms: default_deal_delay_ms(),
            reveal_delay_ms: default_reveal_delay_ms(),
            dealer_delay_ms: default_dealer_delay_ms(),
            result_delay_ms: default_result_delay_ms(),
            log_level: default_log_level(),
        }
    }
}

impl TableConfig {
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            deal_delay_ms: self.deal_delay_ms,
            reveal_delay_ms: self.reveal_delay_ms,
            dealer_delay_ms: self.dealer_delay_ms,
            result_delay_ms: self.result_delay_ms,
        }
    }

    /// How long the browser should wait before the next automatic step, if any.
    pub fn next_step_delay(&self, snapshot: &Snapshot) -> Option<u32> {
        match snapshot.phase {
            Phase::Dealing => Some(self.deal_delay_ms),
            Phase::DealerTurn if snapshot.dealer_must_hit => Some(self.dealer_delay_ms),
            Phase::DealerTurn => Some(self.result_delay_ms),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pacing {
    pub deal_delay_ms: u32,
    pub reveal_delay_ms: u32,
    pub dealer_delay_ms: u32,
    pub result_delay_ms: u32,
}

const SUITS: [char; 4] = ['♠', '♥', '♦', '♣'];
const TEN_FACES: [&str; 4] = ["10", "J", "Q", "K"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFace {
    pub label: &'static str,
    pub suit: char,
    pub red: bool,
}

/// Picks a face for a rank. Suit and the 10/J/Q/K label are cosmetic and
/// chosen fresh on every call.
pub fn decorate<R: Rng>(rank: Rank, rng: &mut R) -> Option<CardFace> {
    let label = match rank {
        ACE => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => TEN_FACES[rng.gen_range(0..TEN_FACES.len())],
        _ => return None,
    };
    let suit = SUITS[rng.gen_range(0..SUITS.len())];
    Some(CardFace {
        label,
        suit,
        red: matches!(suit, '♥' | '♦'),
    })
}

pub fn status_message(snapshot: &Snapshot) -> &'static str {
    match snapshot.phase {
        Phase::Idle => "Welcome! Click \"New Game\" to start playing",
        Phase::Dealing => "Dealing cards...",
        Phase::PlayerTurn => "Your turn! Hit or Stand?",
        Phase::DealerTurn if snapshot.dealer_must_hit => "Dealer hits...",
        Phase::DealerTurn => "Dealer stands",
        Phase::Resolved => snapshot.message.unwrap_or("Game Over"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub new_game: bool,
    pub hit: bool,
    pub stand: bool,
    pub play_again: bool,
}

pub fn controls(phase: Phase) -> Controls {
    Controls {
        new_game: phase == Phase::Idle,
        hit: phase == Phase::PlayerTurn,
        stand: phase == Phase::PlayerTurn,
        play_again: phase == Phase::Resolved,
    }
}

/// Snapshot plus the presentation hints the page renders from. Kept a plain
/// struct so it crosses into JS as an object, not a `Map`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub snapshot: Snapshot,
    pub status: &'static str,
    pub controls: Controls,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step_delay_ms: Option<u32>,
}

impl TableView {
    pub fn new(snapshot: Snapshot, config: &TableConfig) -> Self {
        TableView {
            status: status_message(&snapshot),
            controls: controls(snapshot.phase),
            next_step_delay_ms: config.next_step_delay(&snapshot),
            snapshot,
        }
    }
}
