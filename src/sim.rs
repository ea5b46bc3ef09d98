use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    deck::{DeckSource, RandomDeck},
    outcome::Outcome,
    round::{Phase, Round, RoundError, DEALER_STANDS_ON},
};

fn default_stand_on() -> u32 {
    DEALER_STANDS_ON
}

fn default_progress_interval() -> u32 {
    10_000
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoplayInput {
    pub iterations: u32,
    pub seed: u64,
    /// Player hits while below this total.
    #[serde(default = "default_stand_on")]
    pub stand_on: u32,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoplayResult {
    pub total_rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub blackjacks: u32,
    pub win_rate: f64,
    pub outcomes: BTreeMap<Outcome, u32>,
}

impl AutoplayResult {
    fn record(&mut self, outcome: Outcome) {
        self.total_rounds += 1;
        *self.outcomes.entry(outcome).or_default() += 1;
        if outcome.is_draw() {
            self.draws += 1;
        } else if outcome.player_wins() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        if outcome == Outcome::PlayerBlackjackWin {
            self.blackjacks += 1;
        }
    }
}

pub fn run(input: AutoplayInput) -> Result<AutoplayResult, RoundError> {
    run_with_progress(input, |_current, _total| {})
}

pub fn run_with_progress<F>(input: AutoplayInput, mut progress_cb: F) -> Result<AutoplayResult, RoundError>
where
    F: FnMut(u32, u32),
{
    let mut round = Round::new(RandomDeck::new(input.seed));
    let mut result = AutoplayResult::default();
    let progress_interval = input.progress_interval.max(1);

    for game_index in 0..input.iterations {
        if let Some(outcome) = play_round(&mut round, input.stand_on)? {
            result.record(outcome);
        }

        let completed = game_index + 1;
        if completed % progress_interval == 0 || completed == input.iterations {
            progress_cb(completed, input.iterations);
        }
    }

    result.win_rate = if result.total_rounds > 0 {
        (result.wins as f64 / result.total_rounds as f64) * 100.0
    } else {
        0.0
    };
    log::info!(
        "autoplay finished {} rounds: {} wins, {} losses, {} draws",
        result.total_rounds,
        result.wins,
        result.losses,
        result.draws
    );
    Ok(result)
}

/// Plays one round with a fixed threshold policy for the player.
pub fn play_round<D: DeckSource>(round: &mut Round<D>, stand_on: u32) -> Result<Option<Outcome>, RoundError> {
    round.start_round()?;
    round.run_automatic()?;
    while round.phase() == Phase::PlayerTurn {
        if round.player_score().display_value() < stand_on {
            round.hit()?;
        } else {
            round.stand()?;
        }
        round.run_automatic()?;
    }
    Ok(round.outcome())
}
