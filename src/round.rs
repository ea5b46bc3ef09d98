use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::{
    deck::{DeckSource, Rank},
    hand::{score, Hand, Score},
    outcome::{resolve, Outcome},
    snapshot::{CardView, Snapshot},
};

/// Dealer keeps drawing while below this total.
pub const DEALER_STANDS_ON: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Idle,
    Dealing,
    PlayerTurn,
    DealerTurn,
    Resolved,
}

impl Phase {
    /// Phases that progress without player input.
    pub fn is_automatic(&self) -> bool {
        matches!(self, Phase::Dealing | Phase::DealerTurn)
    }

    /// Whether the dealer's second card is still face down.
    pub fn conceals_hole_card(&self) -> bool {
        matches!(self, Phase::Dealing | Phase::PlayerTurn)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Dealing => "dealing",
            Phase::PlayerTurn => "player turn",
            Phase::DealerTurn => "dealer turn",
            Phase::Resolved => "resolved",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Dealer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartRound,
    Hit,
    Stand,
    Advance,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::StartRound => "start a round",
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::Advance => "advance",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("cannot {action} during {phase}")]
    InvalidTransition { action: Action, phase: Phase },
}

/// Player, dealer up card, player, dealer hole card.
const DEAL_ORDER: [Side; 4] = [Side::Player, Side::Dealer, Side::Player, Side::Dealer];

/// Index of the dealer card that stays face down until the reveal.
pub const HOLE_CARD_INDEX: usize = 1;

/// One table's worth of state. Each command runs to completion and leaves the
/// round either waiting for input or ready for the next automatic step.
pub struct Round<D> {
    deck: D,
    player: Hand,
    dealer: Hand,
    phase: Phase,
    generation: u32,
    outcome: Option<Outcome>,
}

impl<D: DeckSource> Round<D> {
    pub fn new(deck: D) -> Self {
        Round {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            phase: Phase::Idle,
            generation: 0,
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Bumped every time the table is cleared. Continuations scheduled for an
    /// older generation are ignored by `advance_if_current`.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_score(&self) -> Score {
        self.player.score()
    }

    pub fn dealer_score(&self) -> Score {
        self.dealer.score()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True while the dealer policy would take another card.
    pub fn dealer_must_hit(&self) -> bool {
        match self.dealer.score() {
            Score::Blackjack => false,
            Score::Points(total) => total < DEALER_STANDS_ON,
        }
    }

    pub fn start_round(&mut self) -> Result<Snapshot, RoundError> {
        self.require(Action::StartRound, &[Phase::Idle, Phase::Resolved])?;
        self.clear_table();
        self.phase = Phase::Dealing;
        log::info!("round {} started", self.generation);
        Ok(self.snapshot())
    }

    /// Back to the idle table from any phase.
    pub fn reset(&mut self) -> Snapshot {
        if self.phase != Phase::Idle {
            log::debug!("round {} abandoned during {}", self.generation, self.phase);
        }
        self.clear_table();
        self.snapshot()
    }

    pub fn hit(&mut self) -> Result<Snapshot, RoundError> {
        self.require(Action::Hit, &[Phase::PlayerTurn])?;
        let rank = self.deck.draw();
        self.player.push(rank);
        let total = self.player.score();
        log::debug!("player hits {rank}, now {total:?}");

        if total.is_bust() || total.is_blackjack() {
            self.settle();
        }
        Ok(self.snapshot())
    }

    pub fn stand(&mut self) -> Result<Snapshot, RoundError> {
        self.require(Action::Stand, &[Phase::PlayerTurn])?;
        log::debug!("player stands on {:?}", self.player.score());
        self.phase = Phase::DealerTurn;
        Ok(self.snapshot())
    }

    /// Performs the next automatic step: one card of the deal, or one dealer
    /// decision. Presentation calls this once per animation tick.
    pub fn advance(&mut self) -> Result<Snapshot, RoundError> {
        match self.phase {
            Phase::Dealing => self.deal_next(),
            Phase::DealerTurn => self.dealer_step(),
            phase => {
                return Err(RoundError::InvalidTransition {
                    action: Action::Advance,
                    phase,
                })
            }
        }
        Ok(self.snapshot())
    }

    /// Like `advance`, but a continuation scheduled for an earlier round is
    /// dropped and yields `None`.
    pub fn advance_if_current(&mut self, generation: u32) -> Result<Option<Snapshot>, RoundError> {
        if generation != self.generation {
            log::debug!(
                "ignoring stale continuation for round {generation}, current is {}",
                self.generation
            );
            return Ok(None);
        }
        self.advance().map(Some)
    }

    /// Runs automatic steps until the round waits for the player or is over.
    pub fn run_automatic(&mut self) -> Result<Snapshot, RoundError> {
        while self.phase.is_automatic() {
            self.advance()?;
        }
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot {
        let concealed = self.phase.conceals_hole_card();
        let player_cards = self
            .player
            .ranks()
            .iter()
            .map(|&rank| CardView::new(rank, false))
            .collect();
        let dealer_cards = self
            .dealer
            .ranks()
            .iter()
            .enumerate()
            .map(|(index, &rank)| CardView::new(rank, concealed && index == HOLE_CARD_INDEX))
            .collect();

        let dealer_visible = if concealed {
            &self.dealer.ranks()[..self.dealer.len().min(HOLE_CARD_INDEX)]
        } else {
            self.dealer.ranks()
        };

        Snapshot {
            phase: self.phase,
            generation: self.generation,
            player_cards,
            dealer_cards,
            player_score: display_score(self.player.ranks()),
            dealer_score: display_score(dealer_visible),
            dealer_must_hit: self.phase == Phase::DealerTurn && self.dealer_must_hit(),
            outcome: self.outcome,
            message: self.outcome.map(|outcome| outcome.message()),
        }
    }

    fn require(&self, action: Action, allowed: &[Phase]) -> Result<(), RoundError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(RoundError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    fn clear_table(&mut self) {
        self.player.clear();
        self.dealer.clear();
        self.outcome = None;
        self.phase = Phase::Idle;
        self.generation = self.generation.wrapping_add(1);
    }

    fn deal_next(&mut self) {
        let dealt = self.player.len() + self.dealer.len();
        let Some(&side) = DEAL_ORDER.get(dealt) else {
            self.after_deal();
            return;
        };
        let rank = self.deck.draw();
        match side {
            Side::Player => self.player.push(rank),
            Side::Dealer => self.dealer.push(rank),
        }
        if dealt + 1 == DEAL_ORDER.len() {
            self.after_deal();
        }
    }

    fn after_deal(&mut self) {
        let player = self.player.score();
        let dealer = self.dealer.score();
        if player.is_blackjack() || dealer.is_blackjack() || player.is_bust() {
            log::debug!("round {} ends on the deal", self.generation);
            self.settle();
        } else {
            self.phase = Phase::PlayerTurn;
        }
    }

    fn dealer_step(&mut self) {
        if self.dealer_must_hit() {
            let rank = self.deck.draw();
            self.dealer.push(rank);
            log::debug!("dealer hits {rank}, now {:?}", self.dealer.score());
        } else {
            log::debug!("dealer stands on {:?}", self.dealer.score());
            self.settle();
        }
    }

    fn settle(&mut self) {
        let outcome = resolve(self.player.score(), self.dealer.score());
        self.outcome = Some(outcome);
        self.phase = Phase::Resolved;
        log::info!("round {} resolved: {outcome:?}", self.generation);
    }
}

fn display_score(ranks: &[Rank]) -> Option<u32> {
    if ranks.is_empty() {
        None
    } else {
        Some(score(ranks).display_value())
    }
}
