use serde::Serialize;

use crate::hand::{Score, BLACKJACK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Draw,
    DealerBlackjackLoss,
    PlayerBlackjackWin,
    PlayerBust,
    DealerBust,
    PlayerHigher,
    DealerHigher,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Draw => "Draw 🙃",
            Outcome::DealerBlackjackLoss => "Lose, opponent has Blackjack 😱",
            Outcome::PlayerBlackjackWin => "Win with a Blackjack 😎",
            Outcome::PlayerBust => "You went over. You lose 😭",
            Outcome::DealerBust => "Opponent went over. You win 😁",
            Outcome::PlayerHigher => "You win 😃",
            Outcome::DealerHigher => "You lose 😤",
        }
    }

    pub fn player_wins(&self) -> bool {
        matches!(
            self,
            Outcome::PlayerBlackjackWin | Outcome::DealerBust | Outcome::PlayerHigher
        )
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

/// Settles a round. Equality is checked first so two naturals push.
pub fn resolve(player: Score, dealer: Score) -> Outcome {
    if player == dealer {
        return Outcome::Draw;
    }
    match (player, dealer) {
        (_, Score::Blackjack) => Outcome::DealerBlackjackLoss,
        (Score::Blackjack, _) => Outcome::PlayerBlackjackWin,
        (Score::Points(p), _) if p > BLACKJACK => Outcome::PlayerBust,
        (_, Score::Points(d)) if d > BLACKJACK => Outcome::DealerBust,
        (Score::Points(p), Score::Points(d)) if p > d => Outcome::PlayerHigher,
        _ => Outcome::DealerHigher,
    }
}
