use crate::deck::{Rank, ACE};

pub const BLACKJACK: u32 = 21;

/// Result of scoring a hand.
///
/// A natural (21 on exactly two cards) is kept apart from a drawn-out 21 so
/// it can outrank it when the round is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Blackjack,
    Points(u32),
}

impl Score {
    pub fn is_blackjack(&self) -> bool {
        matches!(self, Score::Blackjack)
    }

    pub fn is_bust(&self) -> bool {
        matches!(self, Score::Points(total) if *total > BLACKJACK)
    }

    /// Value shown to the player: a natural reads as 21.
    pub fn display_value(&self) -> u32 {
        match self {
            Score::Blackjack => BLACKJACK,
            Score::Points(total) => *total,
        }
    }

    /// Legacy wire encoding where a natural is carried as 0.
    pub fn raw(&self) -> u32 {
        match self {
            Score::Blackjack => 0,
            Score::Points(total) => *total,
        }
    }
}

pub fn score(ranks: &[Rank]) -> Score {
    let mut total: u32 = ranks.iter().map(|&rank| u32::from(rank)).sum();
    if ranks.len() == 2 && total == BLACKJACK {
        return Score::Blackjack;
    }

    let mut high_aces = ranks.iter().filter(|&&rank| rank == ACE).count();
    while total > BLACKJACK && high_aces > 0 {
        total -= 10; // Ace drops from 11 to 1
        high_aces -= 1;
    }

    Score::Points(total)
}

/// Cards held by one side. Only ever grows until the next round clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    ranks: Vec<Rank>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rank: Rank) {
        self.ranks.push(rank);
    }

    pub fn clear(&mut self) {
        self.ranks.clear();
    }

    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn score(&self) -> Score {
        score(&self.ranks)
    }
}
