use std::collections::VecDeque;

use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Point value of a single card. Suits are not tracked here.
pub type Rank = u8;

pub const ACE: Rank = 11;

/// One entry per card rank: Ace, 2-9, then 10/J/Q/K collapsed to 10.
pub const RANK_VALUES: [Rank; 13] = [ACE, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

/// Anything that can hand out ranks for a round.
///
/// Draws are independent: there is no shoe, so a source never runs dry.
pub trait DeckSource {
    fn draw(&mut self) -> Rank;
}

impl<D: DeckSource + ?Sized> DeckSource for Box<D> {
    fn draw(&mut self) -> Rank {
        (**self).draw()
    }
}

pub struct RandomDeck {
    rng: SmallRng,
}

impl RandomDeck {
    pub fn new(seed: u64) -> Self {
        RandomDeck {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        RandomDeck {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl DeckSource for RandomDeck {
    fn draw(&mut self) -> Rank {
        RANK_VALUES[self.rng.gen_range(0..RANK_VALUES.len())]
    }
}

/// Replays a fixed list of ranks, then falls back to a seeded random deck.
pub struct ScriptedDeck {
    script: VecDeque<Rank>,
    fallback: RandomDeck,
}

impl ScriptedDeck {
    pub fn new<I>(ranks: I) -> Self
    where
        I: IntoIterator<Item = Rank>,
    {
        ScriptedDeck {
            script: ranks.into_iter().collect(),
            fallback: RandomDeck::new(0),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DeckSource for ScriptedDeck {
    fn draw(&mut self) -> Rank {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.draw())
    }
}
