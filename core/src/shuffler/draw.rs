use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;
use crate::DEFAULT_DRAW_ROUNDS;

/// Shuffle that repeatedly draws a random card and moves it to the bottom of the deck.
///
/// The number of draws does not depend on the deck size, so the result is not a uniform
/// permutation: cards that are never drawn keep their relative order at the front. With the
/// twelve card deck the hundred default draws mix well enough in practice.
#[derive(Clone, Debug)]
pub struct DrawShuffler {
    rng: SmallRng,
    rounds: u16,
}

impl DrawShuffler {
    pub fn new(seed: u64) -> Self {
        Self::with_rounds(seed, DEFAULT_DRAW_ROUNDS)
    }

    pub fn with_rounds(seed: u64, rounds: u16) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            rounds,
        }
    }
}

impl DeckShuffler for DrawShuffler {
    fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut result = items.to_vec();
        if result.is_empty() {
            return result;
        }

        for _ in 0..self.rounds {
            let drawn = result.remove(self.rng.random_range(0..result.len()));
            result.push(drawn);
        }

        result
    }
}
