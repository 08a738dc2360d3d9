use alloc::vec::Vec;

pub use draw::*;

mod draw;

pub trait DeckShuffler {
    /// Returns a reordered copy of `items`, leaving the input untouched.
    fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T>;
}
