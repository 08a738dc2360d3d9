#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use controller::*;
pub use error::*;
pub use host::*;
pub use shuffler::*;

mod card;
mod controller;
mod error;
mod host;
mod shuffler;

/// Position of a card in the grid.
pub type SlotIndex = usize;

/// Number of remove-and-append draws performed per shuffle.
pub const DEFAULT_DRAW_ROUNDS: u16 = 100;

/// Pause between flipping the second card and resolving the turn.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Pause between finding the last pair and restarting the game.
pub const DEFAULT_WIN_DELAY: Duration = Duration::from_millis(1000);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub reveal_delay: Duration,
    pub win_delay: Duration,
    pub draw_rounds: u16,
}

impl GameConfig {
    pub const fn new(reveal_delay: Duration, win_delay: Duration, draw_rounds: u16) -> Self {
        Self {
            reveal_delay,
            win_delay,
            draw_rounds,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_DELAY, DEFAULT_WIN_DELAY, DEFAULT_DRAW_ROUNDS)
    }
}

/// Visible state of a single slot, derived from the game state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Hidden,
    Revealed,
    Matched,
}

impl SlotStatus {
    pub const fn shows_face(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

impl Default for SlotStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    Ignored,
    /// First card of a turn is now face up.
    FirstFlipped,
    /// Second card is face up, input is locked until the turn resolves.
    SecondFlipped,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            Ignored => false,
            FirstFlipped => true,
            SecondFlipped => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DeferredOutcome {
    /// Task belonged to a previous game and was dropped.
    Stale,
    Mismatch,
    Matched,
    /// Last pair found, restart is scheduled.
    Completed,
    Restarted,
}

impl DeferredOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stale)
    }
}
