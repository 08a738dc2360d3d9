use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Source of the distinct faces used to build a deck.
pub trait CardCatalog {
    fn distinct_faces(&self) -> Vec<CardFace>;
}

impl CardCatalog for Vec<CardFace> {
    fn distinct_faces(&self) -> Vec<CardFace> {
        self.clone()
    }
}

/// Grid surface the game draws on.
pub trait SlotRegistry {
    fn slot_count(&self) -> usize;

    /// Attaches the click handler of `index`: the host must forward every click on that slot to
    /// [`GameController::on_slot_clicked`]. Binding an already bound slot replaces its handler.
    fn bind_click(&mut self, index: SlotIndex);

    /// `face` is `None` only for slots that have no card in the current deck.
    fn render_slot(&mut self, index: SlotIndex, status: SlotStatus, face: Option<&CardFace>);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    TurnWon,
    GameComplete,
}

impl Notice {
    pub const fn message(self) -> &'static str {
        match self {
            Self::TurnWon => "Well played!",
            Self::GameComplete => "Bravo! All pairs found!",
        }
    }
}

pub trait Notifier {
    /// Must reach the player before the game carries on.
    fn notify(&mut self, notice: Notice);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    Resolve {
        first: SlotIndex,
        second: SlotIndex,
    },
    Restart,
}

/// One-shot work scheduled by the controller, tagged with the game it belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredTask {
    pub epoch: u64,
    pub action: DeferredAction,
}

pub trait Scheduler {
    /// Hands `task` back through [`GameController::run_deferred`] once `delay` has passed.
    fn schedule(&mut self, delay: Duration, task: DeferredTask);
}

/// Everything the controller talks to besides its own state.
#[derive(Clone, Debug, Default)]
pub struct Collaborators<C, R, N, S> {
    pub catalog: C,
    pub registry: R,
    pub notifier: N,
    pub scheduler: S,
}
