use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Slot index is outside the deck")]
    InvalidSlot,
    #[error("Input is locked while a turn resolves")]
    InputLocked,
    #[error("Card is already face up")]
    AlreadyFlipped,
    #[error("Card face {0:?} does not appear exactly twice")]
    UnpairedFace(alloc::string::String),
}

pub type Result<T> = core::result::Result<T, GameError>;
