use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Opaque identifier shared by the two cards of a pair, typically an asset reference.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardFace(String);

impl CardFace {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardFace {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardFace {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arrangement of card faces over the slots, every face present exactly twice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    faces: Vec<CardFace>,
}

impl Deck {
    /// Doubles the distinct faces into pairs, in catalog order followed by the copies.
    ///
    /// Repeated faces are dropped so that the pairing invariant survives a misconfigured catalog.
    pub fn pair_up(distinct: &[CardFace]) -> Self {
        let mut faces: Vec<CardFace> = Vec::with_capacity(distinct.len() * 2);
        for face in distinct {
            if faces.contains(face) {
                log::warn!("Card face {} listed more than once, ignoring the repeat", face);
                continue;
            }
            faces.push(face.clone());
        }
        faces.extend_from_within(..);
        Self { faces }
    }

    /// Takes an explicit arrangement, rejecting any face that is not part of exactly one pair.
    pub fn from_faces(faces: Vec<CardFace>) -> Result<Self> {
        let mut counts: BTreeMap<&CardFace, usize> = BTreeMap::new();
        for face in &faces {
            *counts.entry(face).or_default() += 1;
        }

        if let Some((face, _)) = counts.iter().find(|&(_, &count)| count != 2) {
            return Err(GameError::UnpairedFace(face.as_str().into()));
        }

        Ok(Self { faces })
    }

    pub fn shuffled<S: DeckShuffler>(&self, shuffler: &mut S) -> Self {
        Self {
            faces: shuffler.shuffle(&self.faces),
        }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.faces.len() / 2
    }

    pub fn get(&self, index: SlotIndex) -> Option<&CardFace> {
        self.faces.get(index)
    }

    pub fn validate_index(&self, index: SlotIndex) -> Result<SlotIndex> {
        if index < self.faces.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidSlot)
        }
    }

    pub fn is_pair(&self, first: SlotIndex, second: SlotIndex) -> bool {
        first != second
            && matches!((self.get(first), self.get(second)), (Some(a), Some(b)) if a == b)
    }

    pub fn faces(&self) -> &[CardFace] {
        &self.faces
    }
}
