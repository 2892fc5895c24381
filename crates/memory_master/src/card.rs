//! Cards and their faces.

use crate::Symbol;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Stable identifier of a card within one deck.
///
/// Ids are the card's position at deal time (0..16) and never change for the
/// lifetime of the deck.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
)]
#[display("#{_0}")]
#[serde(transparent)]
pub struct CardId(u8);

impl CardId {
    /// Creates a card id.
    pub fn new(id: u8) -> Self {
        Self(id)
    }

    /// Returns the id as a deck index.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Returns the raw id.
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Which side of a card is showing.
///
/// `Matched` cards stay face up, so a matched card can never be turned
/// back down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum CardFace {
    /// Face down, unmatched.
    #[default]
    Down,
    /// Face up, waiting for its turn to resolve (or revealed by a preview).
    Up,
    /// Paired. Terminal for the rest of the game.
    Matched,
}

/// A single card on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol: Symbol,
    face: CardFace,
}

impl Card {
    /// Creates a face-down card.
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            face: CardFace::Down,
        }
    }

    /// Returns the card id.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Returns the symbol on the card face.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Returns the current face.
    pub fn face(&self) -> CardFace {
        self.face
    }

    /// True when the face is showing (including matched cards).
    pub fn is_flipped(&self) -> bool {
        matches!(self.face, CardFace::Up | CardFace::Matched)
    }

    /// True once the card has been paired.
    pub fn is_matched(&self) -> bool {
        self.face == CardFace::Matched
    }

    /// Turns a face-down card up. Returns false if it wasn't face down.
    pub(crate) fn turn_up(&mut self) -> bool {
        if self.face == CardFace::Down {
            self.face = CardFace::Up;
            true
        } else {
            false
        }
    }

    /// Turns a face-up card down. Matched cards are left alone.
    pub(crate) fn turn_down(&mut self) -> bool {
        if self.face == CardFace::Up {
            self.face = CardFace::Down;
            true
        } else {
            false
        }
    }

    /// Marks the card matched.
    pub(crate) fn mark_matched(&mut self) -> bool {
        if self.face == CardFace::Matched {
            false
        } else {
            self.face = CardFace::Matched;
            true
        }
    }
}
