//! The fixed card alphabet.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

/// Face value printed on a card.
///
/// Every deck holds exactly two cards per symbol.
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
    EnumIter,
    EnumCount,
)]
pub enum Symbol {
    /// 🦁
    Lion,
    /// 🐯
    Tiger,
    /// 🐻
    Bear,
    /// 🐨
    Koala,
    /// 🐼
    Panda,
    /// 🐸
    Frog,
    /// 🐙
    Octopus,
    /// 🦄
    Unicorn,
}

impl Symbol {
    /// Returns the emoji rendered on the card face.
    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Lion => "🦁",
            Symbol::Tiger => "🐯",
            Symbol::Bear => "🐻",
            Symbol::Koala => "🐨",
            Symbol::Panda => "🐼",
            Symbol::Frog => "🐸",
            Symbol::Octopus => "🐙",
            Symbol::Unicorn => "🦄",
        }
    }
}

/// Number of distinct symbols, and therefore pairs, in a deck.
pub const PAIR_COUNT: usize = Symbol::COUNT;
