//! Deck generation.
//!
//! A deck is the symbol alphabet concatenated with itself, shuffled with
//! Fisher-Yates, and dealt face down with sequential ids.

use crate::{Card, CardId, PAIR_COUNT, Symbol};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Number of cards in a deck (4x4 grid).
pub const DECK_SIZE: usize = PAIR_COUNT * 2;

/// Random source used for shuffling.
pub type DeckRng = Pcg64;

/// Builds the shuffling RNG.
///
/// With a seed the sequence of decks is reproducible across runs; without
/// one the generator is seeded from OS entropy.
pub fn deck_rng(seed: Option<u64>) -> DeckRng {
    match seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_entropy(),
    }
}

/// Uniform in-place Fisher-Yates shuffle.
///
/// Walks from the last index down to 1, swapping each position with a
/// uniformly chosen index in `0..=i`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Ordered cards on the table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Generates a freshly shuffled deck of `DECK_SIZE` face-down cards.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut symbols: Vec<Symbol> = Symbol::iter().chain(Symbol::iter()).collect();
        shuffle(&mut symbols, rng);
        let deck = Self::from_symbols(symbols);
        debug!(cards = deck.len(), "Generated deck");
        deck
    }

    /// Deals cards in the given order, assigning ids 0, 1, 2, ...
    ///
    /// Ids are a `u8`, so symbols past the 256th are not dealt.
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let cards = (0..=u8::MAX)
            .zip(symbols)
            .map(|(index, symbol)| Card::new(CardId::new(index), symbol))
            .collect();
        Self { cards }
    }

    /// Returns all cards in table order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for the placeholder deck of an idle game.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Looks a card up by id.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index()).filter(|card| card.id() == id)
    }

    /// Ids of every card carrying `symbol`.
    pub fn positions_of(&self, symbol: Symbol) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|card| card.symbol() == symbol)
            .map(Card::id)
            .collect()
    }

    /// Number of matched cards.
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched()).count()
    }

    /// True iff the deck is non-empty and every card is matched.
    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(Card::is_matched)
    }

    /// Turns one card face up.
    pub(crate) fn turn_up(&mut self, id: CardId) -> bool {
        self.card_mut(id).is_some_and(Card::turn_up)
    }

    /// Turns exactly the given cards face down, by id.
    pub(crate) fn turn_down(&mut self, ids: &[CardId]) {
        for id in ids {
            if let Some(card) = self.card_mut(*id) {
                card.turn_down();
            }
        }
    }

    /// Marks every card carrying `symbol` as matched. Returns how many changed.
    pub(crate) fn mark_matched(&mut self, symbol: Symbol) -> usize {
        self.cards
            .iter_mut()
            .filter(|card| card.symbol() == symbol)
            .map(Card::mark_matched)
            .filter(|changed| *changed)
            .count()
    }

    /// Turns every unmatched card face up.
    pub(crate) fn reveal_all(&mut self) {
        self.cards.iter_mut().for_each(|card| {
            card.turn_up();
        });
    }

    /// Turns every unmatched card face down.
    pub(crate) fn hide_all(&mut self) {
        self.cards.iter_mut().for_each(|card| {
            card.turn_down();
        });
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index()).filter(|card| card.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = deck_rng(Some(11));
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = deck_rng(Some(1));
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut one = [9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [9]);
    }

    #[test]
    fn test_seeded_decks_are_reproducible() {
        let a = Deck::generate(&mut deck_rng(Some(42)));
        let b = Deck::generate(&mut deck_rng(Some(42)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mark_matched_hits_every_copy() {
        let mut deck = Deck::from_symbols([Symbol::Lion, Symbol::Bear, Symbol::Lion, Symbol::Bear]);
        deck.turn_up(CardId::new(0));
        assert_eq!(deck.mark_matched(Symbol::Lion), 2);
        assert_eq!(deck.mark_matched(Symbol::Lion), 0);
        assert_eq!(deck.matched_count(), 2);
        assert!(!deck.all_matched());
    }

    #[test]
    fn test_turn_down_leaves_other_cards() {
        let mut deck = Deck::from_symbols([Symbol::Lion, Symbol::Bear, Symbol::Lion, Symbol::Bear]);
        deck.reveal_all();
        deck.turn_down(&[CardId::new(0), CardId::new(1)]);
        assert!(!deck.cards()[0].is_flipped());
        assert!(!deck.cards()[1].is_flipped());
        assert!(deck.cards()[2].is_flipped());
        assert!(deck.cards()[3].is_flipped());
    }

    #[test]
    fn test_empty_deck_is_never_all_matched() {
        assert!(!Deck::default().all_matched());
    }

    #[test]
    fn test_get_rejects_out_of_range_ids() {
        let deck = Deck::from_symbols([Symbol::Lion, Symbol::Lion]);
        assert!(deck.get(CardId::new(1)).is_some());
        assert!(deck.get(CardId::new(2)).is_none());
    }

    #[test]
    fn test_ids_stop_at_the_u8_limit() {
        let deck = Deck::from_symbols(std::iter::repeat_n(Symbol::Frog, 300));
        assert_eq!(deck.len(), 256);
        let last = CardId::new(u8::MAX);
        assert_eq!(deck.get(last).map(Card::id), Some(last));
    }
}
