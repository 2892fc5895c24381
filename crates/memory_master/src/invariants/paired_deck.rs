//! Paired deck invariant: every symbol appears exactly twice.

use super::Invariant;
use crate::{DECK_SIZE, Deck, GameStatus, MemoryGame, Symbol};
use std::collections::HashMap;

/// Invariant: a dealt deck holds `DECK_SIZE` cards with contiguous ids and
/// exactly two cards per symbol. Only an idle game has no deck.
pub struct PairedDeckInvariant;

impl PairedDeckInvariant {
    /// Checks a deck on its own.
    pub fn deck_holds(deck: &Deck) -> bool {
        if deck.len() != DECK_SIZE {
            return false;
        }
        let ids_contiguous = deck
            .cards()
            .iter()
            .enumerate()
            .all(|(index, card)| card.id().index() == index);
        let mut counts: HashMap<Symbol, usize> = HashMap::new();
        for card in deck.cards() {
            *counts.entry(card.symbol()).or_default() += 1;
        }
        ids_contiguous && counts.values().all(|count| *count == 2)
    }
}

impl Invariant<MemoryGame> for PairedDeckInvariant {
    fn holds(game: &MemoryGame) -> bool {
        match game.deck() {
            Some(deck) => Self::deck_holds(deck),
            None => game.status() == GameStatus::Idle,
        }
    }

    fn description() -> &'static str {
        "Deck holds every symbol exactly twice with contiguous ids"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck_rng;

    #[test]
    fn test_generated_deck_holds() {
        let deck = Deck::generate(&mut deck_rng(Some(5)));
        assert!(PairedDeckInvariant::deck_holds(&deck));
    }

    #[test]
    fn test_triplicate_symbol_violates() {
        let mut symbols: Vec<Symbol> = Deck::generate(&mut deck_rng(Some(5)))
            .cards()
            .iter()
            .map(|card| card.symbol())
            .collect();
        let first = symbols[0];
        let victim = symbols.iter().position(|s| *s != first).unwrap();
        symbols[victim] = first;
        assert!(!PairedDeckInvariant::deck_holds(&Deck::from_symbols(symbols)));
    }

    #[test]
    fn test_short_deck_violates() {
        let deck = Deck::from_symbols([Symbol::Lion, Symbol::Lion]);
        assert!(!PairedDeckInvariant::deck_holds(&deck));
    }
}
