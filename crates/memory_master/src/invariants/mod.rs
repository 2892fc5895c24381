//! First-class invariants for a memory game.
//!
//! Invariants are logical properties that must hold after every
//! transition. They are checked in debug builds and can be tested
//! independently.
//!
//! Each invariant here looks at a single state. "Matched cards never
//! change" compares two states, so it lives with the transition contracts
//! in [`crate::contracts::MatchedCardsStable`].

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so sets compose without boxing.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

pub mod paired_deck;
pub mod selections_face_up;
pub mod win_consistent;

pub use paired_deck::PairedDeckInvariant;
pub use selections_face_up::SelectionsFaceUpInvariant;
pub use win_consistent::WinConsistentInvariant;

/// All memory game invariants as a composable set.
pub type MemoryInvariants = (
    PairedDeckInvariant,
    SelectionsFaceUpInvariant,
    WinConsistentInvariant,
);
