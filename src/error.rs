//! The error type returned by fallible operations throughout the crate.

use thiserror::Error;

/// Errors raised while configuring or driving a hand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PokerError {
    /// A `StateBuilder` was given parameters that cannot describe a legal
    /// hand (e.g. no streets, a non-positive stack, a street with neither
    /// dealing nor drawing).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An action was attempted out of turn, against the wrong phase, or
    /// with an amount outside the legal range for the current actor.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// A card was unavailable (already dealt, burned, or mucked) or
    /// otherwise could not be resolved against the deck.
    #[error("invalid card: {0}")]
    InvalidCard(String),

    /// A hand could not be formed from the cards offered to an evaluator.
    #[error("invalid hand: {0}")]
    InvalidHand(String),
}

impl From<String> for PokerError {
    fn from(message: String) -> Self {
        PokerError::InvalidHand(message)
    }
}

pub type PokerResult<T> = Result<T, PokerError>;
