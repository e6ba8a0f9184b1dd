//! `pokerkit` drives a single poker hand, street by street, through a
//! deterministic state machine, and evaluates hands at showdown.
//!
//! The crate is organized the way the game itself is: primitives
//! ([`utilities`]), hand-strength lookup tables ([`lookups`]), hand
//! evaluators built on top of those tables ([`hands`]), the state machine
//! that drives a hand from antes to chip-pulling ([`state`]), and a set of
//! ready-made variant factories over that state machine ([`games`]).

pub mod error;
pub mod utilities;
pub mod lookups;
pub mod hands;
pub mod state;
pub mod games;

pub use error::{PokerError, PokerResult};
