//! Ready-made variant factories over [`State`]: each struct here is a
//! namespace for a `create_state` constructor that wires up the streets,
//! hand types, and betting structure for one named poker variant.

use std::collections::BTreeMap;

use crate::error::PokerResult;
use crate::hands::HandType;
use crate::state::{Automation, BettingStructure, Mode, Opening, State, StateBuilder, Street};
use crate::utilities::Deck;

/// A helper type for raw values like antes, blinds, and stacks.
type RawValues = BTreeMap<usize, i64>;

pub struct FixedLimitTexasHoldem;

impl FixedLimitTexasHoldem {
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        raw_blinds_or_straddles: RawValues,
        small_bet: i64,
        big_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(false, vec![false; 2], 0, false, Opening::Position, small_bet, Some(4))?,
            Street::new(true, vec![], 3, false, Opening::Position, small_bet, Some(4))?,
            Street::new(true, vec![], 1, false, Opening::Position, big_bet, Some(4))?,
            Street::new(true, vec![], 1, false, Opening::Position, big_bet, Some(4))?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::standard())
            .hand_types(vec![HandType::StandardHighHand])
            .betting_structure(BettingStructure::FixedLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .raw_blinds_or_straddles(raw_blinds_or_straddles)
            .bring_in(0)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct NoLimitTexasHoldem;

impl NoLimitTexasHoldem {
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        raw_blinds_or_straddles: RawValues,
        min_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(false, vec![false; 2], 0, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 3, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 1, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 1, false, Opening::Position, min_bet, None)?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::standard())
            .hand_types(vec![HandType::StandardHighHand])
            .betting_structure(BettingStructure::NoLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .raw_blinds_or_straddles(raw_blinds_or_straddles)
            .bring_in(0)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct NoLimitShortDeckHoldem;

impl NoLimitShortDeckHoldem {
    /// Same shape as [`NoLimitTexasHoldem`] but dealt from the 36-card short
    /// deck, opened by the player left of the button rather than left of
    /// the blinds (no straddle swap), and scored with [`HandType::ShortDeckHoldemHand`]
    /// where a flush outranks a full house.
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        raw_blinds_or_straddles: RawValues,
        min_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(false, vec![false; 2], 0, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 3, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 1, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 1, false, Opening::Position, min_bet, None)?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::short_deck_holdem())
            .hand_types(vec![HandType::ShortDeckHoldemHand])
            .betting_structure(BettingStructure::NoLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .raw_blinds_or_straddles(raw_blinds_or_straddles)
            .bring_in(0)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct PotLimitOmahaHoldem;

impl PotLimitOmahaHoldem {
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        raw_blinds_or_straddles: RawValues,
        min_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(false, vec![false; 4], 0, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 3, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 1, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 1, false, Opening::Position, min_bet, None)?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::standard())
            .hand_types(vec![HandType::OmahaHoldemHand])
            .betting_structure(BettingStructure::PotLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .raw_blinds_or_straddles(raw_blinds_or_straddles)
            .bring_in(0)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct FixedLimitOmahaHoldemHighLowSplitEightOrBetter;

impl FixedLimitOmahaHoldemHighLowSplitEightOrBetter {
    /// Splits every pot between the best standard Omaha high hand and the
    /// best eight-or-better Omaha low hand, scooping if nobody qualifies low.
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        raw_blinds_or_straddles: RawValues,
        small_bet: i64,
        big_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(false, vec![false; 4], 0, false, Opening::Position, small_bet, Some(4))?,
            Street::new(true, vec![], 3, false, Opening::Position, small_bet, Some(4))?,
            Street::new(true, vec![], 1, false, Opening::Position, big_bet, Some(4))?,
            Street::new(true, vec![], 1, false, Opening::Position, big_bet, Some(4))?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::standard())
            .hand_types(vec![HandType::OmahaHoldemHand, HandType::OmahaEightOrBetterLowHand])
            .betting_structure(BettingStructure::FixedLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .raw_blinds_or_straddles(raw_blinds_or_straddles)
            .bring_in(0)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct FixedLimitSevenCardStud;

impl FixedLimitSevenCardStud {
    /// Two down cards and one up card bring the bring-in into play; three
    /// more up cards follow, each street opened by the best exposed hand;
    /// a seventh card comes down for the final round of betting.
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        bring_in: i64,
        small_bet: i64,
        big_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(true, vec![false, false, true], 0, false, Opening::LowCard, small_bet, Some(4))?,
            Street::new(true, vec![true], 0, false, Opening::HighHand, small_bet, Some(4))?,
            Street::new(true, vec![true], 0, false, Opening::HighHand, big_bet, Some(4))?,
            Street::new(true, vec![true], 0, false, Opening::HighHand, big_bet, Some(4))?,
            Street::new(true, vec![false], 0, false, Opening::HighHand, big_bet, Some(4))?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::standard())
            .hand_types(vec![HandType::StandardHighHand])
            .betting_structure(BettingStructure::FixedLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .bring_in(bring_in)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct FixedLimitSevenCardStudHighLowSplitEightOrBetter;

impl FixedLimitSevenCardStudHighLowSplitEightOrBetter {
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        bring_in: i64,
        small_bet: i64,
        big_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(true, vec![false, false, true], 0, false, Opening::LowCard, small_bet, Some(4))?,
            Street::new(true, vec![true], 0, false, Opening::HighHand, small_bet, Some(4))?,
            Street::new(true, vec![true], 0, false, Opening::HighHand, big_bet, Some(4))?,
            Street::new(true, vec![true], 0, false, Opening::HighHand, big_bet, Some(4))?,
            Street::new(true, vec![false], 0, false, Opening::HighHand, big_bet, Some(4))?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::standard())
            .hand_types(vec![HandType::StandardHighHand, HandType::EightOrBetterLowHand])
            .betting_structure(BettingStructure::FixedLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .bring_in(bring_in)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct FixedLimitRazz;

impl FixedLimitRazz {
    /// Ace-to-five lowball stud: the highest up card brings it in (nobody
    /// wants to advertise a bad low hand), and afterwards the best
    /// (lowest) exposed hand acts first, the opposite of high stud.
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        bring_in: i64,
        small_bet: i64,
        big_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(true, vec![false, false, true], 0, false, Opening::HighCard, small_bet, Some(4))?,
            Street::new(true, vec![true], 0, false, Opening::LowHand, small_bet, Some(4))?,
            Street::new(true, vec![true], 0, false, Opening::LowHand, big_bet, Some(4))?,
            Street::new(true, vec![true], 0, false, Opening::LowHand, big_bet, Some(4))?,
            Street::new(true, vec![false], 0, false, Opening::LowHand, big_bet, Some(4))?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::regular())
            .hand_types(vec![HandType::RegularLowHand])
            .betting_structure(BettingStructure::FixedLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .bring_in(bring_in)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct NoLimitDeuceToSevenLowballSingleDraw;

impl NoLimitDeuceToSevenLowballSingleDraw {
    /// Five cards dealt face down, one betting round, one chance to draw,
    /// then a final betting round. Aces play high and straights/flushes
    /// count against the hand, so [`HandType::StandardLowHand`] is used
    /// unmodified rather than a dedicated ace-low table.
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        raw_blinds_or_straddles: RawValues,
        min_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(false, vec![false; 5], 0, false, Opening::Position, min_bet, None)?,
            Street::new(true, vec![], 0, true, Opening::Position, min_bet, None)?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::standard())
            .hand_types(vec![HandType::StandardLowHand])
            .betting_structure(BettingStructure::NoLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .raw_blinds_or_straddles(raw_blinds_or_straddles)
            .bring_in(0)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct FixedLimitDeuceToSevenLowballTripleDraw;

impl FixedLimitDeuceToSevenLowballTripleDraw {
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        raw_blinds_or_straddles: RawValues,
        small_bet: i64,
        big_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(false, vec![false; 5], 0, false, Opening::Position, small_bet, Some(4))?,
            Street::new(true, vec![], 0, true, Opening::Position, small_bet, Some(4))?,
            Street::new(true, vec![], 0, true, Opening::Position, big_bet, Some(4))?,
            Street::new(true, vec![], 0, true, Opening::Position, big_bet, Some(4))?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::standard())
            .hand_types(vec![HandType::StandardLowHand])
            .betting_structure(BettingStructure::FixedLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .raw_blinds_or_straddles(raw_blinds_or_straddles)
            .bring_in(0)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct FixedLimitBadugi;

impl FixedLimitBadugi {
    /// Four down cards and the same triple-draw betting shape as
    /// [`FixedLimitDeuceToSevenLowballTripleDraw`], scored instead by
    /// [`HandType::BadugiHand`] (fewest cards, all different ranks and
    /// suits, wins).
    pub fn create_state(
        automations: &[Automation],
        ante_trimming_status: bool,
        raw_antes: RawValues,
        raw_blinds_or_straddles: RawValues,
        small_bet: i64,
        big_bet: i64,
        raw_starting_stacks: RawValues,
        player_count: usize,
        mode: Mode,
    ) -> PokerResult<State> {
        let streets = vec![
            Street::new(false, vec![false; 4], 0, false, Opening::Position, small_bet, Some(4))?,
            Street::new(true, vec![], 0, true, Opening::Position, small_bet, Some(4))?,
            Street::new(true, vec![], 0, true, Opening::Position, big_bet, Some(4))?,
            Street::new(true, vec![], 0, true, Opening::Position, big_bet, Some(4))?,
        ];

        StateBuilder::new(player_count)
            .automations(automations)
            .streets(streets)
            .deck(Deck::standard())
            .hand_types(vec![HandType::BadugiHand])
            .betting_structure(BettingStructure::FixedLimit)
            .ante_trimming_status(ante_trimming_status)
            .raw_antes(raw_antes)
            .raw_blinds_or_straddles(raw_blinds_or_straddles)
            .bring_in(0)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(mode)
            .build()
    }
}

pub struct KuhnPoker;

impl KuhnPoker {
    /// The three-card, two-player toy game: one down card each, an ante of
    /// one chip, a single betting round capped at one bet and one call (no
    /// raising), dealt from a three-card J/Q/K deck.
    pub fn create_state(automations: &[Automation], raw_starting_stacks: RawValues) -> PokerResult<State> {
        let streets = vec![Street::new(false, vec![false], 0, false, Opening::Position, 1, Some(1))?];

        let mut raw_antes = BTreeMap::new();
        raw_antes.insert(0, 1);
        raw_antes.insert(1, 1);

        StateBuilder::new(2)
            .automations(automations)
            .streets(streets)
            .deck(Deck::kuhn_poker())
            .hand_types(vec![HandType::KuhnPokerHand])
            .betting_structure(BettingStructure::FixedLimit)
            .ante_trimming_status(true)
            .raw_antes(raw_antes)
            .bring_in(0)
            .raw_starting_stacks(raw_starting_stacks)
            .mode(Mode::CashGame)
            .build()
    }
}
