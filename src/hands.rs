//! Implements structs and traits related to poker hands.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::lookups::{
    Entry, Lookup, BADUGI_LOOKUP, EIGHT_OR_BETTER_LOOKUP, KUHN_POKER_LOOKUP, REGULAR_LOW_LOOKUP,
    SHORT_DECK_HOLDEM_LOOKUP, STANDARD_LOOKUP,
};
use crate::utilities::{Card, Rank, RankOrder};

/// A trait representing a poker hand. Stronger hands are greater than
/// weaker ones (comparison direction depends on `LOW`).
pub trait Hand: Sized + Clone + Eq + Hash + Ord + Display + Debug {
    /// `true` if a lower entry index is better, `false` otherwise.
    const LOW: bool;
    /// The number of cards that make up this type of hand, if fixed.
    const CARD_COUNT: Option<usize>;

    fn cards(&self) -> &[Card];
    fn entry(&self) -> Entry;

    fn new(cards: Vec<Card>, lookup: &dyn Lookup) -> Result<Self, String>;

    /// Determines the best possible hand from a set of hole and board cards.
    fn from_game(hole_cards: &[Card], board_cards: &[Card]) -> Result<Self, String>;
}

/// A hand produced through `HandType::from_game`, type-erased over the
/// concrete evaluator that built it. Two `EvaluatedHand`s only compare
/// meaningfully when produced by the same `HandType`; the state machine
/// never compares across hand types directly (each hand type owns its own
/// pot split, per §4.4 chips-pushing).
#[derive(Clone, Debug)]
pub struct EvaluatedHand {
    cards: Vec<Card>,
    entry: Entry,
    low: bool,
}

impl EvaluatedHand {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn entry(&self) -> Entry {
        self.entry
    }

    fn of<H: Hand>(hand: H) -> Self {
        Self {
            cards: hand.cards().to_vec(),
            entry: hand.entry(),
            low: H::LOW,
        }
    }
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.entry == other.entry
    }
}

impl Eq for EvaluatedHand {}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.low {
            other.entry.cmp(&self.entry)
        } else {
            self.entry.cmp(&other.entry)
        }
    }
}

impl Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards_str = self.cards.iter().map(|c| c.to_string()).collect::<String>();
        write!(f, "{} ({})", self.entry.label, cards_str)
    }
}

/// A factory enum identifying which evaluator composition rule and lookup
/// table to use for a variant's showdown comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandType {
    StandardHighHand,
    StandardLowHand,
    ShortDeckHoldemHand,
    EightOrBetterLowHand,
    RegularLowHand,
    OmahaHoldemHand,
    OmahaEightOrBetterLowHand,
    GreekHoldemHand,
    BadugiHand,
    KuhnPokerHand,
}

impl HandType {
    /// `true` for evaluators where a lower entry index wins.
    pub fn low(&self) -> bool {
        matches!(
            self,
            HandType::StandardLowHand
                | HandType::EightOrBetterLowHand
                | HandType::RegularLowHand
                | HandType::OmahaEightOrBetterLowHand
                | HandType::BadugiHand
        )
    }

    /// Creates the best possible hand of the corresponding type from game
    /// cards, or `Err` if no legal combination exists under this evaluator.
    pub fn from_game(&self, hole_cards: &[Card], board_cards: &[Card]) -> Result<EvaluatedHand, String> {
        match self {
            HandType::StandardHighHand => {
                StandardHighHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of)
            }
            HandType::StandardLowHand => {
                StandardLowHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of)
            }
            HandType::ShortDeckHoldemHand => {
                ShortDeckHoldemHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of)
            }
            HandType::EightOrBetterLowHand => {
                EightOrBetterLowHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of)
            }
            HandType::RegularLowHand => {
                RegularLowHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of)
            }
            HandType::OmahaHoldemHand => {
                OmahaHoldemHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of)
            }
            HandType::OmahaEightOrBetterLowHand => {
                OmahaEightOrBetterLowHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of)
            }
            HandType::GreekHoldemHand => {
                GreekHoldemHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of)
            }
            HandType::BadugiHand => BadugiHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of),
            HandType::KuhnPokerHand => {
                KuhnPokerHand::from_game(hole_cards, board_cards).map(EvaluatedHand::of)
            }
        }
    }
}

/// Implements common traits (`PartialEq`, `Ord`, `Hash`, `Display`, `Debug`) for a hand struct.
macro_rules! impl_hand_boilerplate {
    ($hand_type:ident) => {
        impl PartialEq for $hand_type {
            fn eq(&self, other: &Self) -> bool {
                self.entry() == other.entry()
            }
        }
        impl Eq for $hand_type {}

        impl PartialOrd for $hand_type {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $hand_type {
            fn cmp(&self, other: &Self) -> Ordering {
                if <Self as Hand>::LOW {
                    other.entry().cmp(&self.entry())
                } else {
                    self.entry().cmp(&other.entry())
                }
            }
        }

        impl Hash for $hand_type {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.entry().hash(state);
            }
        }

        impl Display for $hand_type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let cards_str = self.cards().iter().map(|c| c.to_string()).collect::<String>();
                write!(f, "{} ({})", self.entry().label, cards_str)
            }
        }

        impl Debug for $hand_type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let cards_str = self.cards().iter().map(|c| c.to_string()).collect::<String>();
                write!(f, "{}", cards_str)
            }
        }
    };
}

/// Hands made from the best 5-card combination drawn from hole ∪ board.
macro_rules! impl_combination_hand {
    ($hand_type:ident, $is_low:expr, $num_cards:expr, $lookup:expr, $hand_name:expr) => {
        #[derive(Clone)]
        pub struct $hand_type {
            cards: Vec<Card>,
            entry: Entry,
        }
        impl_hand_boilerplate!($hand_type);

        impl Hand for $hand_type {
            const LOW: bool = $is_low;
            const CARD_COUNT: Option<usize> = Some($num_cards);

            fn cards(&self) -> &[Card] {
                &self.cards
            }
            fn entry(&self) -> Entry {
                self.entry
            }

            fn new(cards: Vec<Card>, lookup: &dyn Lookup) -> Result<Self, String> {
                if cards.len() != Self::CARD_COUNT.unwrap() {
                    return Err(format!("invalid card count for {}", $hand_name));
                }
                let entry = lookup
                    .get_entry(&cards)
                    .map_err(|e| format!("invalid {} hand: {}", $hand_name, e))?;
                Ok(Self { cards, entry })
            }

            fn from_game(hole_cards: &[Card], board_cards: &[Card]) -> Result<Self, String> {
                hole_cards
                    .iter()
                    .chain(board_cards.iter())
                    .copied()
                    .combinations(Self::CARD_COUNT.unwrap())
                    .filter_map(|combo| Self::new(combo, &*$lookup).ok())
                    .max()
                    .ok_or_else(|| format!("no valid {} hand can be formed", $hand_name))
            }
        }
    };
}

impl_combination_hand!(StandardHighHand, false, 5, STANDARD_LOOKUP, "StandardHighHand");
impl_combination_hand!(StandardLowHand, true, 5, STANDARD_LOOKUP, "StandardLowHand");
impl_combination_hand!(
    ShortDeckHoldemHand,
    false,
    5,
    SHORT_DECK_HOLDEM_LOOKUP,
    "ShortDeckHoldemHand"
);
impl_combination_hand!(
    EightOrBetterLowHand,
    true,
    5,
    EIGHT_OR_BETTER_LOOKUP,
    "EightOrBetterLowHand"
);
impl_combination_hand!(RegularLowHand, true, 5, REGULAR_LOW_LOOKUP, "RegularLowHand");

/// Hands that must use a fixed number of hole cards plus a fixed number of
/// board cards (Omaha-style composition).
macro_rules! impl_hole_board_combination_hand {
    (
        $hand_type:ident,
        $is_low:expr,
        $total_cards:expr,
        $hole_cards_to_use:expr,
        $board_cards_to_use:expr,
        $lookup:expr,
        $hand_name:expr
    ) => {
        #[derive(Clone)]
        pub struct $hand_type {
            cards: Vec<Card>,
            entry: Entry,
        }
        impl_hand_boilerplate!($hand_type);

        impl Hand for $hand_type {
            const LOW: bool = $is_low;
            const CARD_COUNT: Option<usize> = Some($total_cards);

            fn cards(&self) -> &[Card] {
                &self.cards
            }
            fn entry(&self) -> Entry {
                self.entry
            }

            fn new(cards: Vec<Card>, lookup: &dyn Lookup) -> Result<Self, String> {
                if cards.len() != Self::CARD_COUNT.unwrap() {
                    return Err(format!("invalid card count for {}", $hand_name));
                }
                let entry = lookup
                    .get_entry(&cards)
                    .map_err(|e| format!("invalid {} hand: {}", $hand_name, e))?;
                Ok(Self { cards, entry })
            }

            fn from_game(hole_cards: &[Card], board_cards: &[Card]) -> Result<Self, String> {
                hole_cards
                    .iter()
                    .copied()
                    .combinations($hole_cards_to_use)
                    .cartesian_product(board_cards.iter().copied().combinations($board_cards_to_use))
                    .filter_map(|(h, b)| {
                        let all_cards: Vec<Card> = h.into_iter().chain(b.into_iter()).collect();
                        Self::new(all_cards, &*$lookup).ok()
                    })
                    .max()
                    .ok_or_else(|| format!("no valid {} hand can be formed", $hand_name))
            }
        }
    };
}

impl_hole_board_combination_hand!(
    OmahaHoldemHand,
    false,
    5,
    2,
    3,
    STANDARD_LOOKUP,
    "OmahaHoldemHand"
);
impl_hole_board_combination_hand!(
    OmahaEightOrBetterLowHand,
    true,
    5,
    2,
    3,
    EIGHT_OR_BETTER_LOOKUP,
    "OmahaEightOrBetterLowHand"
);

/// Greek Hold'em: unlike Omaha, both hole cards are always used; only the
/// 3-of-5 board choice is searched.
#[derive(Clone)]
pub struct GreekHoldemHand {
    cards: Vec<Card>,
    entry: Entry,
}
impl_hand_boilerplate!(GreekHoldemHand);

impl Hand for GreekHoldemHand {
    const LOW: bool = false;
    const CARD_COUNT: Option<usize> = Some(5);

    fn cards(&self) -> &[Card] {
        &self.cards
    }
    fn entry(&self) -> Entry {
        self.entry
    }

    fn new(cards: Vec<Card>, lookup: &dyn Lookup) -> Result<Self, String> {
        if cards.len() != Self::CARD_COUNT.unwrap() {
            return Err("invalid card count for GreekHoldemHand".to_string());
        }
        let entry = lookup
            .get_entry(&cards)
            .map_err(|e| format!("invalid GreekHoldemHand hand: {}", e))?;
        Ok(Self { cards, entry })
    }

    fn from_game(hole_cards: &[Card], board_cards: &[Card]) -> Result<Self, String> {
        if hole_cards.len() != 2 {
            return Err("GreekHoldemHand requires exactly two hole cards".to_string());
        }
        board_cards
            .iter()
            .copied()
            .combinations(3)
            .filter_map(|board| {
                let cards: Vec<Card> = hole_cards.iter().copied().chain(board).collect();
                Self::new(cards, &*STANDARD_LOOKUP).ok()
            })
            .max()
            .ok_or_else(|| "no valid GreekHoldemHand hand can be formed".to_string())
    }
}

/// A Badugi hand: 1 to 4 cards, all distinct in rank and suit. Longer hands
/// beat shorter ones; within equal length, lower ranks are stronger (it is
/// a low hand).
#[derive(Clone)]
pub struct BadugiHand {
    cards: Vec<Card>,
    entry: Entry,
}
impl_hand_boilerplate!(BadugiHand);

impl Hand for BadugiHand {
    const LOW: bool = true;
    const CARD_COUNT: Option<usize> = None;

    fn cards(&self) -> &[Card] {
        &self.cards
    }
    fn entry(&self) -> Entry {
        self.entry
    }

    fn new(cards: Vec<Card>, lookup: &dyn Lookup) -> Result<Self, String> {
        let entry = lookup
            .get_entry(&cards)
            .map_err(|e| format!("invalid BadugiHand hand: {}", e))?;
        Ok(Self { cards, entry })
    }

    /// Single-pass greedy scan, not a search: cards are visited in STANDARD
    /// (ace-high) rank order and admitted whenever both their rank and suit
    /// are still unseen. This is the exact algorithm the format is defined
    /// by — unlike a brute-force search over combinations, it always
    /// produces one specific subset instead of the best among several
    /// same-length candidates, and that subset is the correct hand.
    fn from_game(hole_cards: &[Card], board_cards: &[Card]) -> Result<Self, String> {
        let mut all_cards: Vec<Card> = hole_cards.iter().chain(board_cards.iter()).copied().collect();
        all_cards.sort_by_key(|card| {
            RankOrder::STANDARD
                .iter()
                .position(|&r| r == card.rank)
                .unwrap_or(usize::MAX)
        });

        let mut seen_ranks: Vec<Rank> = Vec::new();
        let mut selected: Vec<Card> = Vec::new();

        for card in all_cards {
            if !seen_ranks.contains(&card.rank)
                && !selected.iter().any(|c: &Card| c.suit == card.suit)
            {
                seen_ranks.push(card.rank);
                selected.push(card);
            }
        }

        Self::new(selected, &*BADUGI_LOOKUP)
    }
}

/// Kuhn poker's single-card hand: the higher of the two possible hole
/// cards never matters here since each player only ever holds one.
#[derive(Clone)]
pub struct KuhnPokerHand {
    cards: Vec<Card>,
    entry: Entry,
}
impl_hand_boilerplate!(KuhnPokerHand);

impl Hand for KuhnPokerHand {
    const LOW: bool = false;
    const CARD_COUNT: Option<usize> = Some(1);

    fn cards(&self) -> &[Card] {
        &self.cards
    }
    fn entry(&self) -> Entry {
        self.entry
    }

    fn new(cards: Vec<Card>, lookup: &dyn Lookup) -> Result<Self, String> {
        let entry = lookup
            .get_entry(&cards)
            .map_err(|e| format!("invalid KuhnPokerHand hand: {}", e))?;
        Ok(Self { cards, entry })
    }

    fn from_game(hole_cards: &[Card], board_cards: &[Card]) -> Result<Self, String> {
        hole_cards
            .iter()
            .chain(board_cards.iter())
            .filter_map(|&card| Self::new(vec![card], &*KUHN_POKER_LOOKUP).ok())
            .max()
            .ok_or_else(|| "no valid KuhnPokerHand hand can be formed".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::{Card, Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn standard_high_hand_picks_the_best_five() {
        let hole = [card(Rank::Ace, Suit::Spade), card(Rank::Ace, Suit::Heart)];
        let board = [
            card(Rank::Ace, Suit::Club),
            card(Rank::King, Suit::Diamond),
            card(Rank::King, Suit::Spade),
            card(Rank::Deuce, Suit::Heart),
            card(Rank::Trey, Suit::Club),
        ];
        let hand = StandardHighHand::from_game(&hole, &board).unwrap();
        assert_eq!(hand.cards().len(), 5);
    }

    #[test]
    fn short_deck_flush_beats_full_house() {
        let flush = ShortDeckHoldemHand::new(
            vec![
                card(Rank::Six, Suit::Spade),
                card(Rank::Eight, Suit::Spade),
                card(Rank::Ten, Suit::Spade),
                card(Rank::Queen, Suit::Spade),
                card(Rank::Ace, Suit::Spade),
            ],
            &*crate::lookups::SHORT_DECK_HOLDEM_LOOKUP,
        )
        .unwrap();
        let full_house = ShortDeckHoldemHand::new(
            vec![
                card(Rank::Six, Suit::Spade),
                card(Rank::Six, Suit::Heart),
                card(Rank::Six, Suit::Club),
                card(Rank::Seven, Suit::Spade),
                card(Rank::Seven, Suit::Heart),
            ],
            &*crate::lookups::SHORT_DECK_HOLDEM_LOOKUP,
        )
        .unwrap();
        assert!(flush > full_house);
    }

    #[test]
    fn badugi_greedy_scan_prefers_lowest_admissible_ranks() {
        let hole = [
            card(Rank::Ace, Suit::Spade),
            card(Rank::Deuce, Suit::Heart),
            card(Rank::Trey, Suit::Club),
            card(Rank::King, Suit::Diamond),
        ];
        let hand = BadugiHand::from_game(&hole, &[]).unwrap();
        assert_eq!(hand.cards().len(), 4);
    }

    #[test]
    fn badugi_rejects_paired_ranks_and_suits() {
        let hole = [
            card(Rank::Ace, Suit::Spade),
            card(Rank::Ace, Suit::Heart),
            card(Rank::Deuce, Suit::Spade),
            card(Rank::Trey, Suit::Club),
        ];
        // Ace-spade then ace-heart: ace-heart's rank is already seen, dropped.
        // Deuce-spade: suit already seen (spade), dropped. Trey-club admitted.
        let hand = BadugiHand::from_game(&hole, &[]).unwrap();
        assert_eq!(hand.cards().len(), 2);
    }

    #[test]
    fn greek_holdem_uses_both_hole_cards_and_best_board_trio() {
        let hole = [card(Rank::Ace, Suit::Spade), card(Rank::Ace, Suit::Heart)];
        let board = [
            card(Rank::Ace, Suit::Club),
            card(Rank::King, Suit::Diamond),
            card(Rank::King, Suit::Spade),
            card(Rank::Deuce, Suit::Heart),
            card(Rank::Trey, Suit::Club),
        ];
        let hand = GreekHoldemHand::from_game(&hole, &board).unwrap();
        assert_eq!(hand.cards().len(), 5);
        assert!(hand.cards().contains(&card(Rank::Ace, Suit::Spade)));
        assert!(hand.cards().contains(&card(Rank::Ace, Suit::Heart)));
    }

    #[test]
    fn kuhn_hand_is_the_single_higher_card() {
        let hand = KuhnPokerHand::from_game(
            &[card(Rank::Queen, Suit::Spade)],
            &[card(Rank::King, Suit::Spade)],
        )
        .unwrap();
        assert_eq!(hand.cards(), &[card(Rank::King, Suit::Spade)]);
    }

    #[test]
    fn hand_type_dispatches_to_the_matching_evaluator() {
        let hole = [card(Rank::Ace, Suit::Spade), card(Rank::Ace, Suit::Heart)];
        let board = [
            card(Rank::Ace, Suit::Club),
            card(Rank::King, Suit::Diamond),
            card(Rank::King, Suit::Spade),
            card(Rank::Deuce, Suit::Heart),
            card(Rank::Trey, Suit::Club),
        ];
        let full_house = HandType::StandardHighHand.from_game(&hole, &board).unwrap();
        assert_eq!(full_house.cards().len(), 5);

        let short_deck = HandType::ShortDeckHoldemHand.from_game(&hole, &board).unwrap();
        assert_eq!(short_deck.entry(), full_house.entry());
    }
}
