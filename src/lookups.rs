//! Implements classes related to poker hand lookups.
//! Lookups are used by PokerKit's hand types to discern hand strengths.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use once_cell::sync::Lazy;

use crate::utilities::{Card, Rank, RankOrder};

// Include the generated PHF map: rank char -> one of the 13 primes.
include!(concat!(env!("OUT_DIR"), "/rank_multipliers.rs"));

/// The enum for all hand classification labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::HighCard => write!(f, "High card"),
            Label::OnePair => write!(f, "One pair"),
            Label::TwoPair => write!(f, "Two pair"),
            Label::ThreeOfAKind => write!(f, "Three of a kind"),
            Label::Straight => write!(f, "Straight"),
            Label::Flush => write!(f, "Flush"),
            Label::FullHouse => write!(f, "Full house"),
            Label::FourOfAKind => write!(f, "Four of a kind"),
            Label::StraightFlush => write!(f, "Straight flush"),
        }
    }
}

/// An entry in a hand lookup table, representing the strength of a hand.
/// Strength comparisons only ever use `index`; `label` is informational.
#[derive(Debug, Clone, Copy, Eq, Hash)]
pub struct Entry {
    pub index: i32,
    pub label: Label,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

/// Key under which an `Entry` is stored: the commutative prime-product hash
/// of the ranks involved, paired with whether the cards are all one suit.
/// The largest possible hash (four aces plus a king under REGULAR order) is
/// well under `u64::MAX`, so there is no need for arbitrary-precision ints.
type LookupKey = (u64, bool);

/// A trait for hand lookup tables, dyn-safe so evaluators can hold
/// `&'static dyn Lookup` without committing to a concrete lookup type.
pub trait Lookup: Sync {
    fn rank_order(&self) -> &'static [Rank];

    fn entries(&self) -> &HashMap<LookupKey, Entry>;

    /// Hashes a collection of ranks into a commutative product of primes.
    fn hash_ranks(&self, ranks: &[Rank]) -> u64 {
        ranks
            .iter()
            .map(|r| {
                let rank_char = r.to_string().chars().next().unwrap();
                *RANK_MULTIPLIERS.get(&rank_char).unwrap_or(&1)
            })
            .product()
    }

    /// Recursively generates hashes for all possible hands given rank
    /// multiplicities (e.g. `{2: 1, 1: 3}` for one pair plus three kickers).
    fn hash_multisets(&self, ranks: &[Rank], counter: &mut BTreeMap<usize, usize>) -> Vec<u64> {
        if counter.is_empty() {
            return vec![1];
        }

        let mut hashes = Vec::new();
        let (&multiplicity, &count) = counter.iter().next_back().unwrap();
        counter.remove(&multiplicity);

        for samples in ranks.iter().rev().combinations(count) {
            let sample_ranks: Vec<Rank> = samples.iter().map(|&&r| r).collect();
            let hash_part = self.hash_ranks(&sample_ranks).pow(multiplicity as u32);
            let remaining_ranks: Vec<Rank> = ranks
                .iter()
                .filter(|r| !sample_ranks.contains(r))
                .cloned()
                .collect();

            for partial_hash in self.hash_multisets(&remaining_ranks, counter) {
                hashes.push(hash_part * partial_hash);
            }
        }

        counter.insert(multiplicity, count);
        hashes
    }

    /// Gets the lookup key for a set of cards. Lookups with extra
    /// restrictions (Badugi's rainbow requirement) override this.
    fn get_key(&self, cards: &[Card]) -> Result<LookupKey, String> {
        let ranks: Vec<Rank> = Card::get_ranks(cards).collect();
        let hash = self.hash_ranks(&ranks);
        let suitedness = Card::are_suited(cards);
        Ok((hash, suitedness))
    }

    fn get_entry(&self, cards: &[Card]) -> Result<Entry, String> {
        let key = self.get_key(cards)?;
        self.entries()
            .get(&key)
            .copied()
            .ok_or_else(|| format!("the cards {:?} form an invalid hand", cards))
    }

    fn get_entry_or_none(&self, cards: &[Card]) -> Option<Entry> {
        self.get_key(cards)
            .ok()
            .and_then(|key| self.entries().get(&key).copied())
    }

    fn has_entry(&self, cards: &[Card]) -> bool {
        self.get_entry_or_none(cards).is_some()
    }
}

/// A helper used while constructing a lookup table: assigns entries in
/// weakest-to-strongest order, then re-indexes to a contiguous range.
#[derive(Default)]
struct LookupBuilder {
    entries: HashMap<LookupKey, Entry>,
    entry_count: i32,
}

impl LookupBuilder {
    fn add_entry(&mut self, hash: u64, suitednesses: &[bool], label: Label) {
        let entry = Entry {
            index: self.entry_count,
            label,
        };
        self.entry_count += 1;

        for &suitedness in suitednesses {
            self.entries.insert((hash, suitedness), entry);
        }
    }

    fn add_multisets(
        &mut self,
        lookup: &dyn Lookup,
        mut counter: BTreeMap<usize, usize>,
        suitednesses: &[bool],
        label: Label,
    ) {
        let hashes = lookup.hash_multisets(lookup.rank_order(), &mut counter);

        for hash in hashes.into_iter().rev() {
            self.add_entry(hash, suitednesses, label);
        }
    }

    fn add_straights(&mut self, lookup: &dyn Lookup, count: usize, suitednesses: &[bool], label: Label) {
        let rank_order = lookup.rank_order();
        let mut wheel_ranks = vec![rank_order[rank_order.len() - 1]];
        wheel_ranks.extend_from_slice(&rank_order[..count - 1]);

        // Wheel straight (e.g. A-2-3-4-5 under STANDARD order).
        self.add_entry(lookup.hash_ranks(&wheel_ranks), suitednesses, label);

        for i in 0..=(rank_order.len() - count) {
            self.add_entry(lookup.hash_ranks(&rank_order[i..i + count]), suitednesses, label);
        }
    }

    fn build(mut self) -> HashMap<LookupKey, Entry> {
        let mut sorted_indices: Vec<i32> = self.entries.values().map(|e| e.index).collect();
        sorted_indices.sort_unstable();
        sorted_indices.dedup();

        let reset_indices: HashMap<i32, i32> = sorted_indices
            .into_iter()
            .enumerate()
            .map(|(i, old_index)| (old_index, i as i32))
            .collect();

        for entry in self.entries.values_mut() {
            entry.index = reset_indices[&entry.index];
        }

        self.entries
    }
}

macro_rules! define_lookup {
    ($name:ident, $rank_order:expr) => {
        pub struct $name {
            entries: HashMap<LookupKey, Entry>,
        }

        impl $name {
            fn new(build: impl FnOnce(&mut LookupBuilder, &Self)) -> Self {
                let mut lookup = Self {
                    entries: HashMap::new(),
                };
                let mut builder = LookupBuilder::default();
                build(&mut builder, &lookup);
                lookup.entries = builder.build();
                lookup
            }
        }

        impl Lookup for $name {
            fn rank_order(&self) -> &'static [Rank] {
                $rank_order
            }

            fn entries(&self) -> &HashMap<LookupKey, Entry> {
                &self.entries
            }
        }
    };
}

define_lookup!(StandardLookup, &RankOrder::STANDARD);
define_lookup!(ShortDeckHoldemLookup, &RankOrder::SHORT_DECK_HOLDEM);
define_lookup!(EightOrBetterLookup, &RankOrder::EIGHT_OR_BETTER_LOW);
define_lookup!(RegularLowLookup, &RankOrder::REGULAR);
define_lookup!(KuhnPokerLookup, &RankOrder::KUHN_POKER);

/// Badugi has no flushes or straights: only high-card entries over 1- to
/// 4-card multisets, plus the rainbow restriction overridden below.
pub struct BadugiLookup {
    entries: HashMap<LookupKey, Entry>,
}

impl BadugiLookup {
    fn new(build: impl FnOnce(&mut LookupBuilder, &Self)) -> Self {
        let mut lookup = Self {
            entries: HashMap::new(),
        };
        let mut builder = LookupBuilder::default();
        build(&mut builder, &lookup);
        lookup.entries = builder.build();
        lookup
    }
}

pub static STANDARD_LOOKUP: Lazy<StandardLookup> = Lazy::new(|| {
    StandardLookup::new(|b, l| {
        b.add_multisets(l, BTreeMap::from([(1, 5)]), &[false], Label::HighCard);
        b.add_multisets(l, BTreeMap::from([(2, 1), (1, 3)]), &[false], Label::OnePair);
        b.add_multisets(l, BTreeMap::from([(2, 2), (1, 1)]), &[false], Label::TwoPair);
        b.add_multisets(l, BTreeMap::from([(3, 1), (1, 2)]), &[false], Label::ThreeOfAKind);
        b.add_straights(l, 5, &[false], Label::Straight);
        b.add_multisets(l, BTreeMap::from([(1, 5)]), &[true], Label::Flush);
        b.add_multisets(l, BTreeMap::from([(3, 1), (2, 1)]), &[false], Label::FullHouse);
        b.add_multisets(l, BTreeMap::from([(4, 1), (1, 1)]), &[false], Label::FourOfAKind);
        b.add_straights(l, 5, &[true], Label::StraightFlush);
    })
});

pub static SHORT_DECK_HOLDEM_LOOKUP: Lazy<ShortDeckHoldemLookup> = Lazy::new(|| {
    ShortDeckHoldemLookup::new(|b, l| {
        b.add_multisets(l, BTreeMap::from([(1, 5)]), &[false], Label::HighCard);
        b.add_multisets(l, BTreeMap::from([(2, 1), (1, 3)]), &[false], Label::OnePair);
        b.add_multisets(l, BTreeMap::from([(2, 2), (1, 1)]), &[false], Label::TwoPair);
        b.add_multisets(l, BTreeMap::from([(3, 1), (1, 2)]), &[false], Label::ThreeOfAKind);
        b.add_straights(l, 5, &[false], Label::Straight);
        // Short-deck reorders flush between straight and full house.
        b.add_multisets(l, BTreeMap::from([(3, 1), (2, 1)]), &[false], Label::FullHouse);
        b.add_multisets(l, BTreeMap::from([(1, 5)]), &[true], Label::Flush);
        b.add_multisets(l, BTreeMap::from([(4, 1), (1, 1)]), &[false], Label::FourOfAKind);
        b.add_straights(l, 5, &[true], Label::StraightFlush);
    })
});

pub static EIGHT_OR_BETTER_LOOKUP: Lazy<EightOrBetterLookup> = Lazy::new(|| {
    EightOrBetterLookup::new(|b, l| {
        b.add_multisets(l, BTreeMap::from([(1, 5)]), &[false, true], Label::HighCard);
    })
});

pub static REGULAR_LOW_LOOKUP: Lazy<RegularLowLookup> = Lazy::new(|| {
    RegularLowLookup::new(|b, l| {
        b.add_multisets(l, BTreeMap::from([(1, 5)]), &[false, true], Label::HighCard);
        b.add_multisets(l, BTreeMap::from([(2, 1), (1, 3)]), &[false], Label::OnePair);
        b.add_multisets(l, BTreeMap::from([(2, 2), (1, 1)]), &[false], Label::TwoPair);
        b.add_multisets(l, BTreeMap::from([(3, 1), (1, 2)]), &[false], Label::ThreeOfAKind);
        b.add_multisets(l, BTreeMap::from([(3, 1), (2, 1)]), &[false], Label::FullHouse);
        b.add_multisets(l, BTreeMap::from([(4, 1), (1, 1)]), &[false], Label::FourOfAKind);
    })
});

pub static BADUGI_LOOKUP: Lazy<BadugiLookup> = Lazy::new(|| {
    BadugiLookup::new(|b, l| {
        for i in (1..=4).rev() {
            b.add_multisets(l, BTreeMap::from([(1, i)]), &[i == 1], Label::HighCard);
        }
    })
});

impl Lookup for BadugiLookup {
    fn rank_order(&self) -> &'static [Rank] {
        &RankOrder::REGULAR
    }

    fn entries(&self) -> &HashMap<LookupKey, Entry> {
        &self.entries
    }

    /// Badugi hands must additionally be rainbow (no two cards share a suit).
    fn get_key(&self, cards: &[Card]) -> Result<LookupKey, String> {
        if !Card::are_rainbow(cards) {
            return Err("Badugi hands must be rainbow".to_string());
        }
        let ranks: Vec<Rank> = Card::get_ranks(cards).collect();
        Ok((self.hash_ranks(&ranks), Card::are_suited(cards)))
    }
}

pub static KUHN_POKER_LOOKUP: Lazy<KuhnPokerLookup> = Lazy::new(|| {
    KuhnPokerLookup::new(|b, l| {
        b.add_multisets(l, BTreeMap::from([(1, 1)]), &[true], Label::HighCard);
    })
});

/// Up-card strength tables used only to decide who opens a stud street
/// (`Opening::LowHand`/`Opening::HighHand`); distinct from any showdown
/// evaluator, since an opener can hold as few as one up card.
define_lookup!(LowHandOpeningLookup, &RankOrder::REGULAR);
define_lookup!(HighHandOpeningLookup, &RankOrder::STANDARD);

pub static LOW_HAND_OPENING_LOOKUP: Lazy<LowHandOpeningLookup> = Lazy::new(|| {
    LowHandOpeningLookup::new(|b, l| {
        for i in 1..=4 {
            b.add_multisets(l, BTreeMap::from([(1, i)]), &[false, true], Label::HighCard);
        }
        for i in 0..3 {
            b.add_multisets(l, BTreeMap::from([(2, 1), (1, i)]), &[false], Label::OnePair);
        }
        b.add_multisets(l, BTreeMap::from([(2, 2)]), &[false], Label::TwoPair);
        for i in 0..2 {
            b.add_multisets(l, BTreeMap::from([(3, 1), (1, i)]), &[false], Label::ThreeOfAKind);
        }
        b.add_multisets(l, BTreeMap::from([(4, 1)]), &[false], Label::FourOfAKind);
    })
});

pub static HIGH_HAND_OPENING_LOOKUP: Lazy<HighHandOpeningLookup> = Lazy::new(|| {
    HighHandOpeningLookup::new(|b, l| {
        for i in 1..=4 {
            b.add_multisets(l, BTreeMap::from([(1, i)]), &[false, true], Label::HighCard);
        }
        for i in 0..3 {
            b.add_multisets(l, BTreeMap::from([(2, 1), (1, i)]), &[false], Label::OnePair);
        }
        b.add_multisets(l, BTreeMap::from([(2, 2)]), &[false], Label::TwoPair);
        for i in 0..2 {
            b.add_multisets(l, BTreeMap::from([(3, 1), (1, i)]), &[false], Label::ThreeOfAKind);
        }
        b.add_multisets(l, BTreeMap::from([(4, 1)]), &[false], Label::FourOfAKind);
    })
});
