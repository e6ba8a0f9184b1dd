//! Property-based tests checking invariants of card handling, hand
//! comparison, and chip accounting across randomly generated inputs.

use std::collections::BTreeMap;

use proptest::prelude::*;

use pokerkit::hands::HandType;
use pokerkit::state::{Automation, BettingStructure, Mode, Opening, State, StateBuilder, Street};
use pokerkit::utilities::{Card, Deck, Rank, Suit};

const RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Deuce,
    Rank::Trey,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];
const SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

fn any_card() -> impl Strategy<Value = Card> {
    (0usize..13, 0usize..4).prop_map(|(r, s)| Card::new(RANKS[r], SUITS[s]))
}

/// Seven distinct cards, split into two hole cards and five board cards.
fn seven_unique_cards() -> impl Strategy<Value = (Vec<Card>, Vec<Card>)> {
    prop::sample::subsequence(Deck::standard(), 7).prop_map(|mut cards| {
        cards.sort_by_key(|c| (c.rank, c.suit));
        let board = cards.split_off(2);
        (cards, board)
    })
}

fn heads_up_no_limit(stacks: (i64, i64), blinds: (i64, i64)) -> State {
    let streets = vec![Street::new(
        false,
        vec![false, false],
        0,
        false,
        Opening::Position,
        blinds.1.max(1),
        None,
    )
    .unwrap()];

    let mut raw_blinds = BTreeMap::new();
    raw_blinds.insert(0, blinds.0);
    raw_blinds.insert(1, blinds.1);
    let mut raw_stacks = BTreeMap::new();
    raw_stacks.insert(0, stacks.0);
    raw_stacks.insert(1, stacks.1);

    StateBuilder::new(2)
        .automations(&[
            Automation::AntePosting,
            Automation::BetCollection,
            Automation::BlindOrStraddlePosting,
            Automation::HoleDealing,
            Automation::HoleCardsShowingOrMucking,
            Automation::HandKilling,
            Automation::ChipsPushing,
            Automation::ChipsPulling,
        ])
        .hand_types(vec![HandType::StandardHighHand])
        .streets(streets)
        .betting_structure(BettingStructure::NoLimit)
        .raw_blinds_or_straddles(raw_blinds)
        .raw_starting_stacks(raw_stacks)
        .mode(Mode::CashGame)
        .build()
        .unwrap()
}

proptest! {
    /// A single card always round-trips through its display form.
    #[test]
    fn card_display_round_trips(card in any_card()) {
        let parsed = Card::parse_cards(&card.to_string()).unwrap();
        prop_assert_eq!(parsed, vec![card]);
    }

    /// Comparing the same StandardHighHand against itself is always equal,
    /// and comparing two distinct hands is always a strict, antisymmetric
    /// order (never both greater and less).
    #[test]
    fn standard_high_hand_ordering_is_antisymmetric(
        (hole_a, board_a) in seven_unique_cards(),
        (hole_b, board_b) in seven_unique_cards(),
    ) {
        let hand_a = HandType::StandardHighHand.from_game(&hole_a, &board_a).unwrap();
        let hand_b = HandType::StandardHighHand.from_game(&hole_b, &board_b).unwrap();

        let forward = hand_a.cmp(&hand_b);
        let backward = hand_b.cmp(&hand_a);
        prop_assert_eq!(forward, backward.reverse());

        let self_cmp = hand_a.cmp(&hand_a.clone());
        prop_assert_eq!(self_cmp, std::cmp::Ordering::Equal);
    }

    /// Posting blinds on a freshly built heads-up no-limit state never
    /// creates or destroys chips: stacks plus live bets always equal the
    /// sum of starting stacks.
    #[test]
    fn blind_posting_conserves_chips(
        stack_a in 10i64..1_000_000,
        stack_b in 10i64..1_000_000,
        small_blind in 1i64..5,
    ) {
        let big_blind = small_blind * 2;
        prop_assume!(stack_a > big_blind && stack_b > big_blind);

        let state = heads_up_no_limit((stack_a, stack_b), (small_blind, big_blind));
        let total_before = stack_a + stack_b;
        let total_after: i64 = state.stacks.iter().sum::<i64>() + state.bets.iter().sum::<i64>();
        prop_assert_eq!(total_before, total_after);
    }

    /// Folding preflop always awards the whole pot to the other player and
    /// still conserves total chips.
    #[test]
    fn fold_conserves_chips_and_awards_the_pot(
        stack_a in 10i64..1_000_000,
        stack_b in 10i64..1_000_000,
    ) {
        prop_assume!(stack_a > 4 && stack_b > 4);
        let mut state = heads_up_no_limit((stack_a, stack_b), (1, 2));
        state.fold(None).unwrap();

        prop_assert_eq!(state.stacks.iter().sum::<i64>(), stack_a + stack_b);
        prop_assert!(!state.status);
    }
}

/// `Deck::standard` always yields 52 distinct cards.
#[test]
fn standard_deck_has_52_unique_cards() {
    let deck = Deck::standard();
    assert_eq!(deck.len(), 52);
    let unique: std::collections::HashSet<_> = deck.iter().collect();
    assert_eq!(unique.len(), 52);
}

/// `Deck::short_deck_holdem` drops everything below a six.
#[test]
fn short_deck_has_36_unique_cards_and_no_low_ranks() {
    let deck = Deck::short_deck_holdem();
    assert_eq!(deck.len(), 36);
    assert!(deck
        .iter()
        .all(|c| !matches!(c.rank, Rank::Deuce | Rank::Trey | Rank::Four | Rank::Five)));
}

/// Every card dealt during setup came out of the deck exactly once: no
/// card is both still in the deck and already in a player's hole cards.
#[test]
fn hole_dealing_never_duplicates_a_card() {
    let state = heads_up_no_limit((200, 200), (1, 2));
    let dealt: Vec<Card> = state.hole_cards.iter().flatten().copied().collect();
    let unique: std::collections::HashSet<_> = dealt.iter().collect();
    assert_eq!(dealt.len(), unique.len());
    for card in &dealt {
        assert!(!state.deck_cards.contains(card));
    }
}

/// For the standard high-hand lookup, a straight flush always outranks a
/// four-of-a-kind, which always outranks a full house.
#[test]
fn standard_hand_type_strength_is_monotonic() {
    let straight_flush = HandType::StandardHighHand
        .from_game(&Card::parse_cards("2s3s").unwrap(), &Card::parse_cards("4s5s6s").unwrap())
        .unwrap();
    let four_of_a_kind = HandType::StandardHighHand
        .from_game(&Card::parse_cards("2s2c").unwrap(), &Card::parse_cards("2d2h9c").unwrap())
        .unwrap();
    let full_house = HandType::StandardHighHand
        .from_game(&Card::parse_cards("2s2c").unwrap(), &Card::parse_cards("2d9h9c").unwrap())
        .unwrap();

    assert!(straight_flush > four_of_a_kind);
    assert!(four_of_a_kind > full_house);
}
