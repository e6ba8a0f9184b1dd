//! Replays a handful of well-known televised and documented poker hands
//! street by street and checks the resulting stacks against the publicly
//! recorded outcome.
//!
//! Where a player's exact hole cards never reach a showdown comparison
//! (they fold before anyone needs to know what they held), the cards are
//! left to automatic dealing instead of being reconstructed from memory.

use pokerkit::games::{
    FixedLimitBadugi, FixedLimitDeuceToSevenLowballTripleDraw, KuhnPoker, NoLimitShortDeckHoldem,
    NoLimitTexasHoldem, PotLimitOmahaHoldem,
};
use pokerkit::state::{Automation, Mode, State};
use pokerkit::utilities::Card;

fn cards(s: &str) -> Vec<Card> {
    Card::parse_cards(s).unwrap()
}

fn raw(pairs: &[(usize, i64)]) -> std::collections::BTreeMap<usize, i64> {
    pairs.iter().cloned().collect()
}

/// Deals `n` unseen cards to `player_index` without caring what they turn
/// out to be.
fn deal_unknown(state: &mut State, player_index: usize, n: usize) {
    for _ in 0..n {
        state.deal_hole(None, Some(player_index), None).unwrap();
    }
}

#[test]
fn dwan_ivey_million_dollar_pot() {
    let automations = [
        Automation::AntePosting,
        Automation::BetCollection,
        Automation::BlindOrStraddlePosting,
        Automation::HoleCardsShowingOrMucking,
        Automation::HandKilling,
        Automation::ChipsPushing,
        Automation::ChipsPulling,
    ];

    let mut state = NoLimitTexasHoldem::create_state(
        &automations,
        true,
        raw(&[(0, 500), (1, 500), (2, 500)]),
        raw(&[(0, 1000), (1, 2000)]),
        2000,
        raw(&[(0, 1125600), (1, 2000000), (2, 553500)]),
        3,
        Mode::CashGame,
    )
    .unwrap();

    state.deal_hole(Some(cards("Ac2d")), Some(0), None).unwrap(); // Ivey
    deal_unknown(&mut state, 1, 2); // Antonius, folds before showdown
    state.deal_hole(Some(cards("7h6h")), Some(2), None).unwrap(); // Dwan

    state.complete_bet_or_raise_to(Some(7000), None).unwrap(); // Dwan
    state.complete_bet_or_raise_to(Some(23000), None).unwrap(); // Ivey
    state.fold(None).unwrap(); // Antonius
    state.check_or_call(None).unwrap(); // Dwan

    state.burn_card(None, None).unwrap();
    state.deal_board(Some(cards("Jc3d5c")), None).unwrap();

    state.complete_bet_or_raise_to(Some(35000), None).unwrap(); // Ivey
    state.check_or_call(None).unwrap(); // Dwan

    state.burn_card(None, None).unwrap();
    state.deal_board(Some(cards("4h")), None).unwrap();

    state.complete_bet_or_raise_to(Some(90000), None).unwrap(); // Ivey
    state.complete_bet_or_raise_to(Some(232600), None).unwrap(); // Dwan
    state.complete_bet_or_raise_to(Some(1067100), None).unwrap(); // Ivey
    state.check_or_call(None).unwrap(); // Dwan, all-in

    state.burn_card(None, None).unwrap();
    state.deal_board(Some(cards("Jh")), None).unwrap();

    assert_eq!(state.stacks, vec![572100, 1997500, 1109500]);
}

#[test]
fn xuan_phua_short_deck_all_in() {
    let automations = [
        Automation::AntePosting,
        Automation::BetCollection,
        Automation::BlindOrStraddlePosting,
        Automation::HoleCardsShowingOrMucking,
        Automation::HandKilling,
        Automation::ChipsPushing,
        Automation::ChipsPulling,
    ];

    let mut state = NoLimitShortDeckHoldem::create_state(
        &automations,
        true,
        raw(&[(0, 3000), (1, 3000), (2, 3000), (3, 3000), (4, 3000), (5, 3000)]),
        raw(&[(5, 3000)]),
        3000,
        raw(&[
            (0, 495000),
            (1, 232000),
            (2, 362000),
            (3, 403000),
            (4, 301000),
            (5, 204000),
        ]),
        6,
        Mode::CashGame,
    )
    .unwrap();

    state.deal_hole(Some(cards("Th8h")), Some(0), None).unwrap(); // Badziakouski
    state.deal_hole(Some(cards("QsJd")), Some(1), None).unwrap(); // Zhong
    state.deal_hole(Some(cards("QhQd")), Some(2), None).unwrap(); // Xuan
    state.deal_hole(Some(cards("8d7c")), Some(3), None).unwrap(); // Jun
    state.deal_hole(Some(cards("KhKs")), Some(4), None).unwrap(); // Phua
    state.deal_hole(Some(cards("8c7h")), Some(5), None).unwrap(); // Koon

    state.check_or_call(None).unwrap(); // Badziakouski
    state.check_or_call(None).unwrap(); // Zhong
    state.complete_bet_or_raise_to(Some(35000), None).unwrap(); // Xuan
    state.fold(None).unwrap(); // Jun
    state.complete_bet_or_raise_to(Some(298000), None).unwrap(); // Phua
    state.fold(None).unwrap(); // Koon
    state.fold(None).unwrap(); // Badziakouski
    state.fold(None).unwrap(); // Zhong
    state.check_or_call(None).unwrap(); // Xuan, all-in

    state.burn_card(None, None).unwrap();
    state.deal_board(Some(cards("9h6cKc")), None).unwrap();

    state.burn_card(None, None).unwrap();
    state.deal_board(Some(cards("Jh")), None).unwrap();

    state.burn_card(None, None).unwrap();
    state.deal_board(Some(cards("Ts")), None).unwrap();

    // Xuan's queens make a 9-T-J-Q-K straight off the board and crack
    // Phua's set of kings.
    assert_eq!(
        state.stacks,
        vec![489000, 226000, 684000, 400000, 0, 198000],
    );
}

#[test]
fn antonius_blom_largest_online_pot() {
    let automations = [
        Automation::AntePosting,
        Automation::BetCollection,
        Automation::BlindOrStraddlePosting,
        Automation::HoleCardsShowingOrMucking,
        Automation::HandKilling,
        Automation::ChipsPushing,
        Automation::ChipsPulling,
    ];

    let mut state = PotLimitOmahaHoldem::create_state(
        &automations,
        true,
        raw(&[]),
        raw(&[(0, 50000), (1, 100000)]),
        2000,
        raw(&[(0, 125945025), (1, 67847350)]),
        2,
        Mode::CashGame,
    )
    .unwrap();

    state.deal_hole(Some(cards("Ah3sKsKh")), Some(0), None).unwrap(); // Antonius
    state.deal_hole(Some(cards("6d9s7d8h")), Some(1), None).unwrap(); // Blom

    // Heads-up swaps who receives which blind, so Blom (the small blind)
    // acts first preflop.
    state.complete_bet_or_raise_to(Some(300000), None).unwrap(); // Blom
    state.complete_bet_or_raise_to(Some(900000), None).unwrap(); // Antonius
    state.complete_bet_or_raise_to(Some(2700000), None).unwrap(); // Blom
    state.complete_bet_or_raise_to(Some(8100000), None).unwrap(); // Antonius
    state.check_or_call(None).unwrap(); // Blom

    state.burn_card(None, None).unwrap();
    state.deal_board(Some(cards("4s5c2h")), None).unwrap();

    state.complete_bet_or_raise_to(Some(9100000), None).unwrap(); // Antonius
    state.complete_bet_or_raise_to(Some(43500000), None).unwrap(); // Blom
    state.complete_bet_or_raise_to(Some(77900000), None).unwrap(); // Antonius
    state.check_or_call(None).unwrap(); // Blom, all-in

    state.burn_card(None, None).unwrap();
    state.deal_board(Some(cards("5h")), None).unwrap();

    state.burn_card(None, None).unwrap();
    state.deal_board(Some(cards("9c")), None).unwrap();

    assert_eq!(state.stacks, vec![193792375, 0]);
}

#[test]
fn yockey_arieh_triple_draw_bad_beat() {
    let automations = [
        Automation::AntePosting,
        Automation::BetCollection,
        Automation::BlindOrStraddlePosting,
        Automation::HoleCardsShowingOrMucking,
        Automation::HandKilling,
        Automation::ChipsPushing,
        Automation::ChipsPulling,
    ];

    let mut state = FixedLimitDeuceToSevenLowballTripleDraw::create_state(
        &automations,
        true,
        raw(&[]),
        raw(&[(0, 75000), (1, 150000)]),
        150000,
        300000,
        raw(&[(0, 1180000), (1, 4340000), (2, 5910000), (3, 10765000)]),
        4,
        Mode::CashGame,
    )
    .unwrap();

    state.deal_hole(Some(cards("7h6c4c3d2c")), Some(0), None).unwrap(); // Yockey
    deal_unknown(&mut state, 1, 5); // Hui, folds before any draw
    deal_unknown(&mut state, 2, 5); // Esposito, folds before any draw
    state.deal_hole(Some(cards("AsQs6s5c3c")), Some(3), None).unwrap(); // Arieh

    state.fold(None).unwrap(); // Esposito
    state.complete_bet_or_raise_to(None, None).unwrap(); // Arieh
    state.complete_bet_or_raise_to(None, None).unwrap(); // Yockey
    state.fold(None).unwrap(); // Hui
    state.check_or_call(None).unwrap(); // Arieh

    state.stand_pat_or_discard(None, None).unwrap(); // Yockey stands pat
    state.stand_pat_or_discard(Some(cards("AsQs")), None).unwrap(); // Arieh
    state.burn_card(None, None).unwrap();
    state.deal_hole(Some(cards("2hQh")), Some(3), None).unwrap(); // Arieh

    state.complete_bet_or_raise_to(None, None).unwrap(); // Yockey
    state.check_or_call(None).unwrap(); // Arieh

    state.stand_pat_or_discard(None, None).unwrap(); // Yockey stands pat
    state.stand_pat_or_discard(Some(cards("Qh")), None).unwrap(); // Arieh
    state.burn_card(None, None).unwrap();
    state.deal_hole(Some(cards("4d")), Some(3), None).unwrap(); // Arieh

    state.complete_bet_or_raise_to(None, None).unwrap(); // Yockey
    state.check_or_call(None).unwrap(); // Arieh

    state.stand_pat_or_discard(None, None).unwrap(); // Yockey stands pat
    state.stand_pat_or_discard(Some(cards("6s")), None).unwrap(); // Arieh
    state.burn_card(None, None).unwrap();
    state.deal_hole(Some(cards("7c")), Some(3), None).unwrap(); // Arieh

    state.complete_bet_or_raise_to(None, None).unwrap(); // Yockey
    state.check_or_call(None).unwrap(); // Arieh

    // Yockey stands pat the whole hand on 7-6-4-3-2, one of the best
    // possible low hands, and still loses to Arieh's rivered nut 7-5-4-3-2.
    assert_eq!(state.stacks, vec![0, 4190000, 5910000, 12095000]);
}

#[test]
fn alice_carol_badugi_showdown() {
    let automations = [
        Automation::AntePosting,
        Automation::BetCollection,
        Automation::BlindOrStraddlePosting,
        Automation::HandKilling,
        Automation::ChipsPushing,
        Automation::ChipsPulling,
    ];

    let mut state = FixedLimitBadugi::create_state(
        &automations,
        true,
        raw(&[]),
        raw(&[(0, 1), (1, 2)]),
        2,
        4,
        raw(&[(0, 200), (1, 200), (2, 200), (3, 200)]),
        4,
        Mode::CashGame,
    )
    .unwrap();

    deal_unknown(&mut state, 0, 4); // Bob, folds before showdown
    state.deal_hole(Some(cards("3s5d2c4d")), Some(1), None).unwrap(); // Carol
    deal_unknown(&mut state, 2, 4); // Ted, folds preflop
    state.deal_hole(Some(cards("2s4c2d4h")), Some(3), None).unwrap(); // Alice

    state.fold(None).unwrap(); // Ted
    state.check_or_call(None).unwrap(); // Alice
    state.check_or_call(None).unwrap(); // Bob
    state.check_or_call(None).unwrap(); // Carol

    // First draw.
    state.stand_pat_or_discard(None, None).unwrap(); // Bob, cards don't matter
    state.stand_pat_or_discard(Some(cards("2c4d")), None).unwrap(); // Carol
    state.stand_pat_or_discard(Some(cards("2d")), None).unwrap(); // Alice
    state.burn_card(None, None).unwrap();
    state.deal_hole(Some(cards("7c6h")), Some(1), None).unwrap(); // Carol
    state.deal_hole(Some(cards("6d")), Some(3), None).unwrap(); // Alice

    state.check_or_call(None).unwrap(); // Bob
    state.complete_bet_or_raise_to(None, None).unwrap(); // Carol
    state.check_or_call(None).unwrap(); // Alice
    state.check_or_call(None).unwrap(); // Bob

    // Second draw.
    state.stand_pat_or_discard(None, None).unwrap(); // Bob
    state.stand_pat_or_discard(None, None).unwrap(); // Carol stands pat
    state.stand_pat_or_discard(Some(cards("4h")), None).unwrap(); // Alice
    state.burn_card(None, None).unwrap();
    state.deal_hole(Some(cards("9h")), Some(3), None).unwrap(); // Alice

    state.check_or_call(None).unwrap(); // Bob
    state.complete_bet_or_raise_to(None, None).unwrap(); // Carol
    state.complete_bet_or_raise_to(None, None).unwrap(); // Alice
    state.fold(None).unwrap(); // Bob
    state.check_or_call(None).unwrap(); // Carol

    // Third draw.
    state.stand_pat_or_discard(Some(cards("6h")), None).unwrap(); // Carol
    state.stand_pat_or_discard(None, None).unwrap(); // Alice stands pat
    state.burn_card(None, None).unwrap();
    state.deal_hole(Some(cards("8h")), Some(1), None).unwrap(); // Carol

    state.check_or_call(None).unwrap(); // Carol
    state.complete_bet_or_raise_to(None, None).unwrap(); // Alice
    state.check_or_call(None).unwrap(); // Carol

    state.show_or_muck_hole_cards(Some(true), None).unwrap(); // Alice: 2s4c6d9h
    state.show_or_muck_hole_cards(Some(true), None).unwrap(); // Carol: 3s5d7c8h, the better badugi

    assert_eq!(state.stacks, vec![196, 220, 200, 184]);
}

#[test]
fn kuhn_poker_bet_and_fold() {
    let automations = [
        Automation::AntePosting,
        Automation::BetCollection,
        Automation::BlindOrStraddlePosting,
        Automation::HoleDealing,
        Automation::HoleCardsShowingOrMucking,
        Automation::HandKilling,
        Automation::ChipsPushing,
        Automation::ChipsPulling,
    ];

    let mut state = KuhnPoker::create_state(&automations, raw(&[(0, 2), (1, 2)])).unwrap();

    state.check_or_call(None).unwrap(); // Player 0 checks
    state.complete_bet_or_raise_to(None, None).unwrap(); // Player 1 bets 1
    state.fold(None).unwrap(); // Player 0 folds

    assert_eq!(state.stacks, vec![1, 3]);
}
