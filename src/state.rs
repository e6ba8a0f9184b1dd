//! The core poker state machine: a single hand driven street by street from
//! ante posting through chip pulling.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::error::{PokerError, PokerResult};
use crate::hands::{EvaluatedHand, HandType};
use crate::lookups::{HIGH_HAND_OPENING_LOOKUP, LOW_HAND_OPENING_LOOKUP};
use crate::utilities::{clean_values, div_mod, rake, rotated, shuffled, Card, Deck, RankOrder};
use log::{debug, warn};
use strum_macros::{Display, EnumString};

/// How much a player may raise to on a given street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum BettingStructure {
    #[strum(serialize = "Fixed-limit")]
    FixedLimit,
    #[strum(serialize = "Pot-limit")]
    PotLimit,
    #[strum(serialize = "No-limit")]
    NoLimit,
}

/// Who opens the betting on a street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Opening {
    Position,
    LowCard,
    HighCard,
    LowHand,
    HighHand,
}

/// Phases of the state machine that can be driven automatically instead of
/// requiring an explicit caller action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum Automation {
    AntePosting,
    BetCollection,
    BlindOrStraddlePosting,
    CardBurning,
    HoleDealing,
    BoardDealing,
    HoleCardsShowingOrMucking,
    HandKilling,
    ChipsPushing,
    ChipsPulling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Mode {
    Tournament,
    #[strum(serialize = "Cash-game")]
    CashGame,
}

/// A single betting round's configuration: what gets dealt or discarded
/// before it, and how betting on it is bounded.
#[derive(Debug, Clone)]
pub struct Street {
    pub card_burning_status: bool,
    pub hole_dealing_statuses: Vec<bool>,
    pub board_dealing_count: usize,
    pub draw_status: bool,
    pub opening: Opening,
    pub min_completion_betting_or_raising_amount: i64,
    pub max_completion_betting_or_raising_count: Option<usize>,
}

impl Street {
    pub fn new(
        card_burning_status: bool,
        hole_dealing_statuses: Vec<bool>,
        board_dealing_count: usize,
        draw_status: bool,
        opening: Opening,
        min_completion_betting_or_raising_amount: i64,
        max_completion_betting_or_raising_count: Option<usize>,
    ) -> PokerResult<Self> {
        if hole_dealing_statuses.is_empty() && board_dealing_count == 0 && !draw_status {
            return Err(PokerError::InvalidConfiguration(
                "a street must deal at least one hole card, one board card, or allow drawing"
                    .to_string(),
            ));
        }
        if !hole_dealing_statuses.is_empty() && draw_status {
            return Err(PokerError::InvalidConfiguration(
                "only one of hole dealing or drawing is permitted on a street".to_string(),
            ));
        }
        if min_completion_betting_or_raising_amount <= 0 {
            return Err(PokerError::InvalidConfiguration(
                "non-positive minimum completion, betting, or raising amount".to_string(),
            ));
        }
        Ok(Self {
            card_burning_status,
            hole_dealing_statuses,
            board_dealing_count,
            draw_status,
            opening,
            min_completion_betting_or_raising_amount,
            max_completion_betting_or_raising_count,
        })
    }
}

/// A main pot or a side pot.
#[derive(Debug, Clone)]
pub struct Pot {
    pub raked_amount: i64,
    pub unraked_amount: i64,
    pub player_indices: Vec<usize>,
}

impl Pot {
    pub fn amount(&self) -> i64 {
        self.raked_amount + self.unraked_amount
    }
}

#[derive(Debug, Clone)]
pub enum Operation {
    AntePosting(AntePosting),
    BetCollection(BetCollection),
    BlindOrStraddlePosting(BlindOrStraddlePosting),
    CardBurning(CardBurning),
    HoleDealing(HoleDealing),
    BoardDealing(BoardDealing),
    StandingPatOrDiscarding(StandingPatOrDiscarding),
    Folding(Folding),
    CheckingOrCalling(CheckingOrCalling),
    BringInPosting(BringInPosting),
    CompletionBettingOrRaisingTo(CompletionBettingOrRaisingTo),
    HoleCardsShowingOrMucking(HoleCardsShowingOrMucking),
    HandKilling(HandKilling),
    ChipsPushing(ChipsPushing),
    ChipsPulling(ChipsPulling),
    NoOperation(NoOperation),
}

#[derive(Debug, Clone)] pub struct AntePosting { pub player_index: usize, pub amount: i64, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct BetCollection { pub bets: Vec<i64>, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct BlindOrStraddlePosting { pub player_index: usize, pub amount: i64, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct CardBurning { pub card: Card, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct HoleDealing { pub player_index: usize, pub cards: Vec<Card>, pub statuses: Vec<bool>, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct BoardDealing { pub cards: Vec<Card>, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct StandingPatOrDiscarding { pub player_index: usize, pub cards: Vec<Card>, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct Folding { pub player_index: usize, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct CheckingOrCalling { pub player_index: usize, pub amount: i64, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct BringInPosting { pub player_index: usize, pub amount: i64, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct CompletionBettingOrRaisingTo { pub player_index: usize, pub amount: i64, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct HoleCardsShowingOrMucking { pub player_index: usize, pub status: bool, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct HandKilling { pub player_index: usize, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct ChipsPushing { pub amounts: Vec<i64>, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct ChipsPulling { pub player_index: usize, pub amount: i64, pub commentary: Option<String> }
#[derive(Debug, Clone)] pub struct NoOperation { pub commentary: Option<String> }

/// Drives a single hand through its entire lifecycle: antes, blinds,
/// dealing, betting rounds, showdown, and chip settlement.
///
/// Every public mutator either automates the current phase when the
/// corresponding [`Automation`] is enabled, or exposes the manual action so
/// a caller (or a UI) can drive the hand card-by-card and action-by-action.
pub struct State {
    // Configuration, fixed for the life of the hand.
    pub automations: HashSet<Automation>,
    pub deck: Vec<Card>,
    pub hand_types: Vec<HandType>,
    pub streets: Vec<Street>,
    pub betting_structure: BettingStructure,
    pub ante_trimming_status: bool,
    pub antes: Vec<i64>,
    pub blinds_or_straddles: Vec<i64>,
    pub bring_in: i64,
    pub starting_stacks: Vec<i64>,
    pub mode: Mode,
    pub divmod: fn(i64, i64) -> (i64, i64),
    pub rake: fn(&State, i64) -> (i64, i64),

    // Cards and chips.
    pub deck_cards: VecDeque<Card>,
    pub board_cards: Vec<Card>,
    pub mucked_cards: Vec<Card>,
    pub burned_cards: Vec<Card>,
    pub statuses: Vec<bool>,
    pub bets: Vec<i64>,
    pub stacks: Vec<i64>,
    pub hole_cards: Vec<Vec<Card>>,
    pub hole_card_statuses: Vec<Vec<bool>>,
    pub discarded_cards: Vec<Vec<Card>>,
    pub street_index: Option<usize>,
    pub status: bool,
    pub operations: Vec<Operation>,

    // Phase-specific bookkeeping.
    pub ante_posting_statuses: Vec<bool>,
    pub bet_collection_status: bool,
    pub blind_or_straddle_posting_statuses: Vec<bool>,
    pub card_burning_status: bool,
    pub hole_dealing_statuses: Vec<VecDeque<bool>>,
    pub board_dealing_count: usize,
    pub standing_pat_or_discarding_statuses: Vec<bool>,
    pub actor_indices: VecDeque<usize>,
    pub opener_index: Option<usize>,
    pub bring_in_status: bool,
    pub completion_status: bool,
    pub completion_betting_or_raising_amount: i64,
    pub completion_betting_or_raising_count: usize,
    pub showdown_indices: VecDeque<usize>,
    pub hand_killing_statuses: Vec<bool>,
    pub chips_pushing_status: bool,
    pub chips_pulling_statuses: Vec<bool>,
}

pub struct StateBuilder {
    automations: HashSet<Automation>,
    deck: Vec<Card>,
    hand_types: Vec<HandType>,
    streets: Vec<Street>,
    betting_structure: BettingStructure,
    ante_trimming_status: bool,
    raw_antes: BTreeMap<usize, i64>,
    raw_blinds_or_straddles: BTreeMap<usize, i64>,
    bring_in: i64,
    raw_starting_stacks: BTreeMap<usize, i64>,
    player_count: usize,
    mode: Mode,
    divmod: fn(i64, i64) -> (i64, i64),
    rake: fn(&State, i64) -> (i64, i64),
}

impl StateBuilder {
    pub fn new(player_count: usize) -> Self {
        Self {
            automations: HashSet::new(),
            deck: Deck::standard(),
            hand_types: vec![HandType::StandardHighHand],
            streets: Vec::new(),
            betting_structure: BettingStructure::NoLimit,
            ante_trimming_status: true,
            raw_antes: BTreeMap::new(),
            raw_blinds_or_straddles: BTreeMap::new(),
            bring_in: 0,
            raw_starting_stacks: BTreeMap::new(),
            player_count,
            mode: Mode::Tournament,
            divmod: div_mod,
            rake,
        }
    }

    pub fn automations(mut self, automations: &[Automation]) -> Self { self.automations = automations.iter().cloned().collect(); self }
    pub fn deck(mut self, deck: Vec<Card>) -> Self { self.deck = deck; self }
    pub fn hand_types(mut self, hand_types: Vec<HandType>) -> Self { self.hand_types = hand_types; self }
    pub fn streets(mut self, streets: Vec<Street>) -> Self { self.streets = streets; self }
    pub fn betting_structure(mut self, betting_structure: BettingStructure) -> Self { self.betting_structure = betting_structure; self }
    pub fn ante_trimming_status(mut self, ante_trimming_status: bool) -> Self { self.ante_trimming_status = ante_trimming_status; self }
    pub fn raw_antes(mut self, raw_antes: BTreeMap<usize, i64>) -> Self { self.raw_antes = raw_antes; self }
    pub fn raw_blinds_or_straddles(mut self, raw_blinds_or_straddles: BTreeMap<usize, i64>) -> Self { self.raw_blinds_or_straddles = raw_blinds_or_straddles; self }
    pub fn bring_in(mut self, bring_in: i64) -> Self { self.bring_in = bring_in; self }
    pub fn raw_starting_stacks(mut self, raw_starting_stacks: BTreeMap<usize, i64>) -> Self { self.raw_starting_stacks = raw_starting_stacks; self }
    pub fn mode(mut self, mode: Mode) -> Self { self.mode = mode; self }

    pub fn build(self) -> PokerResult<State> {
        if self.player_count < 2 {
            return Err(PokerError::InvalidConfiguration("player count must be at least 2".to_string()));
        }
        if self.streets.is_empty() {
            return Err(PokerError::InvalidConfiguration("streets cannot be empty".to_string()));
        }

        let antes = clean_values(&self.raw_antes, self.player_count);
        let blinds_or_straddles = clean_values(&self.raw_blinds_or_straddles, self.player_count);
        let starting_stacks = clean_values(&self.raw_starting_stacks, self.player_count);
        if starting_stacks.iter().any(|&s| s <= 0) {
            return Err(PokerError::InvalidConfiguration("every starting stack must be positive".to_string()));
        }

        let mut state = State {
            automations: self.automations,
            deck: self.deck.clone(),
            hand_types: self.hand_types,
            streets: self.streets,
            betting_structure: self.betting_structure,
            ante_trimming_status: self.ante_trimming_status,
            antes,
            blinds_or_straddles,
            bring_in: self.bring_in,
            starting_stacks: starting_stacks.clone(),
            mode: self.mode,
            divmod: self.divmod,
            rake: self.rake,
            deck_cards: VecDeque::from(shuffled(&self.deck)),
            board_cards: Vec::new(),
            mucked_cards: Vec::new(),
            burned_cards: Vec::new(),
            statuses: vec![true; self.player_count],
            bets: vec![0; self.player_count],
            stacks: starting_stacks,
            hole_cards: vec![Vec::new(); self.player_count],
            hole_card_statuses: vec![Vec::new(); self.player_count],
            discarded_cards: vec![Vec::new(); self.player_count],
            street_index: None,
            status: true,
            operations: Vec::new(),
            ante_posting_statuses: vec![false; self.player_count],
            bet_collection_status: false,
            blind_or_straddle_posting_statuses: vec![false; self.player_count],
            card_burning_status: false,
            hole_dealing_statuses: vec![VecDeque::new(); self.player_count],
            board_dealing_count: 0,
            standing_pat_or_discarding_statuses: vec![false; self.player_count],
            actor_indices: VecDeque::new(),
            opener_index: None,
            bring_in_status: false,
            completion_status: false,
            completion_betting_or_raising_amount: 0,
            completion_betting_or_raising_count: 0,
            showdown_indices: VecDeque::new(),
            hand_killing_statuses: vec![false; self.player_count],
            chips_pushing_status: false,
            chips_pulling_statuses: vec![false; self.player_count],
        };

        state.begin();
        Ok(state)
    }
}

impl State {
    pub fn player_count(&self) -> usize {
        self.starting_stacks.len()
    }

    pub fn player_indices(&self) -> impl Iterator<Item = usize> {
        0..self.player_count()
    }

    fn max_bet(&self) -> i64 {
        self.bets.iter().copied().max().unwrap_or(0)
    }

    fn street(&self) -> Option<&Street> {
        self.street_index.map(|i| &self.streets[i])
    }

    // --- Top-level lifecycle -------------------------------------------------

    fn begin(&mut self) {
        self.begin_ante_posting();
    }

    fn end(&mut self) {
        self.status = false;
    }

    // --- Ante posting ---------------------------------------------------------

    fn begin_ante_posting(&mut self) {
        debug!("entering ante posting");
        for i in self.player_indices() {
            self.ante_posting_statuses[i] = self.get_effective_ante(i) > 0;
        }
        self.run_ante_posting_automation();
    }

    fn run_ante_posting_automation(&mut self) {
        if self.automations.contains(&Automation::AntePosting) {
            while let Some(i) = self.ante_poster_indices().next() {
                self.post_ante(Some(i), None).unwrap();
            }
        }
        if !self.ante_posting_statuses.iter().any(|&s| s) {
            self.end_ante_posting();
        }
    }

    fn end_ante_posting(&mut self) {
        self.begin_bet_collection();
    }

    pub fn ante_poster_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.player_indices().filter(move |&i| self.ante_posting_statuses[i])
    }

    pub fn get_effective_ante(&self, player_index: usize) -> i64 {
        self.antes[player_index].min(self.starting_stacks[player_index])
    }

    pub fn post_ante(&mut self, player_index: Option<usize>, commentary: Option<String>) -> PokerResult<AntePosting> {
        let player_index = match player_index {
            Some(i) => i,
            None => self.ante_poster_indices().next().ok_or_else(|| PokerError::InvalidAction("no player can post an ante".to_string()))?,
        };
        if !self.ante_posting_statuses[player_index] {
            return Err(PokerError::InvalidAction("player cannot post an ante".to_string()));
        }

        let amount = self.get_effective_ante(player_index);
        self.ante_posting_statuses[player_index] = false;
        self.bets[player_index] += amount;
        self.stacks[player_index] -= amount;

        let op = AntePosting { player_index, amount, commentary };
        self.operations.push(Operation::AntePosting(op.clone()));
        if !self.ante_posting_statuses.iter().any(|&s| s) {
            self.end_ante_posting();
        }
        Ok(op)
    }

    // --- Bet collection ---------------------------------------------------------

    fn begin_bet_collection(&mut self) {
        debug!("entering bet collection");
        self.bet_collection_status = self.bets.iter().any(|&b| b > 0);
        self.run_bet_collection_automation();
    }

    fn run_bet_collection_automation(&mut self) {
        if self.automations.contains(&Automation::BetCollection) && self.bet_collection_status {
            self.collect_bets(None).unwrap();
        }
        if !self.bet_collection_status {
            self.end_bet_collection();
        }
    }

    fn end_bet_collection(&mut self) {
        if self.statuses.iter().filter(|&&s| s).count() <= 1 {
            self.begin_chips_pushing();
        } else if self.street_index.is_none() {
            self.begin_blind_or_straddle_posting();
        } else if self.street_index == Some(self.streets.len() - 1) {
            self.begin_showdown();
        } else {
            self.begin_dealing();
        }
    }

    /// Matches `collect_bets`: trims every bet down to the second-highest
    /// bet on the table (refunding the excess), except on the very first
    /// bet collection of a hand (no street yet, no ante trimming) where
    /// nothing has been wagered unevenly enough to need it. When only one
    /// player remains active, that player's bet is left uncollected — it is
    /// picked up directly by `push_chips` instead.
    pub fn collect_bets(&mut self, commentary: Option<String>) -> PokerResult<BetCollection> {
        if !self.bet_collection_status {
            return Err(PokerError::InvalidAction("no bets to collect".to_string()));
        }
        self.bet_collection_status = false;

        let mut player_indices: Vec<usize> = self.player_indices().collect();
        let mut bets = self.bets.clone();

        if self.statuses.iter().filter(|&&s| s).count() == 1 {
            // The sole remaining player's bet is left exactly where it is:
            // it stays part of their own pot contribution, to be swept back
            // to them (plus everyone else's forfeited bets) by push_chips.
            // Only the reported `bets` snapshot shows it as already collected.
            let player_index = self.statuses.iter().position(|&s| s).unwrap();
            bets[player_index] = 0;
            player_indices.retain(|&i| i != player_index);
        }

        if self.street_index.is_some() || self.ante_trimming_status {
            let mut sorted_bets = self.bets.clone();
            sorted_bets.sort_unstable();
            if sorted_bets.len() >= 2 {
                let cutoff = sorted_bets[sorted_bets.len() - 2];
                for &i in &player_indices {
                    if self.bets[i] > cutoff {
                        self.stacks[i] += self.bets[i] - cutoff;
                        bets[i] = cutoff;
                    }
                }
            }
        }

        for &i in &player_indices {
            self.bets[i] = 0;
        }

        let op = BetCollection { bets, commentary };
        self.operations.push(Operation::BetCollection(op.clone()));
        self.end_bet_collection();
        Ok(op)
    }

    // --- Blind/straddle posting ---------------------------------------------------------

    fn begin_blind_or_straddle_posting(&mut self) {
        debug!("entering blind/straddle posting");
        for i in self.player_indices() {
            self.blind_or_straddle_posting_statuses[i] = self.get_effective_blind_or_straddle(i) > 0;
        }
        self.run_blind_or_straddle_posting_automation();
    }

    fn run_blind_or_straddle_posting_automation(&mut self) {
        if self.automations.contains(&Automation::BlindOrStraddlePosting) {
            while let Some(i) = self.blind_or_straddle_poster_indices().next() {
                self.post_blind_or_straddle(Some(i), None).unwrap();
            }
        }
        if !self.blind_or_straddle_posting_statuses.iter().any(|&s| s) {
            self.end_blind_or_straddle_posting();
        }
    }

    fn end_blind_or_straddle_posting(&mut self) {
        self.begin_dealing();
    }

    pub fn blind_or_straddle_poster_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.player_indices().filter(move |&i| self.blind_or_straddle_posting_statuses[i])
    }

    pub fn get_effective_blind_or_straddle(&self, player_index: usize) -> i64 {
        let n = self.player_count();
        let blind = if n == 2 {
            self.blinds_or_straddles[1 - player_index].abs()
        } else {
            self.blinds_or_straddles[player_index].abs()
        };
        blind.min(self.starting_stacks[player_index] - self.get_effective_ante(player_index))
    }

    pub fn post_blind_or_straddle(&mut self, player_index: Option<usize>, commentary: Option<String>) -> PokerResult<BlindOrStraddlePosting> {
        let player_index = match player_index {
            Some(i) => i,
            None => self.blind_or_straddle_poster_indices().next().ok_or_else(|| PokerError::InvalidAction("no player can post a blind or straddle".to_string()))?,
        };
        if !self.blind_or_straddle_posting_statuses[player_index] {
            return Err(PokerError::InvalidAction("player cannot post a blind or straddle".to_string()));
        }

        let amount = self.get_effective_blind_or_straddle(player_index);
        self.blind_or_straddle_posting_statuses[player_index] = false;
        self.bets[player_index] += amount;
        self.stacks[player_index] -= amount;

        let op = BlindOrStraddlePosting { player_index, amount, commentary };
        self.operations.push(Operation::BlindOrStraddlePosting(op.clone()));
        if !self.blind_or_straddle_posting_statuses.iter().any(|&s| s) {
            self.end_blind_or_straddle_posting();
        }
        Ok(op)
    }

    // --- Dealing ---------------------------------------------------------

    fn begin_dealing(&mut self) {
        debug!("entering dealing for the next street");
        let new_street_index = self.street_index.map_or(0, |i| i + 1);
        self.street_index = Some(new_street_index);
        let street = self.streets[new_street_index].clone();

        self.card_burning_status = street.card_burning_status;
        for i in self.player_indices() {
            if self.statuses[i] {
                self.hole_dealing_statuses[i].extend(street.hole_dealing_statuses.iter());
                self.standing_pat_or_discarding_statuses[i] = street.draw_status;
            }
        }
        self.board_dealing_count = street.board_dealing_count;

        if !self.card_burning_status
            && !self.hole_dealing_statuses.iter().any(|q| !q.is_empty())
            && self.board_dealing_count == 0
        {
            self.end_dealing();
        } else {
            self.run_dealing_automation();
        }
    }

    fn run_dealing_automation(&mut self) {
        if self.automations.contains(&Automation::CardBurning) && self.can_burn_card(None) {
            self.burn_card(None, None).unwrap();
        } else if self.automations.contains(&Automation::HoleDealing) {
            while self.hole_dealee_index().is_some() {
                self.deal_hole(None, None, None).unwrap();
            }
            if self.automations.contains(&Automation::BoardDealing) {
                while self.board_dealing_count > 0 {
                    self.deal_board(None, None).unwrap();
                }
            }
        } else if self.automations.contains(&Automation::BoardDealing) {
            while self.board_dealing_count > 0 {
                self.deal_board(None, None).unwrap();
            }
        }
    }

    fn end_dealing(&mut self) {
        self.begin_betting();
    }

    fn dealing_pending(&self) -> bool {
        self.card_burning_status
            || self.hole_dealing_statuses.iter().any(|q| !q.is_empty())
            || self.board_dealing_count > 0
            || self.standing_pat_or_discarding_statuses.iter().any(|&s| s)
    }

    /// Swaps `cards` into place as if they had been the next cards drawn
    /// from the deck, so a replay can deal specific cards deterministically:
    /// a burned card is swapped back in, anything else is simply removed
    /// from the remaining deck.
    fn make_card_available(&mut self, cards: &[Card]) -> PokerResult<()> {
        for &card in cards {
            if let Some(pos) = self.burned_cards.iter().position(|&c| c == card) {
                self.burned_cards.remove(pos);
                if let Some(front) = self.deck_cards.pop_front() {
                    self.burned_cards.push(front);
                }
            } else if let Some(pos) = self.deck_cards.iter().position(|&c| c == card) {
                self.deck_cards.remove(pos);
            } else {
                return Err(PokerError::InvalidCard(format!("{} is not available to be dealt", card)));
            }
        }
        Ok(())
    }

    pub fn can_burn_card(&self, _card: Option<Card>) -> bool {
        self.card_burning_status
    }

    pub fn burn_card(&mut self, card: Option<Card>, commentary: Option<String>) -> PokerResult<CardBurning> {
        if !self.can_burn_card(card) {
            return Err(PokerError::InvalidAction("no card to be burned".to_string()));
        }
        let card = match card {
            Some(c) => { self.make_card_available(&[c])?; c }
            None => self.deck_cards.pop_front().ok_or_else(|| PokerError::InvalidCard("deck is empty".to_string()))?,
        };
        self.card_burning_status = false;
        self.burned_cards.push(card);

        let op = CardBurning { card, commentary };
        self.operations.push(Operation::CardBurning(op.clone()));
        if !self.dealing_pending() {
            self.end_dealing();
        }
        Ok(op)
    }

    /// Mirrors `hole_dealee_index`: while the street's fixed hole-dealing
    /// schedule is still pending, the player with the most cards left to
    /// receive goes first (ties favor the lower index); once that schedule
    /// is exhausted, redraws during a draw street are served in ascending
    /// player order.
    pub fn hole_dealee_index(&self) -> Option<usize> {
        if self.hole_dealing_statuses.iter().any(|q| !q.is_empty()) {
            self.player_indices()
                .filter(|&i| !self.hole_dealing_statuses[i].is_empty())
                .max_by_key(|&i| (self.hole_dealing_statuses[i].len(), std::cmp::Reverse(i)))
        } else {
            None
        }
    }

    pub fn deal_hole(&mut self, cards: Option<Vec<Card>>, player_index: Option<usize>, commentary: Option<String>) -> PokerResult<HoleDealing> {
        let player_index = match player_index {
            Some(i) => i,
            None => self.hole_dealee_index().ok_or_else(|| PokerError::InvalidAction("no player to deal a hole card to".to_string()))?,
        };
        let num_to_deal = cards.as_ref().map_or(1, |c| c.len());
        if self.hole_dealing_statuses[player_index].len() < num_to_deal {
            return Err(PokerError::InvalidAction("not enough hole cards pending for this player".to_string()));
        }

        let dealt_cards = match cards {
            Some(cards) => { self.make_card_available(&cards)?; cards }
            None => self.deck_cards.drain(..num_to_deal).collect(),
        };
        let mut statuses = Vec::new();
        for &card in &dealt_cards {
            let status = self.hole_dealing_statuses[player_index].pop_front().unwrap();
            self.hole_cards[player_index].push(card);
            self.hole_card_statuses[player_index].push(status);
            statuses.push(status);
        }

        let op = HoleDealing { player_index, cards: dealt_cards, statuses, commentary };
        self.operations.push(Operation::HoleDealing(op.clone()));
        if !self.dealing_pending() {
            self.end_dealing();
        }
        Ok(op)
    }

    pub fn deal_board(&mut self, cards: Option<Vec<Card>>, commentary: Option<String>) -> PokerResult<BoardDealing> {
        if self.board_dealing_count == 0 {
            return Err(PokerError::InvalidAction("no board card to be dealt".to_string()));
        }
        let num_to_deal = cards.as_ref().map_or(1, |c| c.len()).min(self.board_dealing_count);
        let dealt_cards = match cards {
            Some(cards) => { self.make_card_available(&cards)?; cards }
            None => self.deck_cards.drain(..num_to_deal).collect(),
        };
        self.board_dealing_count -= dealt_cards.len();
        self.board_cards.extend(dealt_cards.iter().copied());

        let op = BoardDealing { cards: dealt_cards, commentary };
        self.operations.push(Operation::BoardDealing(op.clone()));
        if !self.dealing_pending() {
            self.end_dealing();
        }
        Ok(op)
    }

    /// The first player (ascending index) still waiting to stand pat or
    /// discard, matching `stander_pat_or_discarder_index`.
    pub fn stander_pat_or_discarder_index(&self) -> Option<usize> {
        self.standing_pat_or_discarding_statuses.iter().position(|&s| s)
    }

    /// Discards re-enter `hole_dealing_statuses` (keeping the discarded
    /// card's old up/down status) so they get redealt exactly like a fresh
    /// hole card.
    pub fn stand_pat_or_discard(&mut self, cards: Option<Vec<Card>>, commentary: Option<String>) -> PokerResult<StandingPatOrDiscarding> {
        let player_index = self.stander_pat_or_discarder_index().ok_or_else(|| PokerError::InvalidAction("no player can stand pat or discard".to_string()))?;
        let cards = cards.unwrap_or_default();

        self.standing_pat_or_discarding_statuses[player_index] = false;
        for &card in &cards {
            let pos = self.hole_cards[player_index]
                .iter()
                .position(|&c| c == card)
                .ok_or_else(|| PokerError::InvalidCard(format!("{} is not one of the player's hole cards", card)))?;
            let status = self.hole_card_statuses[player_index].remove(pos);
            self.hole_cards[player_index].remove(pos);
            self.discarded_cards[player_index].push(card);
            self.hole_dealing_statuses[player_index].push_back(status);
        }

        let op = StandingPatOrDiscarding { player_index, cards, commentary };
        self.operations.push(Operation::StandingPatOrDiscarding(op.clone()));

        if !self.dealing_pending() {
            self.end_dealing();
        } else if self.automations.contains(&Automation::HoleDealing) {
            while self.hole_dealee_index().is_some() {
                self.deal_hole(None, None, None).unwrap();
            }
        }
        Ok(op)
    }

    // --- Betting ---------------------------------------------------------

    fn begin_betting(&mut self) {
        debug!("entering betting on street {:?}", self.street_index);
        self.opener_index = None;
        self.completion_betting_or_raising_amount = 0;
        self.completion_betting_or_raising_count = 0;

        let street = self.street().unwrap().clone();
        let n = self.player_count();

        let opener_index = match street.opening {
            Opening::Position => {
                let max_bet_index = self.player_indices().max_by_key(|&i| (self.bets[i], i)).unwrap();
                (max_bet_index + 1) % n
            }
            Opening::LowCard => {
                let key = |card: &Card| (RankOrder::STANDARD.iter().position(|&r| r == card.rank).unwrap(), card.suit);
                let min_up_cards: Vec<Option<Card>> = self
                    .player_indices()
                    .map(|i| self.get_up_cards(i).into_iter().min_by_key(|c| key(c)))
                    .collect();
                let best = min_up_cards.iter().flatten().min_by_key(|c| key(c)).copied();
                min_up_cards.iter().position(|c| *c == best).unwrap()
            }
            Opening::HighCard => {
                let key = |card: &Card| (RankOrder::REGULAR.iter().position(|&r| r == card.rank).unwrap(), card.suit);
                let max_up_cards: Vec<Option<Card>> = self
                    .player_indices()
                    .map(|i| self.get_up_cards(i).into_iter().max_by_key(|c| key(c)))
                    .collect();
                let best = max_up_cards.iter().flatten().max_by_key(|c| key(c)).copied();
                max_up_cards.iter().position(|c| *c == best).unwrap()
            }
            Opening::LowHand => {
                let entries: Vec<_> = self.player_indices().map(|i| LOW_HAND_OPENING_LOOKUP.get_entry_or_none(&self.get_up_cards(i))).collect();
                let best = entries.iter().flatten().min().copied();
                entries.iter().position(|e| *e == best).unwrap()
            }
            Opening::HighHand => {
                let entries: Vec<_> = self.player_indices().map(|i| HIGH_HAND_OPENING_LOOKUP.get_entry_or_none(&self.get_up_cards(i))).collect();
                let best = entries.iter().flatten().max().copied();
                entries.iter().position(|e| *e == best).unwrap()
            }
        };

        self.opener_index = Some(opener_index);
        self.bring_in_status = self.street_index == Some(0) && self.bring_in > 0;
        self.completion_status = self.bring_in_status;

        let mut actor_indices = rotated(&(0..n).collect::<Vec<_>>(), -(opener_index as isize));
        actor_indices.retain(|&i| self.statuses[i] && self.stacks[i] > 0 && self.get_effective_stack(i) > 0);
        self.actor_indices = actor_indices;

        if self.actor_indices.is_empty()
            || (self.actor_indices.len() == 1 && self.bets[self.actor_indices[0]] >= self.max_bet())
        {
            self.end_betting();
        }
    }

    /// Matches `_end_betting`: forces everyone still active to show their
    /// hole cards when betting can no longer change who is drawing live,
    /// either because at most one non-all-in player remains with no future
    /// draw street, or because the hand reached its last street with
    /// somebody all in.
    fn end_betting(&mut self) {
        self.actor_indices.clear();

        let street_index = self.street_index.unwrap();
        let active = self.statuses.iter().filter(|&&s| s).count();
        let no_future_draw = !self.streets[street_index + 1..].iter().any(|s| s.draw_status);
        let mut show = false;

        if active > 1 && no_future_draw {
            let live = self.player_indices().filter(|&i| self.statuses[i] && self.stacks[i] > 0).count();
            if live <= 1 {
                show = true;
            }
        }
        if self.stacks.iter().any(|&s| s == 0) && street_index == self.streets.len() - 1 {
            show = true;
        }

        if show {
            warn!("forcing all hole cards face-up: no further betting can change who is drawing live");
            for i in self.player_indices() {
                if self.statuses[i] {
                    self.show_hole_cards(i);
                }
            }
        }

        self.begin_bet_collection();
    }

    /// The largest amount this player's stack can be forced to contribute:
    /// their own stack, clamped by the second-largest effective stack among
    /// active players (so short stacks can't be raised past all-in).
    pub fn get_effective_stack(&self, player_index: usize) -> i64 {
        if self.street_index.is_none() || !self.statuses[player_index] {
            return 0;
        }
        let mut effective: Vec<i64> = self
            .player_indices()
            .filter(|&i| self.statuses[i])
            .map(|i| self.bets[i] + self.stacks[i])
            .collect();
        effective.sort_unstable();
        if effective.len() < 2 {
            return self.stacks[player_index];
        }
        let second_largest = effective[effective.len() - 2];
        self.stacks[player_index].min((second_largest - self.bets[player_index]).max(0))
    }

    pub fn fold(&mut self, commentary: Option<String>) -> PokerResult<Folding> {
        let player_index = *self.actor_indices.front().ok_or_else(|| PokerError::InvalidAction("no player to act".to_string()))?;
        if self.bring_in_status {
            return Err(PokerError::InvalidAction("bring-in must be posted before folding".to_string()));
        }
        if self.bets[player_index] >= self.max_bet() {
            return Err(PokerError::InvalidAction("redundant fold: player is already matching the largest bet".to_string()));
        }

        self.actor_indices.pop_front();
        self.statuses[player_index] = false;
        self.muck_hole_cards(player_index);

        let op = Folding { player_index, commentary };
        self.operations.push(Operation::Folding(op.clone()));
        if self.actor_indices.is_empty() || self.statuses.iter().filter(|&&s| s).count() <= 1 {
            self.end_betting();
        }
        Ok(op)
    }

    pub fn check_or_call(&mut self, commentary: Option<String>) -> PokerResult<CheckingOrCalling> {
        let player_index = *self.actor_indices.front().ok_or_else(|| PokerError::InvalidAction("no player to act".to_string()))?;
        if self.bring_in_status {
            return Err(PokerError::InvalidAction("bring-in must be posted before checking or calling".to_string()));
        }
        let amount = self.stacks[player_index].min(self.max_bet() - self.bets[player_index]);

        self.actor_indices.pop_front();
        self.stacks[player_index] -= amount;
        self.bets[player_index] += amount;

        let op = CheckingOrCalling { player_index, amount, commentary };
        self.operations.push(Operation::CheckingOrCalling(op.clone()));
        if self.actor_indices.is_empty() {
            self.end_betting();
        }
        Ok(op)
    }

    pub fn post_bring_in(&mut self, commentary: Option<String>) -> PokerResult<BringInPosting> {
        if !self.bring_in_status {
            return Err(PokerError::InvalidAction("bring-in cannot be posted now".to_string()));
        }
        let player_index = *self.actor_indices.front().ok_or_else(|| PokerError::InvalidAction("no player to act".to_string()))?;
        let amount = self.stacks[player_index].min(self.bring_in);

        self.actor_indices.pop_front();
        self.stacks[player_index] -= amount;
        self.bets[player_index] += amount;
        self.bring_in_status = false;

        let op = BringInPosting { player_index, amount, commentary };
        self.operations.push(Operation::BringInPosting(op.clone()));
        Ok(op)
    }

    fn verify_completion_betting_or_raising(&self) -> PokerResult<usize> {
        let player_index = *self.actor_indices.front().ok_or_else(|| PokerError::InvalidAction("no player to act".to_string()))?;
        let street = self.street().unwrap();
        if let Some(max_count) = street.max_completion_betting_or_raising_count {
            if self.completion_betting_or_raising_count >= max_count {
                return Err(PokerError::InvalidAction("no more completion, betting, or raising permitted on this street".to_string()));
            }
        }
        if self.stacks[player_index] <= self.max_bet() - self.bets[player_index] {
            return Err(PokerError::InvalidAction("not enough chips in stack to complete, bet, or raise".to_string()));
        }
        let max_bet = self.max_bet();
        let relevant = self.player_indices().any(|i| i != player_index && self.statuses[i] && self.stacks[i] + self.bets[i] > max_bet);
        if !relevant {
            return Err(PokerError::InvalidAction("irrelevant completion, betting, or raising: no other player could respond".to_string()));
        }
        Ok(player_index)
    }

    pub fn min_completion_betting_or_raising_to_amount(&self) -> PokerResult<i64> {
        let player_index = self.verify_completion_betting_or_raising()?;
        let street = self.street().unwrap();
        let mut amount = self.completion_betting_or_raising_amount.max(street.min_completion_betting_or_raising_amount);
        if !self.completion_status {
            amount += self.max_bet();
        }
        Ok((self.get_effective_stack(player_index) + self.bets[player_index]).min(amount))
    }

    pub fn total_pot_amount(&self) -> i64 {
        self.bets.iter().sum::<i64>() + self.pots().iter().map(|p| p.amount()).sum::<i64>()
    }

    pub fn pot_completion_betting_or_raising_to_amount(&self) -> PokerResult<i64> {
        let player_index = self.verify_completion_betting_or_raising()?;
        let min_amount = self.min_completion_betting_or_raising_to_amount()?;
        let amount = 2 * self.max_bet() - self.bets[player_index] + self.total_pot_amount();
        Ok((self.get_effective_stack(player_index) + self.bets[player_index]).min(min_amount.max(amount)))
    }

    pub fn max_completion_betting_or_raising_to_amount(&self) -> PokerResult<i64> {
        let player_index = self.verify_completion_betting_or_raising()?;
        match self.betting_structure {
            BettingStructure::FixedLimit => self.min_completion_betting_or_raising_to_amount(),
            BettingStructure::PotLimit => self.pot_completion_betting_or_raising_to_amount(),
            BettingStructure::NoLimit => Ok(self.get_effective_stack(player_index) + self.bets[player_index]),
        }
    }

    pub fn complete_bet_or_raise_to(&mut self, amount: Option<i64>, commentary: Option<String>) -> PokerResult<CompletionBettingOrRaisingTo> {
        self.verify_completion_betting_or_raising()?;
        let min_amount = self.min_completion_betting_or_raising_to_amount()?;
        let max_amount = self.max_completion_betting_or_raising_to_amount()?;
        let amount = amount.unwrap_or(min_amount);
        if amount < min_amount {
            return Err(PokerError::InvalidAction(format!("{} is below the minimum completion, betting, or raising amount of {}", amount, min_amount)));
        }
        if amount > max_amount {
            return Err(PokerError::InvalidAction(format!("{} is above the maximum completion, betting, or raising amount of {}", amount, max_amount)));
        }

        let player_index = self.actor_indices.pop_front().unwrap();
        let max_bet = self.max_bet();
        let delta = amount - max_bet;

        self.stacks[player_index] -= amount - self.bets[player_index];
        self.bets[player_index] = amount;
        self.bring_in_status = false;
        self.completion_status = false;
        self.opener_index = Some(player_index);
        self.completion_betting_or_raising_amount = self.completion_betting_or_raising_amount.max(delta);
        self.completion_betting_or_raising_count += 1;

        let n = self.player_count();
        let mut actor_indices = rotated(&(0..n).collect::<Vec<_>>(), -(player_index as isize));
        actor_indices.pop_front();
        actor_indices.retain(|&i| self.statuses[i] && self.stacks[i] > 0);
        self.actor_indices = actor_indices;

        let op = CompletionBettingOrRaisingTo { player_index, amount, commentary };
        self.operations.push(Operation::CompletionBettingOrRaisingTo(op.clone()));
        Ok(op)
    }

    // --- Hand evaluation helpers ---------------------------------------------------------

    pub fn get_down_cards(&self, player_index: usize) -> Vec<Card> {
        self.hole_cards[player_index]
            .iter()
            .zip(self.hole_card_statuses[player_index].iter())
            .filter(|&(_, &status)| !status)
            .map(|(&card, _)| card)
            .collect()
    }

    pub fn get_up_cards(&self, player_index: usize) -> Vec<Card> {
        self.hole_cards[player_index]
            .iter()
            .zip(self.hole_card_statuses[player_index].iter())
            .filter(|&(_, &status)| status)
            .map(|(&card, _)| card)
            .collect()
    }

    pub fn hand_type_indices(&self) -> impl Iterator<Item = usize> {
        0..self.hand_types.len()
    }

    pub fn get_hand(&self, player_index: usize, hand_type_index: usize) -> Option<EvaluatedHand> {
        if !self.statuses[player_index] {
            return None;
        }
        self.hand_types[hand_type_index]
            .from_game(&self.hole_cards[player_index], &self.board_cards)
            .ok()
    }

    pub fn get_up_hand(&self, player_index: usize, hand_type_index: usize) -> Option<EvaluatedHand> {
        if !self.statuses[player_index] {
            return None;
        }
        self.hand_types[hand_type_index]
            .from_game(&self.get_up_cards(player_index), &self.board_cards)
            .ok()
    }

    pub fn get_up_hands(&self, hand_type_index: usize) -> Vec<Option<EvaluatedHand>> {
        self.player_indices().map(|i| self.get_up_hand(i, hand_type_index)).collect()
    }

    /// `true` if this player could still win at least one pot under at
    /// least one of the hand types in play, judged against the best
    /// currently-visible (up-card) hand among the players sharing each pot.
    pub fn can_win_now(&self, player_index: usize) -> bool {
        for i in self.hand_type_indices() {
            let hands = self.get_up_hands(i);
            let hand = self.get_hand(player_index, i);
            for pot in self.pots() {
                let max_hand = pot.player_indices.iter().filter_map(|&j| hands[j].clone()).max();
                if let Some(hand) = &hand {
                    if max_hand.as_ref().map_or(true, |m| m <= hand) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn muck_hole_cards(&mut self, player_index: usize) {
        self.mucked_cards.append(&mut self.hole_cards[player_index]);
        self.hole_card_statuses[player_index].clear();
        self.statuses[player_index] = false;
    }

    fn show_hole_cards(&mut self, player_index: usize) {
        for status in self.hole_card_statuses[player_index].iter_mut() {
            *status = true;
        }
    }

    // --- Showdown ---------------------------------------------------------

    fn begin_showdown(&mut self) {
        debug!("entering showdown");
        self.street_index = None;
        let n = self.player_count();
        let mut indices: VecDeque<usize> = (0..n).collect();
        if let Some(opener_index) = self.opener_index {
            indices = rotated(&indices.into_iter().collect::<Vec<_>>(), -(opener_index as isize));
        }
        indices.retain(|&i| self.statuses[i] && !self.hole_card_statuses[i].iter().all(|&s| s));
        self.showdown_indices = indices;

        if self.showdown_indices.is_empty() {
            self.end_showdown();
        } else if self.automations.contains(&Automation::HoleCardsShowingOrMucking) {
            while !self.showdown_indices.is_empty() {
                self.show_or_muck_hole_cards(None, None).unwrap();
            }
        }
    }

    fn end_showdown(&mut self) {
        self.begin_hand_killing();
    }

    pub fn show_or_muck_hole_cards(&mut self, status: Option<bool>, commentary: Option<String>) -> PokerResult<HoleCardsShowingOrMucking> {
        let player_index = *self.showdown_indices.front().ok_or_else(|| PokerError::InvalidAction("no player to act".to_string()))?;
        let status = status.unwrap_or_else(|| self.can_win_now(player_index));

        self.showdown_indices.pop_front();
        if status {
            self.show_hole_cards(player_index);
        } else {
            self.muck_hole_cards(player_index);
        }

        let op = HoleCardsShowingOrMucking { player_index, status, commentary };
        self.operations.push(Operation::HoleCardsShowingOrMucking(op.clone()));
        if self.showdown_indices.is_empty() {
            self.end_showdown();
        }
        Ok(op)
    }

    // --- Hand killing ---------------------------------------------------------

    fn begin_hand_killing(&mut self) {
        debug!("entering hand killing");
        for i in self.player_indices() {
            if self.statuses[i] {
                self.hand_killing_statuses[i] = !self.can_win_now(i);
            }
        }
        if !self.hand_killing_statuses.iter().any(|&s| s) {
            self.end_hand_killing();
        } else if self.automations.contains(&Automation::HandKilling) {
            while self.hand_killing_statuses.iter().any(|&s| s) {
                let player_index = self.hand_killing_statuses.iter().position(|&s| s).unwrap();
                self.kill_hand(Some(player_index), None).unwrap();
            }
        }
    }

    fn end_hand_killing(&mut self) {
        for s in self.hand_killing_statuses.iter_mut() {
            *s = false;
        }
        self.begin_chips_pushing();
    }

    pub fn kill_hand(&mut self, player_index: Option<usize>, commentary: Option<String>) -> PokerResult<HandKilling> {
        let player_index = match player_index {
            Some(i) => i,
            None => self.hand_killing_statuses.iter().position(|&s| s).ok_or_else(|| PokerError::InvalidAction("no hand can be killed".to_string()))?,
        };
        if !self.hand_killing_statuses[player_index] {
            return Err(PokerError::InvalidAction("this hand cannot be killed".to_string()));
        }
        self.hand_killing_statuses[player_index] = false;
        self.muck_hole_cards(player_index);

        let op = HandKilling { player_index, commentary };
        self.operations.push(Operation::HandKilling(op.clone()));
        if !self.hand_killing_statuses.iter().any(|&s| s) {
            self.end_hand_killing();
        }
        Ok(op)
    }

    // --- Chips pushing ---------------------------------------------------------

    fn begin_chips_pushing(&mut self) {
        debug!("entering chips pushing");
        self.street_index = None;
        self.chips_pushing_status = true;
        if self.automations.contains(&Automation::ChipsPushing) {
            self.push_chips(None).unwrap();
        }
    }

    fn end_chips_pushing(&mut self) {
        self.chips_pushing_status = false;
        self.begin_chips_pulling();
    }

    /// Matches `push_chips`: a single remaining player is paid every pot
    /// directly; otherwise every pot is split among the hand types in play,
    /// each split further divided among the players tied for the best
    /// up-hand of that type sharing that pot. Any remainder from dividing a
    /// pot among tied players goes to the lowest player index; any
    /// remainder from dividing a pot among hand types goes to hand-type
    /// index 0.
    pub fn push_chips(&mut self, commentary: Option<String>) -> PokerResult<ChipsPushing> {
        if !self.chips_pushing_status {
            return Err(PokerError::InvalidAction("chips cannot be pushed now".to_string()));
        }
        self.chips_pushing_status = false;

        if self.statuses.iter().filter(|&&s| s).count() == 1 {
            for pot in self.pots() {
                debug_assert_eq!(pot.player_indices.len(), 1);
                self.bets[pot.player_indices[0]] += pot.amount();
            }
        } else {
            let hand_type_indices: Vec<usize> = self
                .hand_type_indices()
                .filter(|&i| self.get_up_hands(i).iter().any(|h| h.is_some()))
                .collect();
            let hand_type_count = hand_type_indices.len() as i64;

            for pot in self.pots() {
                for &i in &hand_type_indices {
                    let hands = self.get_up_hands(i);
                    let max_hand = pot.player_indices.iter().filter_map(|&j| hands[j].clone()).max();
                    let mut winners: Vec<usize> = pot
                        .player_indices
                        .iter()
                        .copied()
                        .filter(|&j| hands[j] == max_hand)
                        .collect();
                    winners.sort_unstable();

                    let mut amount = pot.amount() / hand_type_count;
                    if i == 0 {
                        amount += pot.amount() % hand_type_count;
                    }
                    let share = amount / winners.len() as i64;
                    for (j, &k) in winners.iter().enumerate() {
                        let mut sub_amount = share;
                        if j == 0 {
                            sub_amount += amount % winners.len() as i64;
                        }
                        self.bets[k] += sub_amount;
                    }
                }
            }
        }

        let op = ChipsPushing { amounts: self.bets.clone(), commentary };
        self.operations.push(Operation::ChipsPushing(op.clone()));
        self.end_chips_pushing();
        Ok(op)
    }

    // --- Chips pulling ---------------------------------------------------------

    fn begin_chips_pulling(&mut self) {
        debug!("entering chips pulling");
        for i in self.player_indices() {
            self.chips_pulling_statuses[i] = self.bets[i] > 0;
        }
        if self.automations.contains(&Automation::ChipsPulling) {
            while self.chips_pulling_statuses.iter().any(|&s| s) {
                let player_index = self.chips_pulling_statuses.iter().position(|&s| s).unwrap();
                self.pull_chips(Some(player_index), None).unwrap();
            }
        }
    }

    fn end_chips_pulling(&mut self) {
        for s in self.chips_pulling_statuses.iter_mut() {
            *s = false;
        }
        self.end();
    }

    pub fn pull_chips(&mut self, player_index: Option<usize>, commentary: Option<String>) -> PokerResult<ChipsPulling> {
        let player_index = match player_index {
            Some(i) => i,
            None => self.chips_pulling_statuses.iter().position(|&s| s).ok_or_else(|| PokerError::InvalidAction("no player has chips to pull".to_string()))?,
        };
        if !self.chips_pulling_statuses[player_index] {
            return Err(PokerError::InvalidAction("this player has no chips to pull".to_string()));
        }

        let amount = self.bets[player_index];
        self.stacks[player_index] += amount;
        self.bets[player_index] = 0;
        self.chips_pulling_statuses[player_index] = false;

        let op = ChipsPulling { player_index, amount, commentary };
        self.operations.push(Operation::ChipsPulling(op.clone()));
        if !self.chips_pulling_statuses.iter().any(|&s| s) {
            self.end_chips_pulling();
        }
        Ok(op)
    }

    // --- Pots ---------------------------------------------------------

    /// Stratifies side pots by contribution level, exactly mirroring the
    /// `pots` property: everyone's total contribution this hand is
    /// `starting_stack - current_stack - current_bet` (plus, when ante
    /// trimming is off, the effective ante folded back in separately since
    /// it was never added to `bets`). Each distinct contribution level forms
    /// its own pot, eligible to every still-active player whose pending
    /// contribution (not yet collected into a bet) reaches that level.
    pub fn pots(&self) -> Vec<Pot> {
        if self.stacks.iter().sum::<i64>() + self.bets.iter().sum::<i64>() == self.starting_stacks.iter().sum::<i64>() {
            return Vec::new();
        }

        let n = self.player_count();
        let mut contributions: Vec<i64> = self.starting_stacks.clone();
        let mut pending_contributions: Vec<i64> = self.starting_stacks.clone();
        let mut amount = 0;

        if self.ante_trimming_status {
            for i in 0..n {
                contributions[i] -= self.bets[i] + self.stacks[i];
                pending_contributions[i] -= self.stacks[i];
            }
        } else {
            let mut total_ante = 0;
            for i in 0..n {
                let ante = self.get_effective_ante(i);
                total_ante += ante;
                contributions[i] -= ante + self.bets[i] + self.stacks[i];
                pending_contributions[i] -= ante + self.stacks[i];
            }
            amount = total_ante;
        }

        let mut levels: Vec<i64> = contributions.clone();
        levels.sort_unstable();
        levels.dedup();

        let mut previous_contribution = 0;
        let mut pots = Vec::new();

        for &level in &levels {
            for i in 0..n {
                if contributions[i] >= level {
                    amount += level - previous_contribution;
                }
            }
            let player_indices: Vec<usize> = (0..n)
                .filter(|&i| pending_contributions[i] >= level && self.statuses[i])
                .collect();

            if amount > 0 && !player_indices.is_empty() {
                let (raked, unraked) = (self.rake)(self, amount);
                pots.push(Pot { raked_amount: raked, unraked_amount: unraked, player_indices });
            }
            previous_contribution = level;
            amount = 0;
        }

        pots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heads_up_no_limit() -> State {
        let streets = vec![
            Street::new(false, vec![false, false], 0, false, Opening::Position, 2, None).unwrap(),
            Street::new(false, vec![], 3, false, Opening::Position, 2, None).unwrap(),
        ];
        let mut blinds = BTreeMap::new();
        blinds.insert(0, 1);
        blinds.insert(1, 2);
        let mut stacks = BTreeMap::new();
        stacks.insert(0, 200);
        stacks.insert(1, 200);

        StateBuilder::new(2)
            .automations(&[
                Automation::AntePosting,
                Automation::BetCollection,
                Automation::BlindOrStraddlePosting,
                Automation::HoleDealing,
                Automation::BoardDealing,
                Automation::HoleCardsShowingOrMucking,
                Automation::HandKilling,
                Automation::ChipsPushing,
                Automation::ChipsPulling,
            ])
            .hand_types(vec![HandType::StandardHighHand])
            .streets(streets)
            .betting_structure(BettingStructure::NoLimit)
            .raw_blinds_or_straddles(blinds)
            .raw_starting_stacks(stacks)
            .build()
            .unwrap()
    }

    #[test]
    fn heads_up_blinds_post_and_preflop_actor_is_small_blind() {
        // Heads-up swaps which seat posts which amount (`get_effective_blind_or_straddle`
        // indexes `blinds_or_straddles` by `1 - player_index`), so seat 1 posts the small
        // blind and is the button, acting first preflop.
        let state = heads_up_no_limit();
        assert_eq!(state.bets, vec![2, 1]);
        assert_eq!(state.stacks, vec![198, 199]);
        assert_eq!(*state.actor_indices.front().unwrap(), 1);
    }

    #[test]
    fn fold_ends_hand_and_awards_the_pot_to_the_remaining_player() {
        let mut state = heads_up_no_limit();
        state.fold(None).unwrap();
        assert!(!state.status);
        assert_eq!(state.stacks[0], 201);
        assert_eq!(state.stacks[1], 199);
    }

    #[test]
    fn calling_then_checking_advances_to_the_flop() {
        let mut state = heads_up_no_limit();
        state.check_or_call(None).unwrap();
        state.check_or_call(None).unwrap();
        assert_eq!(state.street_index, Some(1));
        assert_eq!(state.board_cards.len(), 3);
        assert_eq!(state.bets, vec![0, 0]);
    }

    #[test]
    fn raise_then_call_settles_the_betting_round() {
        let mut state = heads_up_no_limit();
        state.complete_bet_or_raise_to(Some(10), None).unwrap();
        assert_eq!(state.bets[1], 10);
        state.check_or_call(None).unwrap();
        assert_eq!(state.street_index, Some(1));
        assert_eq!(state.bets, vec![0, 0]);
    }

    #[test]
    fn get_effective_ante_has_no_heads_up_swap() {
        let mut state = heads_up_no_limit();
        state.antes = vec![5, 1];
        assert_eq!(state.get_effective_ante(0), 5);
        assert_eq!(state.get_effective_ante(1), 1);
    }

    #[test]
    fn pots_reflect_uneven_all_in_contributions() {
        let mut state = heads_up_no_limit();
        state.stacks = vec![0, 50];
        state.bets = vec![200, 50];
        state.starting_stacks = vec![200, 250];
        let pots = state.pots();
        let total: i64 = pots.iter().map(|p| p.amount()).sum();
        assert_eq!(total, 250);
    }
}
