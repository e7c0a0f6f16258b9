//! The shipped card-choice strategy.
//!
//! Clubs are points against whoever takes them, so `Clubber` tries to get
//! rid of its Clubs without winning tricks that contain them.

use clubhub_engine::cards::{Card, Rank, Suit, all_ranks};
use clubhub_engine::hand::CardSet;

use crate::Strategy;
use crate::tracker::Tracker;

const LEAD_FALLBACK: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];
const DISCARD_LAST: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
const DISCARD_EARLY: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

/// Leads the lowest Club still out when it holds it, otherwise leads low.
/// Follows low; when void, sheds its highest card, Clubs first unless it
/// is the last to act.
///
/// # Example
///
/// ```rust
/// use clubhub_ai::Strategy;
/// use clubhub_ai::strategy::Clubber;
/// use clubhub_ai::tracker::Tracker;
/// use clubhub_engine::cards::Card;
/// use clubhub_engine::player::{PlayerCount, Seat};
///
/// let c = |s: &str| Card::decode(s).unwrap();
/// let mut tracker = Tracker::new(PlayerCount::new(4).unwrap(), Seat::FIRST);
/// tracker.start_round(&[c("5S"), c("2C"), c("8D")]);
///
/// assert_eq!(Clubber.lead(&tracker), Some(c("2C")));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Clubber;

impl Clubber {
    pub fn new() -> Self {
        Self
    }
}

/// The lowest Club nobody has played yet, if any remain.
fn lowest_unseen_club(seen: &CardSet) -> Option<Card> {
    all_ranks()
        .into_iter()
        .map(|rank: Rank| Card::new(Suit::Clubs, rank))
        .find(|card| !seen.contains(*card))
}

fn lowest_by_suit(hand: &CardSet, order: &[Suit]) -> Option<Card> {
    order.iter().find_map(|&suit| hand.lowest_in(suit))
}

fn highest_by_suit(hand: &CardSet, order: &[Suit]) -> Option<Card> {
    order.iter().find_map(|&suit| hand.highest_in(suit))
}

impl Strategy for Clubber {
    fn lead(&self, view: &Tracker) -> Option<Card> {
        let hand = view.hand();
        match lowest_unseen_club(view.seen()) {
            Some(club) if hand.contains(club) => Some(club),
            _ => lowest_by_suit(hand, &LEAD_FALLBACK),
        }
    }

    fn follow(&self, view: &Tracker, lead: Suit, last: bool) -> Option<Card> {
        let hand = view.hand();
        if let Some(card) = hand.lowest_in(lead) {
            return Some(card);
        }
        if last {
            highest_by_suit(hand, &DISCARD_LAST)
        } else {
            highest_by_suit(hand, &DISCARD_EARLY)
        }
    }

    fn name(&self) -> &str {
        "Clubber"
    }
}
