//! What an agent knows about the game: its hand, the cards already out this
//! round, and the last scores the hub announced.

use std::fmt::Write as _;

use clubhub_engine::cards::{Card, all_suits};
use clubhub_engine::hand::CardSet;
use clubhub_engine::player::{PlayerCount, Seat};
use clubhub_engine::protocol::join_scores;

#[derive(Debug, Clone)]
pub struct Tracker {
    players: PlayerCount,
    seat: Seat,
    hand: CardSet,
    /// Cards played this round, our own included
    seen: CardSet,
    scores: Vec<u32>,
}

impl Tracker {
    pub fn new(players: PlayerCount, seat: Seat) -> Self {
        Self {
            players,
            seat,
            hand: CardSet::new(),
            seen: CardSet::new(),
            scores: vec![0; players.get()],
        }
    }

    pub fn players(&self) -> PlayerCount {
        self.players
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn hand(&self) -> &CardSet {
        &self.hand
    }

    pub fn seen(&self) -> &CardSet {
        &self.seen
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Replaces the hand and forgets last round's cards. A withheld two of
    /// Diamonds counts as already out.
    pub fn start_round(&mut self, cards: &[Card]) {
        self.hand = cards.iter().copied().collect();
        self.seen.clear();
        if self.players.withholds_two_of_diamonds() {
            self.seen.insert(Card::TWO_OF_DIAMONDS);
        }
    }

    /// Records a card announced by the hub. Returns false if it was already
    /// out this round.
    pub fn observe(&mut self, card: Card) -> bool {
        self.seen.insert(card)
    }

    /// Removes a chosen card from the hand and marks it as out.
    pub fn take(&mut self, card: Card) {
        self.hand.remove(card);
        self.seen.insert(card);
    }

    pub fn set_scores(&mut self, scores: Vec<u32>) {
        self.scores = scores;
    }

    /// Multi-line summary for the diagnostic log: hand, cards out per suit,
    /// scores.
    pub fn status(&self) -> String {
        let mut out = format!("Hand: {}", self.hand);
        for suit in all_suits() {
            let ranks: Vec<String> = self
                .seen
                .in_suit(suit)
                .map(|c| c.rank().as_char().to_string())
                .collect();
            let _ = write!(out, "\nPlayed ({}): {}", suit.as_char(), ranks.join(","));
        }
        let _ = write!(out, "\nScores: {}", join_scores(&self.scores));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(code: &str) -> Card {
        Card::decode(code).unwrap()
    }

    #[test]
    fn three_player_round_marks_two_of_diamonds_out() {
        let three = PlayerCount::new(3).unwrap();
        let mut tracker = Tracker::new(three, Seat::FIRST);
        tracker.start_round(&[card("3C"), card("AH")]);
        assert!(tracker.seen().contains(Card::TWO_OF_DIAMONDS));
        assert!(!tracker.observe(Card::TWO_OF_DIAMONDS));
    }

    #[test]
    fn take_moves_card_from_hand_to_seen() {
        let two = PlayerCount::new(2).unwrap();
        let mut tracker = Tracker::new(two, Seat::FIRST);
        tracker.start_round(&[card("3C"), card("AH")]);
        tracker.observe(card("9S"));
        tracker.take(card("3C"));
        assert_eq!(tracker.hand().to_vec(), vec![card("AH")]);
        assert!(!tracker.observe(card("3C")));

        tracker.start_round(&[card("2H")]);
        assert!(tracker.seen().is_empty());
    }

    #[test]
    fn status_lists_hand_seen_and_scores() {
        let two = PlayerCount::new(2).unwrap();
        let mut tracker = Tracker::new(two, Seat::FIRST);
        tracker.start_round(&[card("3C"), card("AH")]);
        tracker.observe(card("9S"));
        tracker.observe(card("TS"));
        tracker.set_scores(vec![4, 0]);
        assert_eq!(
            tracker.status(),
            "Hand: 3C,AH\nPlayed (S): 9,T\nPlayed (C): \nPlayed (D): \nPlayed (H): \nScores: 4,0"
        );
    }
}
