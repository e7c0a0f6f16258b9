use crate::cards::{Card, Suit, DECK_SIZE};
use crate::hand::CardSet;
use crate::player::{PlayerCount, Seat};

/// Authoritative record of which seat holds each card.
///
/// A card maps to `None` before the deal, when it was withheld, and from the
/// moment it is legally played.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Allocation {
    owners: [Option<Seat>; DECK_SIZE],
}

impl Default for Allocation {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocation {
    pub fn new() -> Self {
        Self {
            owners: [None; DECK_SIZE],
        }
    }

    /// Builds the table from per-seat hands; `hands[i]` belongs to seat `i`.
    pub fn from_hands(hands: &[Vec<Card>]) -> Self {
        let mut alloc = Self::new();
        for (i, hand) in hands.iter().enumerate().take(PlayerCount::MAX) {
            for &card in hand {
                alloc.owners[card.index() as usize] = Some(Seat::at(i));
            }
        }
        alloc
    }

    pub fn owner(&self, card: Card) -> Option<Seat> {
        self.owners[card.index() as usize]
    }

    pub fn holds(&self, seat: Seat, card: Card) -> bool {
        self.owner(card) == Some(seat)
    }

    pub fn holds_suit(&self, seat: Seat, suit: Suit) -> bool {
        let start = suit.index() as usize * 13;
        self.owners[start..start + 13].contains(&Some(seat))
    }

    /// Marks a card as played.
    pub fn release(&mut self, card: Card) {
        self.owners[card.index() as usize] = None;
    }

    pub fn hand(&self, seat: Seat) -> CardSet {
        self.owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| **owner == Some(seat))
            .filter_map(|(i, _)| Card::from_index(i as u8))
            .collect()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

/// The trick in progress: who led and what has been played so far.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Trick {
    number: usize,
    leader: Seat,
    plays: Vec<Play>,
}

impl Trick {
    pub fn new(number: usize, leader: Seat) -> Self {
        Self {
            number,
            leader,
            plays: Vec::with_capacity(PlayerCount::MAX),
        }
    }

    /// 1-based position of this trick within its round.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|p| p.card.suit())
    }

    pub fn is_complete(&self, players: PlayerCount) -> bool {
        self.plays.len() >= players.get()
    }

    /// The seat expected to play next, in seat order from the leader.
    pub fn next_seat(&self, players: PlayerCount) -> Seat {
        let mut seat = self.leader;
        for _ in 0..self.plays.len() {
            seat = seat.next(players);
        }
        seat
    }

    pub(crate) fn push(&mut self, play: Play) {
        self.plays.push(play);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(code: &str) -> Card {
        Card::decode(code).unwrap()
    }

    #[test]
    fn allocation_tracks_owners_and_release() {
        let hands = vec![vec![card("2S"), card("3C")], vec![card("4D")]];
        let mut alloc = Allocation::from_hands(&hands);
        let a = Seat::FIRST;
        let b = Seat::at(1);
        assert!(alloc.holds(a, card("3C")));
        assert!(alloc.holds_suit(a, Suit::Clubs));
        assert!(!alloc.holds_suit(b, Suit::Clubs));
        assert_eq!(alloc.owner(card("AH")), None);
        alloc.release(card("3C"));
        assert!(!alloc.holds_suit(a, Suit::Clubs));
        assert_eq!(alloc.hand(a).to_vec(), vec![card("2S")]);
    }

    #[test]
    fn trick_order_starts_at_leader_and_wraps() {
        let three = PlayerCount::new(3).unwrap();
        let mut trick = Trick::new(1, Seat::at(2));
        assert_eq!(trick.next_seat(three), Seat::at(2));
        trick.push(Play {
            seat: Seat::at(2),
            card: card("5H"),
        });
        assert_eq!(trick.next_seat(three), Seat::FIRST);
        assert_eq!(trick.lead_suit(), Some(Suit::Hearts));
        assert!(!trick.is_complete(three));
    }
}
