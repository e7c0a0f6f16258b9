use std::fmt;

use crate::cards::DECK_SIZE;

/// Number of players at the table, validated to 2..=4.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PlayerCount(u8);

impl PlayerCount {
    pub const MIN: usize = 2;
    pub const MAX: usize = 4;

    pub fn new(n: usize) -> Option<PlayerCount> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Some(PlayerCount(n as u8))
        } else {
            None
        }
    }

    /// Parses the single-digit form used on agent command lines.
    pub fn parse(text: &str) -> Option<PlayerCount> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ '2'..='4'), None) => PlayerCount::new(c as usize - '0' as usize),
            _ => None,
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Cards dealt to each player per round; also the number of tricks.
    pub fn hand_size(self) -> usize {
        DECK_SIZE / self.get()
    }

    /// Whether the two of Diamonds is withheld so the deal divides evenly.
    pub fn withholds_two_of_diamonds(self) -> bool {
        DECK_SIZE % self.get() != 0
    }

    pub fn seats(self) -> impl Iterator<Item = Seat> {
        (0..self.0).map(Seat)
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player's position at the table. Seat 0 is `A`, seat 3 is `D`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Seat(u8);

impl Seat {
    pub const FIRST: Seat = Seat(0);

    pub fn new(index: usize, players: PlayerCount) -> Option<Seat> {
        if index < players.get() {
            Some(Seat(index as u8))
        } else {
            None
        }
    }

    /// Parses a seat letter (`A`..) valid for the given player count.
    pub fn from_letter(text: &str, players: PlayerCount) -> Option<Seat> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ 'A'..='D'), None) => Seat::new(c as usize - 'A' as usize, players),
            _ => None,
        }
    }

    /// Seat for an index the crate has already bounded by a player count.
    pub(crate) fn at(index: usize) -> Seat {
        debug_assert!(index < PlayerCount::MAX);
        Seat(index as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// The seat that acts after this one.
    pub fn next(self, players: PlayerCount) -> Seat {
        Seat((self.0 + 1) % players.get() as u8)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
