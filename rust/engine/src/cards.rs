use std::fmt;
use std::str::FromStr;

use crate::errors::CardError;

/// Represents one of the four suits in a standard 52-card deck.
/// The discriminant is the suit's block within the dense card index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Suit {
    /// Spades (cards 0-12)
    Spades = 0,
    /// Clubs (cards 13-25), the only suit worth points
    Clubs,
    /// Diamonds (cards 26-38)
    Diamonds,
    /// Hearts (cards 39-51)
    Hearts,
}

impl Suit {
    pub fn from_index(v: u8) -> Option<Suit> {
        match v {
            0 => Some(Suit::Spades),
            1 => Some(Suit::Clubs),
            2 => Some(Suit::Diamonds),
            3 => Some(Suit::Hearts),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c {
            'S' => Some(Suit::Spades),
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// The discriminant is the offset within a suit block, so Two is 0 and Ace is 12.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 0,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

const RANK_CHARS: &[u8; 13] = b"23456789TJQKA";

impl Rank {
    pub fn from_index(v: u8) -> Option<Rank> {
        all_ranks().get(v as usize).copied()
    }

    pub fn from_char(c: char) -> Option<Rank> {
        RANK_CHARS
            .iter()
            .position(|&b| b as char == c)
            .and_then(|i| Rank::from_index(i as u8))
    }

    pub fn as_char(self) -> char {
        RANK_CHARS[self as usize] as char
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// A single playing card, stored as its dense index 0-51.
///
/// Suits occupy consecutive blocks of 13 (Spades, Clubs, Diamonds, Hearts)
/// and ranks run Two..Ace inside each block, so comparing two cards of the
/// same suit compares their ranks. The textual form is the two-character
/// code used on the wire and in deck files.
///
/// # Examples
///
/// ```
/// use clubhub_engine::cards::{Card, Rank, Suit};
///
/// let card: Card = "TC".parse().unwrap();
/// assert_eq!(card.index(), 21);
/// assert_eq!(card.suit(), Suit::Clubs);
/// assert_eq!(card.rank(), Rank::Ten);
/// assert_eq!(card.to_string(), "TC");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Card(u8);

/// Number of distinct cards.
pub const DECK_SIZE: usize = 52;

impl Card {
    /// The card withheld from three-player deals so 51 cards split evenly.
    pub const TWO_OF_DIAMONDS: Card = Card(26);

    pub fn new(suit: Suit, rank: Rank) -> Card {
        Card(suit.index() * 13 + rank.index())
    }

    pub fn from_index(index: u8) -> Option<Card> {
        if (index as usize) < DECK_SIZE {
            Some(Card(index))
        } else {
            None
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn suit(self) -> Suit {
        match self.0 / 13 {
            0 => Suit::Spades,
            1 => Suit::Clubs,
            2 => Suit::Diamonds,
            _ => Suit::Hearts,
        }
    }

    pub fn rank(self) -> Rank {
        match Rank::from_index(self.0 % 13) {
            Some(rank) => rank,
            None => Rank::Ace,
        }
    }

    pub fn is_club(self) -> bool {
        self.suit() == Suit::Clubs
    }

    /// Decodes a card code: exactly a rank character followed by a suit character.
    pub fn decode(text: &str) -> Result<Card, CardError> {
        let mut chars = text.chars();
        let (Some(r), Some(s), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CardError::InvalidCard(text.to_string()));
        };
        match (Rank::from_char(r), Suit::from_char(s)) {
            (Some(rank), Some(suit)) => Ok(Card::new(suit, rank)),
            _ => Err(CardError::InvalidCard(text.to_string())),
        }
    }

    pub fn encode(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().as_char(), self.suit().as_char())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::decode(s)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
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
        Rank::Ace,
    ]
}

/// All 52 cards in index order.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(s, r));
        }
    }
    v
}

/// Formats cards as comma-separated codes, the list form used on the wire.
pub fn join_codes(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suit_blocks_follow_spades_clubs_diamonds_hearts() {
        assert_eq!(Card::decode("2S").unwrap().index(), 0);
        assert_eq!(Card::decode("AS").unwrap().index(), 12);
        assert_eq!(Card::decode("2C").unwrap().index(), 13);
        assert_eq!(Card::decode("2D").unwrap().index(), 26);
        assert_eq!(Card::decode("AH").unwrap().index(), 51);
    }

    #[test]
    fn decode_rejects_wrong_shapes() {
        for bad in ["", "2", "2SS", "1S", "2X", "s2", "ts", " 2S", "10S"] {
            assert!(Card::decode(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn from_index_is_bounded() {
        assert!(Card::from_index(51).is_some());
        assert!(Card::from_index(52).is_none());
    }

    #[test]
    fn full_deck_is_in_index_order() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        for (i, c) in deck.iter().enumerate() {
            assert_eq!(c.index() as usize, i);
        }
    }

    #[test]
    fn join_codes_is_comma_separated() {
        let cards = [Card::decode("2S").unwrap(), Card::decode("KH").unwrap()];
        assert_eq!(join_codes(&cards), "2S,KH");
        assert_eq!(join_codes(&[]), "");
    }
}
