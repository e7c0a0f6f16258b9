use std::fmt;

use crate::cards::{Card, Suit, DECK_SIZE};

/// A set of cards packed into the low 52 bits of a `u64`.
///
/// Iteration is always in ascending card index, so a hand printed from a
/// `CardSet` is already in wire order.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CardSet(u64);

const SUIT_MASK: u64 = (1 << 13) - 1;

impl CardSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, card: Card) -> bool {
        let fresh = !self.contains(card);
        self.0 |= bit(card);
        fresh
    }

    pub fn remove(&mut self, card: Card) -> bool {
        let present = self.contains(card);
        self.0 &= !bit(card);
        present
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 & bit(card) != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.suit_bits(suit) != 0
    }

    /// Lowest-ranked card of `suit` in the set.
    pub fn lowest_in(&self, suit: Suit) -> Option<Card> {
        let bits = self.suit_bits(suit);
        if bits == 0 {
            return None;
        }
        Card::from_index(suit.index() * 13 + bits.trailing_zeros() as u8)
    }

    /// Highest-ranked card of `suit` in the set.
    pub fn highest_in(&self, suit: Suit) -> Option<Card> {
        let bits = self.suit_bits(suit);
        if bits == 0 {
            return None;
        }
        Card::from_index(suit.index() * 13 + (63 - bits.leading_zeros()) as u8)
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        (0..DECK_SIZE as u8)
            .filter_map(Card::from_index)
            .filter(|c| self.contains(*c))
    }

    pub fn in_suit(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.iter().filter(move |c| c.suit() == suit)
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.iter().collect()
    }

    fn suit_bits(&self, suit: Suit) -> u64 {
        (self.0 >> (suit.index() as u64 * 13)) & SUIT_MASK
    }
}

fn bit(card: Card) -> u64 {
    1u64 << card.index()
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
