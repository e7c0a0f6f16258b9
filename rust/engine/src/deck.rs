use std::path::Path;

use crate::cards::{Card, DECK_SIZE};
use crate::errors::DeckError;
use crate::hand::CardSet;
use crate::player::PlayerCount;

/// One validated deck: a permutation of all 52 cards in draw order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Result<Self, String> {
        if cards.len() != DECK_SIZE {
            return Err(format!("expected {} cards, found {}", DECK_SIZE, cards.len()));
        }
        if !all_unique(&cards) {
            return Err("duplicate card".to_string());
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// True when no card appears twice.
pub fn all_unique(cards: &[Card]) -> bool {
    let mut seen = CardSet::new();
    cards.iter().all(|&c| seen.insert(c))
}

/// Decks read from a deck file, drawn one per round in file order.
///
/// # Examples
///
/// ```
/// use clubhub_engine::cards::{full_deck, join_codes};
/// use clubhub_engine::deck::DeckSource;
/// use clubhub_engine::player::PlayerCount;
///
/// let text = join_codes(&full_deck());
/// let mut source = DeckSource::parse(&text).unwrap();
/// let hands = source.next_round(PlayerCount::new(4).unwrap());
/// assert_eq!(hands.len(), 4);
/// assert!(hands.iter().all(|h| h.len() == 13));
/// ```
#[derive(Debug, Clone)]
pub struct DeckSource {
    decks: Vec<Deck>,
    position: usize,
}

impl DeckSource {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let text = std::fs::read(path).map_err(|source| DeckError::InvalidDeckFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_bytes(&text)
    }

    pub fn parse(text: &str) -> Result<Self, DeckError> {
        Self::parse_bytes(text.as_bytes())
    }

    fn parse_bytes(bytes: &[u8]) -> Result<Self, DeckError> {
        let mut scanner = Scanner { bytes, pos: 0 };
        let mut decks = Vec::new();
        loop {
            let deck_no = decks.len();
            let invalid = |reason: String| DeckError::InvalidDeck {
                deck: deck_no,
                reason,
            };
            let cards = scanner.read_deck().map_err(invalid)?;
            decks.push(Deck::new(cards).map_err(invalid)?);
            if !scanner.another_deck().map_err(invalid)? {
                break;
            }
        }
        Ok(Self { decks, position: 0 })
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Index of the deck the next round will be dealt from.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Deals the current deck round-robin starting with seat A and advances
    /// to the next deck, wrapping after the last one.
    ///
    /// Three-player games skip the two of Diamonds so every hand holds 17
    /// cards. Each returned hand is sorted by card index.
    pub fn next_round(&mut self, players: PlayerCount) -> Vec<Vec<Card>> {
        let n = players.get();
        let mut hands = vec![Vec::with_capacity(players.hand_size()); n];
        let skip_two_of_diamonds = players.withholds_two_of_diamonds();
        let draw = self.decks[self.position]
            .cards()
            .iter()
            .copied()
            .filter(|&c| !(skip_two_of_diamonds && c == Card::TWO_OF_DIAMONDS));
        for (i, card) in draw.enumerate() {
            hands[i % n].push(card);
        }
        for hand in &mut hands {
            hand.sort_unstable();
        }
        self.position = (self.position + 1) % self.decks.len();
        hands
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    fn next(&mut self) -> Option<u8> {
        let b = self.bytes.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consumes through the end of the current line. Returns false if
    /// `blank_only` and the line holds anything but whitespace.
    fn skip_line(&mut self, blank_only: bool) -> bool {
        while let Some(b) = self.next() {
            if b == b'\n' {
                return true;
            }
            if blank_only && !b.is_ascii_whitespace() {
                return false;
            }
        }
        true
    }

    fn read_deck(&mut self) -> Result<Vec<Card>, String> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for i in 0..DECK_SIZE {
            cards.push(self.read_card()?);

            let mut sep = self.next();
            if sep == Some(b'\r') && self.peek() == Some(b'\n') {
                sep = self.next();
            }
            // one extra newline may trail any separator
            if self.peek() == Some(b'\n') {
                self.next();
            }

            let last = i == DECK_SIZE - 1;
            match sep {
                Some(b',') | Some(b'\n') => {}
                None if last => {}
                None => return Err(format!("deck ends after {} cards", i + 1)),
                Some(b) => {
                    return Err(format!(
                        "unexpected {:?} after card {}",
                        b as char,
                        i + 1
                    ));
                }
            }
        }
        Ok(cards)
    }

    fn read_card(&mut self) -> Result<Card, String> {
        let first = loop {
            match self.next() {
                None => return Err("unexpected end of file".to_string()),
                Some(b'\n') => continue,
                Some(b'#') => {
                    self.skip_line(false);
                }
                Some(b) if b.is_ascii_whitespace() => {
                    if !self.skip_line(true) {
                        return Err("text after leading whitespace".to_string());
                    }
                }
                Some(b) => break b,
            }
        };
        let second = self
            .next()
            .ok_or_else(|| "unexpected end of file".to_string())?;
        let code = [first, second];
        let text = std::str::from_utf8(&code).map_err(|_| "non-ASCII card".to_string())?;
        Card::decode(text).map_err(|e| e.to_string())
    }

    /// After a deck: skips blank and comment lines, then reports whether a
    /// terminator line announces another deck.
    fn another_deck(&mut self) -> Result<bool, String> {
        loop {
            match self.next() {
                None => return Ok(false),
                Some(b'.') => {
                    if self.peek() == Some(b'\r') {
                        self.next();
                    }
                    return match self.next() {
                        Some(b'\n') => Ok(true),
                        _ => Err("terminator must be alone on its line".to_string()),
                    };
                }
                Some(b'\n') => {}
                Some(b'#') => {
                    self.skip_line(false);
                }
                Some(b) if b.is_ascii_whitespace() => {
                    if !self.skip_line(true) {
                        return Err("text after leading whitespace".to_string());
                    }
                }
                Some(b) => return Err(format!("unexpected {:?} after deck", b as char)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{full_deck, join_codes};

    fn ordered_text() -> String {
        join_codes(&full_deck())
    }

    #[test]
    fn parses_single_comma_separated_deck() {
        let source = DeckSource::parse(&ordered_text()).unwrap();
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn parses_one_card_per_line_with_comments() {
        let mut text = String::from("# a comment\n\n");
        for c in full_deck() {
            text.push_str(&c.to_string());
            text.push('\n');
            if c.index() == 20 {
                text.push_str("# halfway\n   \n");
            }
        }
        assert_eq!(DeckSource::parse(&text).unwrap().len(), 1);
    }

    #[test]
    fn tolerates_extra_newline_after_separator() {
        let text = full_deck()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",\n");
        assert!(DeckSource::parse(&text).is_ok());
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let text = full_deck()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("\r\n");
        assert!(DeckSource::parse(&text).is_ok());
    }

    #[test]
    fn separates_decks_with_dot_line() {
        let text = format!("{}\n.\n{}\n", ordered_text(), ordered_text());
        assert_eq!(DeckSource::parse(&text).unwrap().len(), 2);
    }

    #[test]
    fn rejects_stray_text_between_decks() {
        let text = format!("{}\nxx\n", ordered_text());
        assert!(matches!(
            DeckSource::parse(&text),
            Err(DeckError::InvalidDeck { deck: 0, .. })
        ));
    }

    #[test]
    fn rejects_whitespace_led_card() {
        let text = format!(" {}", ordered_text());
        assert!(DeckSource::parse(&text).is_err());
    }

    #[test]
    fn reports_failing_deck_number() {
        let mut second = full_deck();
        second[5] = second[6];
        let text = format!("{}\n.\n{}", ordered_text(), join_codes(&second));
        match DeckSource::parse(&text) {
            Err(DeckError::InvalidDeck { deck, reason }) => {
                assert_eq!(deck, 1);
                assert!(reason.contains("duplicate"));
            }
            other => panic!("expected InvalidDeck, got {:?}", other),
        }
    }

    #[test]
    fn deck_new_checks_length() {
        assert!(Deck::new(full_deck()[..51].to_vec()).is_err());
    }
}
