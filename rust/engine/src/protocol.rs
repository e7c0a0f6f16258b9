//! Line protocol spoken between the hub and its player agents.
//!
//! Every message is one ASCII line terminated by `\n`. The hub sends
//! [`HubMessage`]s; an agent only ever answers with a bare card code, and
//! only after `newtrick` or `yourturn`. Before anything else an agent writes
//! the single [`READY`] byte.

use std::fmt;

use crate::cards::{join_codes, Card};
use crate::errors::ProtocolError;

/// Readiness sentinel an agent writes once at startup.
pub const READY: u8 = b'-';

/// Longest hub message an agent accepts, excluding the newline.
pub const MAX_HUB_LINE: usize = 100;

/// Length of an agent's reply line including the newline.
pub const PLAY_LINE_LEN: usize = 3;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum HubMessage {
    /// The receiving player's hand for a new round, ascending.
    NewRound(Vec<Card>),
    /// The receiving player leads the trick.
    NewTrick,
    /// The receiving player follows in the current trick.
    YourTurn,
    /// A card was just played by someone (possibly the receiver).
    Played(Card),
    TrickOver,
    /// Scores of every seat in seat order.
    Scores(Vec<u32>),
    End,
}

impl HubMessage {
    /// Parses one line (without its newline). Matching is exact: no
    /// surrounding whitespace, no empty list items.
    pub fn parse(line: &str) -> Result<HubMessage, ProtocolError> {
        match line {
            "newtrick" => return Ok(HubMessage::NewTrick),
            "yourturn" => return Ok(HubMessage::YourTurn),
            "trickover" => return Ok(HubMessage::TrickOver),
            "end" => return Ok(HubMessage::End),
            _ => {}
        }
        if let Some(rest) = line.strip_prefix("newround ") {
            let cards = rest
                .split(',')
                .map(Card::decode)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(HubMessage::NewRound(cards));
        }
        if let Some(rest) = line.strip_prefix("played ") {
            return Ok(HubMessage::Played(Card::decode(rest)?));
        }
        if let Some(rest) = line.strip_prefix("scores ") {
            let scores = rest
                .split(',')
                .map(parse_score)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| ProtocolError::Scores(rest.to_string()))?;
            return Ok(HubMessage::Scores(scores));
        }
        Err(ProtocolError::Unrecognized(line.to_string()))
    }
}

fn parse_score(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for HubMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HubMessage::NewRound(cards) => write!(f, "newround {}", join_codes(cards)),
            HubMessage::NewTrick => f.write_str("newtrick"),
            HubMessage::YourTurn => f.write_str("yourturn"),
            HubMessage::Played(card) => write!(f, "played {}", card),
            HubMessage::TrickOver => f.write_str("trickover"),
            HubMessage::Scores(scores) => write!(f, "scores {}", join_scores(scores)),
            HubMessage::End => f.write_str("end"),
        }
    }
}

pub fn join_scores(scores: &[u32]) -> String {
    scores
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses an agent's reply (without its newline) into the card it played.
pub fn parse_play(line: &str) -> Result<Card, ProtocolError> {
    Ok(Card::decode(line)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(code: &str) -> Card {
        Card::decode(code).unwrap()
    }

    #[test]
    fn parses_every_message_kind() {
        assert_eq!(
            HubMessage::parse("newround 2S,TC,AH").unwrap(),
            HubMessage::NewRound(vec![card("2S"), card("TC"), card("AH")])
        );
        assert_eq!(HubMessage::parse("newtrick").unwrap(), HubMessage::NewTrick);
        assert_eq!(HubMessage::parse("yourturn").unwrap(), HubMessage::YourTurn);
        assert_eq!(
            HubMessage::parse("played 7D").unwrap(),
            HubMessage::Played(card("7D"))
        );
        assert_eq!(HubMessage::parse("trickover").unwrap(), HubMessage::TrickOver);
        assert_eq!(
            HubMessage::parse("scores 0,13,4").unwrap(),
            HubMessage::Scores(vec![0, 13, 4])
        );
        assert_eq!(HubMessage::parse("end").unwrap(), HubMessage::End);
    }

    #[test]
    fn rejects_near_misses() {
        for bad in [
            "",
            "newtrick ",
            " end",
            "End",
            "played",
            "played 2S ",
            "played 1S",
            "newround ",
            "newround 2S,,3S",
            "newround 2S,3S,",
            "scores ",
            "scores 1,,2",
            "scores -1,2",
            "scores +1,2",
            "scores 1, 2",
        ] {
            assert!(HubMessage::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn display_is_the_wire_form() {
        let msg = HubMessage::NewRound(vec![card("3S"), card("QH")]);
        assert_eq!(msg.to_string(), "newround 3S,QH");
        assert_eq!(HubMessage::Scores(vec![1, 0, 12, 3]).to_string(), "scores 1,0,12,3");
        assert_eq!(HubMessage::Played(card("AC")).to_string(), "played AC");
    }

    #[test]
    fn parse_play_accepts_only_card_codes() {
        assert_eq!(parse_play("KD").unwrap(), card("KD"));
        assert!(parse_play("KD ").is_err());
        assert!(parse_play("k").is_err());
    }
}
