use std::path::PathBuf;

use thiserror::Error;

use crate::cards::{Card, Suit};
use crate::player::Seat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("Invalid card code: {0:?}")]
    InvalidCard(String),
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Unable to read deck file {}: {source}", path.display())]
    InvalidDeckFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid deck {deck}: {reason}")]
    InvalidDeck { deck: usize, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unrecognized message: {0:?}")]
    Unrecognized(String),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error("Invalid score list: {0:?}")]
    Scores(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Player {seat} does not hold {card}")]
    CardNotHeld { seat: Seat, card: Card },
    #[error("Player {seat} played {card} but holds {lead:?}")]
    MustFollowSuit { seat: Seat, card: Card, lead: Suit },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: Seat, actual: Seat },
    #[error("Cannot {action} while {state}")]
    OutOfPhase {
        action: &'static str,
        state: &'static str,
    },
    #[error("Expected {expected} hands, got {actual}")]
    HandCount { expected: usize, actual: usize },
}

impl GameError {
    /// True when the error is a rule violation by the acting player rather
    /// than misuse of the engine.
    pub fn is_illegal_play(&self) -> bool {
        matches!(
            self,
            GameError::CardNotHeld { .. } | GameError::MustFollowSuit { .. }
        )
    }
}
