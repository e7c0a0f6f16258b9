//! Error type for the hub.
//!
//! Each [`HubError`] variant is one exit category. `Display` renders the
//! exact line the hub prints to stderr before exiting; the detail fields are
//! only for logging.

use std::fmt;

use clubhub_engine::errors::{DeckError, GameError};
use clubhub_engine::player::Seat;

use crate::channel::{PeerError, ProcessError};
use crate::exit_code;

#[derive(Debug)]
pub enum HubError {
    /// Wrong number of command-line arguments
    Usage,

    /// Unreadable or invalid configuration
    Config(String),

    InvalidScore(String),

    /// Deck file unreadable or malformed
    Deck(DeckError),

    /// Player process failed to start or handshake
    Process(ProcessError),

    PlayerQuit(Seat),

    BadMessage { seat: Seat, detail: String },

    /// Illegal card for the seat that played it
    BadPlay(GameError),

    Interrupted,

    /// Operating system failure, or engine misuse that should be impossible
    Syscall(String),
}

impl HubError {
    pub fn exit_code(&self) -> i32 {
        match self {
            HubError::Usage | HubError::Config(_) => exit_code::BAD_ARGS,
            HubError::InvalidScore(_) => exit_code::BAD_SCORE,
            HubError::Deck(DeckError::InvalidDeckFile { .. }) => exit_code::BAD_FILE,
            HubError::Deck(DeckError::InvalidDeck { .. }) => exit_code::BAD_DECK,
            HubError::Process(_) => exit_code::BAD_PROCESS,
            HubError::PlayerQuit(_) => exit_code::PLAYER_QUIT,
            HubError::BadMessage { .. } => exit_code::BAD_MESSAGE,
            HubError::BadPlay(_) => exit_code::BAD_PLAY,
            HubError::Interrupted => exit_code::INTERRUPTED,
            HubError::Syscall(_) => exit_code::SYSCALL,
        }
    }
}

impl fmt::Display for HubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HubError::Usage => write!(
                f,
                "Usage: clubhub deckfile winscore prog1 prog2 [prog3 [prog4]]"
            ),
            HubError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            HubError::InvalidScore(_) => write!(f, "Invalid score"),
            HubError::Deck(DeckError::InvalidDeckFile { .. }) => {
                write!(f, "Unable to access deckfile")
            }
            HubError::Deck(DeckError::InvalidDeck { .. }) => write!(f, "Error reading deck"),
            HubError::Process(_) => write!(f, "Unable to start subprocess"),
            HubError::PlayerQuit(_) => write!(f, "Player quit"),
            HubError::BadMessage { .. } => write!(f, "Invalid message received from player"),
            HubError::BadPlay(_) => write!(f, "Invalid play by player"),
            HubError::Interrupted => write!(f, "SIGINT caught"),
            HubError::Syscall(msg) => write!(f, "Syscall failed: {}", msg),
        }
    }
}

impl std::error::Error for HubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HubError::Deck(e) => Some(e),
            HubError::Process(e) => Some(e),
            HubError::BadPlay(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeckError> for HubError {
    fn from(error: DeckError) -> Self {
        HubError::Deck(error)
    }
}

impl From<ProcessError> for HubError {
    fn from(error: ProcessError) -> Self {
        HubError::Process(error)
    }
}

impl From<PeerError> for HubError {
    fn from(error: PeerError) -> Self {
        match error {
            PeerError::Quit { seat } => HubError::PlayerQuit(seat),
            PeerError::Malformed { seat, line } => HubError::BadMessage {
                seat,
                detail: format!("{line:?}"),
            },
        }
    }
}

// Only rule violations by the acting seat are the player's fault.
impl From<GameError> for HubError {
    fn from(error: GameError) -> Self {
        if error.is_illegal_play() {
            HubError::BadPlay(error)
        } else {
            HubError::Syscall(error.to_string())
        }
    }
}

impl From<std::io::Error> for HubError {
    fn from(error: std::io::Error) -> Self {
        HubError::Syscall(error.to_string())
    }
}
