//! Exit code constants for the hub.
//!
//! Every way `clubhub` can stop maps to exactly one of these; the message
//! printed alongside lives on [`crate::HubError`].

/// Game played to completion.
pub const SUCCESS: i32 = 0;

/// Wrong number of arguments or invalid configuration.
pub const BAD_ARGS: i32 = 1;

/// Win score is not a non-negative decimal integer.
pub const BAD_SCORE: i32 = 2;

/// Deck file could not be opened or read.
pub const BAD_FILE: i32 = 3;

/// Deck file contents are malformed.
pub const BAD_DECK: i32 = 4;

/// A player process failed to start or to send its readiness byte.
pub const BAD_PROCESS: i32 = 5;

/// A player closed its output mid-game.
pub const PLAYER_QUIT: i32 = 6;

/// A player sent something that is not a card line.
pub const BAD_MESSAGE: i32 = 7;

/// A player played a card it does not hold or reneged.
pub const BAD_PLAY: i32 = 8;

/// Interrupted by SIGINT.
pub const INTERRUPTED: i32 = 9;

/// Any other operating system failure.
pub const SYSCALL: i32 = 10;
