//! Exit statuses of the `clubber` agent process.

/// `end` received from the hub.
pub const SUCCESS: i32 = 0;

/// Wrong number of command-line arguments.
pub const BAD_ARGS: i32 = 1;

/// Player count is not a single digit from 2 to 4.
pub const BAD_PLAYERS: i32 = 2;

/// Seat letter is not valid for the player count.
pub const BAD_ID: i32 = 3;

/// The hub closed our input or stopped accepting our output.
pub const HUB_LOST: i32 = 4;

/// The hub sent something malformed or out of order.
pub const BAD_MESSAGE: i32 = 5;
