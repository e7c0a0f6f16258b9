//! Lines of the operator transcript the hub writes to stdout.
//!
//! ```rust
//! use clubhub_cli::formatters::{format_play, format_winners};
//! use clubhub_engine::cards::Card;
//! use clubhub_engine::player::{PlayerCount, Seat};
//!
//! let two = PlayerCount::new(2).unwrap();
//! let b = Seat::new(1, two).unwrap();
//! let card = Card::decode("9C").unwrap();
//! assert_eq!(format_play(b, card, false), "Player B played 9C");
//! assert_eq!(format_winners(&[Seat::FIRST, b]), "Winner(s): A B");
//! ```

use clubhub_engine::cards::{Card, join_codes};
use clubhub_engine::player::Seat;
use clubhub_engine::protocol::join_scores;

/// A hand as dealt: `Player (A): 2S,5S,...`
pub fn format_hand(seat: Seat, hand: &[Card]) -> String {
    format!("Player ({}): {}", seat, join_codes(hand))
}

/// A card played: `Player A led 2C` for the lead, `Player B played 9C`
/// otherwise.
pub fn format_play(seat: Seat, card: Card, led: bool) -> String {
    let verb = if led { "led" } else { "played" };
    format!("Player {} {} {}", seat, verb, card)
}

pub fn format_scores(scores: &[u32]) -> String {
    format!("scores {}", join_scores(scores))
}

pub fn format_winners(winners: &[Seat]) -> String {
    let letters: Vec<String> = winners.iter().map(Seat::to_string).collect();
    format!("Winner(s): {}", letters.join(" "))
}
