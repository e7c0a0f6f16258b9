//! # clubhub-engine: Clubs Trick-Taking Game Core
//!
//! Rules, card model and wire protocol shared by the `clubhub` hub and its
//! `clubber` player agents. Nothing in this crate spawns processes or touches
//! the terminal; the hub and the agent drive it.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card codec: two-character codes to dense indices 0-51
//! - [`hand`] - `CardSet`, a bitset of cards iterated in index order
//! - [`player`] - Validated player counts and seats
//! - [`deck`] - Deck file parsing and round-by-round dealing
//! - [`protocol`] - Hub/agent line messages and the readiness sentinel
//! - [`game`] - Allocation table and trick bookkeeping
//! - [`rules`] - Follow-suit, trick winner, trick points, game winners
//! - [`engine`] - The authoritative table state machine
//! - [`errors`] - Error types for all of the above
//!
//! ## Quick Start
//!
//! ```rust
//! use clubhub_engine::cards::Card;
//! use clubhub_engine::protocol::HubMessage;
//!
//! let msg = HubMessage::parse("played QC").unwrap();
//! assert_eq!(msg, HubMessage::Played(Card::decode("QC").unwrap()));
//! assert_eq!(msg.to_string(), "played QC");
//! ```
//!
//! ## Scoring
//!
//! Every Club taken in a trick is a point against the trick's winner. The
//! game ends when someone reaches the threshold; the lowest score wins:
//!
//! ```rust
//! use clubhub_engine::rules::winners;
//!
//! let won = winners(&[10, 6, 6, 9], 10).unwrap();
//! assert_eq!(won.len(), 2);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod player;
pub mod protocol;
pub mod rules;
