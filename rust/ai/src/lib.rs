//! # clubhub-ai: Clubs Player Agent
//!
//! Everything the `clubber` agent process does once it is started by the
//! hub: track its hand and the cards already out, follow the protocol state
//! machine, and pick a card when asked.
//!
//! ## Core Components
//!
//! - [`Strategy`] - Trait for choosing a card to lead or follow with
//! - [`strategy::Clubber`] - The shipped strategy
//! - [`tracker::Tracker`] - Hand, cards seen this round, scores
//! - [`agent::Agent`] - Protocol state machine driving a strategy
//! - [`run`] - Process entry point used by the `clubber` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use clubhub_ai::agent::{Agent, Step};
//! use clubhub_ai::strategy::Clubber;
//! use clubhub_engine::cards::Card;
//! use clubhub_engine::player::{PlayerCount, Seat};
//! use clubhub_engine::protocol::HubMessage;
//!
//! let players = PlayerCount::new(4).unwrap();
//! let mut agent = Agent::new(players, Seat::FIRST, Clubber);
//!
//! let deal = "newround 2S,3S,4S,2C,5C,2D,3D,4D,2H,3H,4H,5H,6H";
//! agent.handle(HubMessage::parse(deal).unwrap()).unwrap();
//! let step = agent.handle(HubMessage::NewTrick).unwrap();
//! assert_eq!(step, Step::Play(Card::decode("2C").unwrap()));
//! ```

use clubhub_engine::cards::{Card, Suit};

pub mod agent;
pub mod error;
pub mod exit_code;
pub mod logging;
pub mod runner;
pub mod strategy;
pub mod tracker;

pub use error::AgentError;
pub use runner::run;

use tracker::Tracker;

/// Card-choice policy plugged into an [`agent::Agent`].
///
/// Implementations only choose; the agent checks the choice is in hand and
/// records it. Returning `None` (or a card not held) ends the agent with a
/// bad-message error.
///
/// # Example Implementation
///
/// ```rust
/// use clubhub_ai::Strategy;
/// use clubhub_ai::tracker::Tracker;
/// use clubhub_engine::cards::{Card, Suit};
///
/// /// Always plays the lowest legal card.
/// struct Lowest;
///
/// impl Strategy for Lowest {
///     fn lead(&self, view: &Tracker) -> Option<Card> {
///         view.hand().iter().next()
///     }
///
///     fn follow(&self, view: &Tracker, lead: Suit, _last: bool) -> Option<Card> {
///         view.hand().lowest_in(lead).or_else(|| view.hand().iter().next())
///     }
///
///     fn name(&self) -> &str {
///         "Lowest"
///     }
/// }
/// ```
pub trait Strategy {
    /// Card to lead a new trick with.
    fn lead(&self, view: &Tracker) -> Option<Card>;

    /// Card to play after others have played; `last` is set when every other
    /// seat has already played to this trick.
    fn follow(&self, view: &Tracker, lead: Suit, last: bool) -> Option<Card>;

    fn name(&self) -> &str;
}
