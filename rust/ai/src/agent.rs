//! Agent-side protocol state machine.
//!
//! [`Agent::handle`] takes one parsed hub message at a time, checks it is
//! legal where the agent currently is, updates the [`Tracker`] and tells the
//! caller whether to answer with a card.

use clubhub_engine::cards::{Card, Suit};
use clubhub_engine::hand::CardSet;
use clubhub_engine::player::{PlayerCount, Seat};
use clubhub_engine::protocol::HubMessage;

use crate::Strategy;
use crate::error::AgentError;
use crate::tracker::Tracker;

/// Per-trick counters carried inside [`Phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickProgress {
    /// Tricks still to play this round, this one included
    tricks_left: usize,
    /// Cards announced with `played` so far
    plays: usize,
    lead: Option<Suit>,
    /// Card we chose for this trick
    mine: Option<Card>,
    /// Whether the hub has announced our card back to us
    echoed: bool,
}

impl TrickProgress {
    fn new(tricks_left: usize) -> Self {
        Self {
            tricks_left,
            plays: 0,
            lead: None,
            mine: None,
            echoed: false,
        }
    }

    pub fn plays(&self) -> usize {
        self.plays
    }

    pub fn lead(&self) -> Option<Suit> {
        self.lead
    }

    pub fn has_played(&self) -> bool {
        self.mine.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitRound,
    InTrick(TrickProgress),
    AwaitTrickOver(TrickProgress),
    AwaitScores,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitRound => "awaiting a new round",
            Phase::InTrick(_) => "in a trick",
            Phase::AwaitTrickOver(_) => "awaiting trick over",
            Phase::AwaitScores => "awaiting scores",
        }
    }
}

/// What the caller should do after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing to send; read the next message.
    Wait,
    /// Send this card's code to the hub.
    Play(Card),
    /// The hub said `end`.
    Done,
}

pub struct Agent<S: Strategy> {
    tracker: Tracker,
    phase: Phase,
    strategy: S,
}

impl<S: Strategy> Agent<S> {
    pub fn new(players: PlayerCount, seat: Seat, strategy: S) -> Self {
        Self {
            tracker: Tracker::new(players, seat),
            phase: Phase::AwaitRound,
            strategy,
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Applies one hub message.
    ///
    /// # Errors
    ///
    /// [`AgentError::BadMessage`] when the message is not valid in the
    /// current phase or contradicts what the agent already knows. The agent
    /// must not be used after an error.
    pub fn handle(&mut self, msg: HubMessage) -> Result<Step, AgentError> {
        let players = self.tracker.players().get();
        let phase = self.phase;
        let out_of_phase = |what: &str| {
            AgentError::bad(format!("unexpected {what} while {}", phase.name()))
        };

        let (next, step) = match (phase, msg) {
            (_, HubMessage::End) => return Ok(Step::Done),

            (Phase::AwaitRound, HubMessage::NewRound(cards)) => {
                self.start_round(&cards)?;
                let progress = TrickProgress::new(self.tracker.players().hand_size());
                (Phase::InTrick(progress), Step::Wait)
            }

            (Phase::InTrick(mut t), HubMessage::NewTrick) => {
                if t.plays > 0 || t.has_played() {
                    return Err(out_of_phase("newtrick"));
                }
                let card = self.strategy.lead(&self.tracker);
                let card = self.choose(card)?;
                t.mine = Some(card);
                (Phase::InTrick(t), Step::Play(card))
            }

            (Phase::InTrick(mut t), HubMessage::YourTurn) => {
                let lead = match t.lead {
                    Some(lead) if !t.has_played() && t.plays < players => lead,
                    _ => return Err(out_of_phase("yourturn")),
                };
                let last = t.plays + 1 == players;
                let card = self.strategy.follow(&self.tracker, lead, last);
                let card = self.choose(card)?;
                t.mine = Some(card);
                (Phase::InTrick(t), Step::Play(card))
            }

            (Phase::InTrick(mut t), HubMessage::Played(card)) => {
                self.record_play(&mut t, card)?;
                t.plays += 1;
                t.lead.get_or_insert(card.suit());
                if t.plays == players {
                    (Phase::AwaitTrickOver(t), Step::Wait)
                } else {
                    (Phase::InTrick(t), Step::Wait)
                }
            }

            (Phase::AwaitTrickOver(t), HubMessage::TrickOver) => {
                if !t.echoed {
                    return Err(out_of_phase("trickover before our play"));
                }
                match t.tricks_left - 1 {
                    0 => (Phase::AwaitScores, Step::Wait),
                    left => (Phase::InTrick(TrickProgress::new(left)), Step::Wait),
                }
            }

            (Phase::AwaitScores, HubMessage::Scores(scores)) => {
                if scores.len() != players {
                    return Err(AgentError::bad(format!(
                        "expected {players} scores, got {}",
                        scores.len()
                    )));
                }
                self.tracker.set_scores(scores);
                (Phase::AwaitRound, Step::Wait)
            }

            (_, other) => return Err(out_of_phase(&other.to_string())),
        };
        self.phase = next;
        Ok(step)
    }

    fn start_round(&mut self, cards: &[Card]) -> Result<(), AgentError> {
        let expected = self.tracker.players().hand_size();
        let hand: CardSet = cards.iter().copied().collect();
        if cards.len() != expected || hand.len() != expected {
            return Err(AgentError::bad(format!(
                "newround needs {expected} distinct cards, got {}",
                cards.len()
            )));
        }
        self.tracker.start_round(cards);
        Ok(())
    }

    fn choose(&mut self, card: Option<Card>) -> Result<Card, AgentError> {
        let card = card
            .filter(|c| self.tracker.hand().contains(*c))
            .ok_or_else(|| AgentError::bad("asked to play with no card to give"))?;
        self.tracker.take(card);
        Ok(card)
    }

    /// A card announced by the hub must be new this round, unless it is
    /// the first echo of our own play.
    fn record_play(&mut self, t: &mut TrickProgress, card: Card) -> Result<(), AgentError> {
        if t.mine == Some(card) && !t.echoed {
            t.echoed = true;
            return Ok(());
        }
        if self.tracker.hand().contains(card) {
            return Err(AgentError::bad(format!("{card} was played but we hold it")));
        }
        if !self.tracker.observe(card) {
            return Err(AgentError::bad(format!("{card} was already played")));
        }
        Ok(())
    }
}
