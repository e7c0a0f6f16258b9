use std::mem;

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::{Allocation, Play, Trick};
use crate::player::{PlayerCount, Seat};
use crate::rules::{check_play, trick_points, trick_winner, winners};

/// Where the table is in the round → trick → play cycle.
///
/// Only [`Engine`] moves between states; callers observe the state and feed
/// it the next event.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TableState {
    /// Waiting for the next round's hands.
    Dealing,
    /// The trick's leader must play; no card is on the table yet.
    Leading { trick: Trick },
    /// The lead is down; the remaining seats follow in order.
    Following { trick: Trick },
    /// Every seat has played; the trick awaits resolution.
    Resolving { trick: Trick },
    /// All tricks of the round are resolved; scores must be checked.
    RoundScoring,
    Finished { winners: Vec<Seat> },
}

impl TableState {
    pub fn name(&self) -> &'static str {
        match self {
            TableState::Dealing => "dealing",
            TableState::Leading { .. } => "waiting for a lead",
            TableState::Following { .. } => "waiting for a follow",
            TableState::Resolving { .. } => "resolving a trick",
            TableState::RoundScoring => "scoring the round",
            TableState::Finished { .. } => "finished",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TurnKind {
    Lead,
    /// `last` is set for the final seat to act in the trick.
    Follow { last: bool },
}

/// The seat the engine is waiting on and how it enters the trick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Turn {
    pub seat: Seat,
    pub kind: TurnKind,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TrickResult {
    /// 1-based trick number within the round
    pub number: usize,
    pub winner: Seat,
    /// Clubs in the trick, added to the winner's score
    pub points: u32,
    pub plays: Vec<Play>,
    /// True when this was the round's last trick
    pub round_over: bool,
}

/// Authoritative table for one game.
///
/// Owns the allocation table, the score table and the trick in progress,
/// and rejects any play that breaks ownership or follow-suit.
///
/// # Examples
///
/// ```
/// use clubhub_engine::cards::{full_deck, join_codes};
/// use clubhub_engine::deck::DeckSource;
/// use clubhub_engine::engine::{Engine, TableState};
/// use clubhub_engine::player::PlayerCount;
///
/// let players = PlayerCount::new(2).unwrap();
/// let mut decks = DeckSource::parse(&join_codes(&full_deck())).unwrap();
/// let mut engine = Engine::new(players, 50);
///
/// engine.deal(&decks.next_round(players)).unwrap();
/// while let Some(turn) = engine.turn() {
///     // play the lowest legal card for whoever is up
///     let hand = engine.allocation().hand(turn.seat);
///     let lead = engine.lead_suit();
///     let card = lead
///         .and_then(|suit| hand.lowest_in(suit))
///         .or_else(|| hand.iter().next())
///         .unwrap();
///     engine.play(turn.seat, card).unwrap();
///     if matches!(engine.state(), TableState::Resolving { .. }) {
///         engine.resolve().unwrap();
///     }
/// }
/// assert_eq!(engine.state(), &TableState::RoundScoring);
/// assert_eq!(engine.scores().iter().sum::<u32>(), 13);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    players: PlayerCount,
    /// A score at or above this ends the game
    threshold: u32,
    allocation: Allocation,
    scores: Vec<u32>,
    /// Rounds dealt so far
    round: usize,
    state: TableState,
}

impl Engine {
    pub fn new(players: PlayerCount, threshold: u32) -> Self {
        Self {
            players,
            threshold,
            allocation: Allocation::new(),
            scores: vec![0; players.get()],
            round: 0,
            state: TableState::Dealing,
        }
    }

    pub fn players(&self) -> PlayerCount {
        self.players
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, TableState::Finished { .. })
    }

    pub fn lead_suit(&self) -> Option<crate::cards::Suit> {
        match &self.state {
            TableState::Following { trick } | TableState::Resolving { trick } => trick.lead_suit(),
            _ => None,
        }
    }

    /// Starts a round with `hands[i]` dealt to seat `i`. Seat A leads the
    /// first trick.
    pub fn deal(&mut self, hands: &[Vec<Card>]) -> Result<(), GameError> {
        if self.state != TableState::Dealing {
            return Err(GameError::OutOfPhase {
                action: "deal",
                state: self.state.name(),
            });
        }
        if hands.len() != self.players.get() {
            return Err(GameError::HandCount {
                expected: self.players.get(),
                actual: hands.len(),
            });
        }
        self.allocation = Allocation::from_hands(hands);
        self.round += 1;
        self.state = TableState::Leading {
            trick: Trick::new(1, Seat::FIRST),
        };
        Ok(())
    }

    /// Who must play next, or `None` outside the leading/following states.
    pub fn turn(&self) -> Option<Turn> {
        let players = self.players;
        match &self.state {
            TableState::Leading { trick } => Some(Turn {
                seat: trick.next_seat(players),
                kind: TurnKind::Lead,
            }),
            TableState::Following { trick } => Some(Turn {
                seat: trick.next_seat(players),
                kind: TurnKind::Follow {
                    last: trick.plays().len() + 1 == players.get(),
                },
            }),
            _ => None,
        }
    }

    /// Records `seat` playing `card` after checking turn order, ownership and
    /// follow-suit. A legal card is released from the allocation table at once.
    pub fn play(&mut self, seat: Seat, card: Card) -> Result<Play, GameError> {
        let players = self.players;
        let trick = match &mut self.state {
            TableState::Leading { trick } | TableState::Following { trick } => trick,
            other => {
                return Err(GameError::OutOfPhase {
                    action: "play a card",
                    state: other.name(),
                });
            }
        };
        let expected = trick.next_seat(players);
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }
        check_play(&self.allocation, seat, card, trick.lead_suit())?;

        self.allocation.release(card);
        let play = Play { seat, card };
        trick.push(play);
        let complete = trick.is_complete(players);

        self.state = match mem::replace(&mut self.state, TableState::Dealing) {
            TableState::Leading { trick } | TableState::Following { trick } if complete => {
                TableState::Resolving { trick }
            }
            TableState::Leading { trick } => TableState::Following { trick },
            other => other,
        };
        Ok(play)
    }

    /// Scores the completed trick and hands the lead to its winner, or moves
    /// to round scoring after the last trick.
    pub fn resolve(&mut self) -> Result<TrickResult, GameError> {
        let trick = match mem::replace(&mut self.state, TableState::Dealing) {
            TableState::Resolving { trick } => trick,
            other => {
                let state = other.name();
                self.state = other;
                return Err(GameError::OutOfPhase {
                    action: "resolve a trick",
                    state,
                });
            }
        };
        let winner = trick_winner(trick.plays()).unwrap_or(trick.leader());
        let points = trick_points(trick.plays());
        self.scores[winner.index()] += points;

        let round_over = trick.number() >= self.players.hand_size();
        self.state = if round_over {
            TableState::RoundScoring
        } else {
            TableState::Leading {
                trick: Trick::new(trick.number() + 1, winner),
            }
        };
        Ok(TrickResult {
            number: trick.number(),
            winner,
            points,
            plays: trick.plays().to_vec(),
            round_over,
        })
    }

    /// Ends the round. Returns the winners when the game is over, otherwise
    /// readies the table for the next deal.
    pub fn score_round(&mut self) -> Result<Option<Vec<Seat>>, GameError> {
        if self.state != TableState::RoundScoring {
            return Err(GameError::OutOfPhase {
                action: "score the round",
                state: self.state.name(),
            });
        }
        match winners(&self.scores, self.threshold) {
            Some(won) => {
                self.state = TableState::Finished {
                    winners: won.clone(),
                };
                Ok(Some(won))
            }
            None => {
                self.state = TableState::Dealing;
                Ok(None)
            }
        }
    }
}
