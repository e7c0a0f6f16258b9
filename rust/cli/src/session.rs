//! The hub's game loop: deal, run every trick, score, repeat until someone
//! reaches the threshold.

use std::io::Write;

use clubhub_engine::deck::DeckSource;
use clubhub_engine::engine::{Engine, TableState, TurnKind};
use clubhub_engine::player::{PlayerCount, Seat};
use clubhub_engine::protocol::{HubMessage, parse_play};
use tracing::info;

use crate::channel::PeerError;
use crate::error::HubError;
use crate::formatters::{format_hand, format_play, format_scores, format_winners};

/// How the session talks to one player.
///
/// Real games use [`crate::channel::Channel`]; tests can plug in agents
/// running in the same process.
pub trait PlayerLink {
    fn send(&mut self, msg: &HubMessage) -> Result<(), PeerError>;

    /// Blocks for the player's reply and returns it without its newline.
    fn receive_play(&mut self) -> Result<String, PeerError>;
}

impl<L: PlayerLink + ?Sized> PlayerLink for Box<L> {
    fn send(&mut self, msg: &HubMessage) -> Result<(), PeerError> {
        (**self).send(msg)
    }

    fn receive_play(&mut self) -> Result<String, PeerError> {
        (**self).receive_play()
    }
}

pub struct Session {
    engine: Engine,
}

impl Session {
    pub fn new(players: PlayerCount, threshold: u32) -> Self {
        Self {
            engine: Engine::new(players, threshold),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Plays rounds until the game is won and returns the winners.
    ///
    /// `links[i]` is the player in seat `i`. The transcript goes to `out`.
    /// Any player failure or illegal play ends the game with an error.
    pub fn play<L: PlayerLink>(
        &mut self,
        decks: &mut DeckSource,
        links: &mut [L],
        out: &mut dyn Write,
    ) -> Result<Vec<Seat>, HubError> {
        let players = self.engine.players();
        if links.len() != players.get() {
            return Err(HubError::Syscall(format!(
                "{} players seated for a {}-player game",
                links.len(),
                players
            )));
        }
        loop {
            self.deal(decks, links, out)?;
            while let Some(turn) = self.engine.turn() {
                let seat = turn.seat;
                let led = turn.kind == TurnKind::Lead;
                let link = &mut links[seat.index()];
                link.send(&if led {
                    HubMessage::NewTrick
                } else {
                    HubMessage::YourTurn
                })?;
                let reply = link.receive_play()?;
                let card = parse_play(&reply).map_err(|e| HubError::BadMessage {
                    seat,
                    detail: e.to_string(),
                })?;
                self.engine.play(seat, card)?;
                writeln!(out, "{}", format_play(seat, card, led))?;
                broadcast(links, &HubMessage::Played(card))?;

                if matches!(self.engine.state(), TableState::Resolving { .. }) {
                    self.finish_trick(links, out)?;
                }
            }
            if let Some(winners) = self.engine.score_round()? {
                info!(?winners, scores = ?self.engine.scores(), "game over");
                writeln!(out, "{}", format_winners(&winners))?;
                return Ok(winners);
            }
        }
    }

    fn deal<L: PlayerLink>(
        &mut self,
        decks: &mut DeckSource,
        links: &mut [L],
        out: &mut dyn Write,
    ) -> Result<(), HubError> {
        let deck = decks.position();
        let hands = decks.next_round(self.engine.players());
        self.engine.deal(&hands)?;
        info!(round = self.engine.round(), deck, "dealt");
        for (seat, (link, hand)) in self.engine.players().seats().zip(links.iter_mut().zip(&hands)) {
            link.send(&HubMessage::NewRound(hand.clone()))?;
            writeln!(out, "{}", format_hand(seat, hand))?;
        }
        Ok(())
    }

    fn finish_trick<L: PlayerLink>(
        &mut self,
        links: &mut [L],
        out: &mut dyn Write,
    ) -> Result<(), HubError> {
        let result = self.engine.resolve()?;
        info!(
            trick = result.number,
            winner = %result.winner,
            points = result.points,
            "trick resolved"
        );
        let scores = HubMessage::Scores(self.engine.scores().to_vec());
        for link in links.iter_mut() {
            link.send(&HubMessage::TrickOver)?;
            if result.round_over {
                link.send(&scores)?;
            }
        }
        if result.round_over {
            writeln!(out, "{}", format_scores(self.engine.scores()))?;
        }
        Ok(())
    }
}

fn broadcast<L: PlayerLink>(links: &mut [L], msg: &HubMessage) -> Result<(), PeerError> {
    links.iter_mut().try_for_each(|link| link.send(msg))
}

/// Parses the win score: a non-negative decimal integer, digits only.
pub fn parse_threshold(text: &str) -> Result<u32, HubError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HubError::InvalidScore(text.to_string()));
    }
    text.parse()
        .map_err(|_| HubError::InvalidScore(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_must_be_plain_digits() {
        assert_eq!(parse_threshold("0").ok(), Some(0));
        assert_eq!(parse_threshold("42").ok(), Some(42));
        for bad in ["", "-1", "+3", "4x", " 4", "99999999999"] {
            assert!(
                matches!(parse_threshold(bad), Err(HubError::InvalidScore(_))),
                "{bad:?}"
            );
        }
    }
}
