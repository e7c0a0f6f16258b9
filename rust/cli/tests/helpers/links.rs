use std::collections::VecDeque;

use clubhub_ai::agent::{Agent, Step};
use clubhub_ai::strategy::Clubber;
use clubhub_cli::channel::PeerError;
use clubhub_cli::session::PlayerLink;
use clubhub_engine::player::{PlayerCount, Seat};
use clubhub_engine::protocol::HubMessage;

/// A `clubber` agent running inside the test process.
pub struct AgentLink {
    seat: Seat,
    agent: Agent<Clubber>,
    replies: VecDeque<String>,
    /// Every message the hub sent, in wire form
    pub received: Vec<String>,
}

impl AgentLink {
    pub fn table(players: usize) -> Vec<AgentLink> {
        let count = PlayerCount::new(players).expect("player count");
        count
            .seats()
            .map(|seat| AgentLink {
                seat,
                agent: Agent::new(count, seat, Clubber),
                replies: VecDeque::new(),
                received: Vec::new(),
            })
            .collect()
    }
}

impl PlayerLink for AgentLink {
    fn send(&mut self, msg: &HubMessage) -> Result<(), PeerError> {
        self.received.push(msg.to_string());
        match self.agent.handle(msg.clone()) {
            Ok(Step::Play(card)) => self.replies.push_back(card.to_string()),
            Ok(_) => {}
            Err(e) => panic!("agent {} rejected {}: {}", self.seat, msg, e),
        }
        Ok(())
    }

    fn receive_play(&mut self) -> Result<String, PeerError> {
        self.replies
            .pop_front()
            .ok_or(PeerError::Quit { seat: self.seat })
    }
}

/// Replies with canned lines regardless of what the hub says, then behaves
/// as if the player quit.
pub struct ScriptedLink {
    seat: Seat,
    replies: VecDeque<Result<String, PeerError>>,
}

impl ScriptedLink {
    pub fn new(seat: Seat, replies: &[&str]) -> Self {
        Self {
            seat,
            replies: replies.iter().map(|r| Ok(r.to_string())).collect(),
        }
    }

    pub fn malformed(seat: Seat, line: &str) -> Self {
        let mut link = Self::new(seat, &[]);
        link.replies.push_back(Err(PeerError::Malformed {
            seat,
            line: line.to_string(),
        }));
        link
    }
}

impl PlayerLink for ScriptedLink {
    fn send(&mut self, _msg: &HubMessage) -> Result<(), PeerError> {
        Ok(())
    }

    fn receive_play(&mut self) -> Result<String, PeerError> {
        self.replies
            .pop_front()
            .unwrap_or(Err(PeerError::Quit { seat: self.seat }))
    }
}
