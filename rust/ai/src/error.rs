use std::fmt;

use crate::exit_code;

/// Every way an agent run can end other than a clean `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    Usage,
    InvalidPlayerCount(String),
    InvalidSeat(String),
    HubLost,
    /// Malformed, oversized or out-of-phase hub message, with the reason.
    BadMessage(String),
}

impl AgentError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AgentError::Usage => exit_code::BAD_ARGS,
            AgentError::InvalidPlayerCount(_) => exit_code::BAD_PLAYERS,
            AgentError::InvalidSeat(_) => exit_code::BAD_ID,
            AgentError::HubLost => exit_code::HUB_LOST,
            AgentError::BadMessage(_) => exit_code::BAD_MESSAGE,
        }
    }

    pub(crate) fn bad(reason: impl Into<String>) -> Self {
        AgentError::BadMessage(reason.into())
    }
}

/// The one-line message printed to stderr before exiting.
impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::Usage => write!(f, "Usage: player number_of_players myid"),
            AgentError::InvalidPlayerCount(_) => write!(f, "Invalid player count"),
            AgentError::InvalidSeat(_) => write!(f, "Invalid player ID"),
            AgentError::HubLost => write!(f, "Unexpected loss of hub"),
            AgentError::BadMessage(_) => write!(f, "Bad message from hub"),
        }
    }
}

impl std::error::Error for AgentError {}

impl From<clubhub_engine::errors::ProtocolError> for AgentError {
    fn from(err: clubhub_engine::errors::ProtocolError) -> Self {
        AgentError::BadMessage(err.to_string())
    }
}

impl From<std::io::Error> for AgentError {
    fn from(_: std::io::Error) -> Self {
        AgentError::HubLost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_and_nonzero() {
        let errors = [
            AgentError::Usage,
            AgentError::InvalidPlayerCount("5".into()),
            AgentError::InvalidSeat("E".into()),
            AgentError::HubLost,
            AgentError::bad("garbage"),
        ];
        let codes: Vec<i32> = errors.iter().map(AgentError::exit_code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn display_hides_reason() {
        assert_eq!(AgentError::bad("x").to_string(), "Bad message from hub");
        assert_eq!(
            AgentError::InvalidSeat("Z".into()).to_string(),
            "Invalid player ID"
        );
    }
}
