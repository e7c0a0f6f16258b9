//! Process entry point for the `clubber` agent.

use std::io::{BufRead, Read, Write};

use clap::Parser;
use clubhub_engine::player::{PlayerCount, Seat};
use clubhub_engine::protocol::{HubMessage, MAX_HUB_LINE, READY};
use tracing::{debug, info, warn};

use crate::Strategy;
use crate::agent::{Agent, Step};
use crate::error::AgentError;
use crate::exit_code;
use crate::strategy::Clubber;

/// Characters of each hub line echoed to the log.
const ECHO_LEN: usize = 20;

#[derive(Parser, Debug)]
#[command(name = "clubber", disable_help_flag = true, disable_version_flag = true)]
struct AgentArgs {
    #[arg(allow_hyphen_values = true)]
    players: String,
    #[arg(allow_hyphen_values = true)]
    seat: String,
}

/// Runs one agent over `input` / `out` and returns its exit status.
///
/// `args` includes the program name. Failure messages go to `err`.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(b"end\n".to_vec());
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// let code = clubhub_ai::run(["clubber", "2", "A"], &mut input, &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert_eq!(out, b"-");
/// ```
pub fn run<I, S>(args: I, input: &mut dyn BufRead, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
    let result = parse_args(&argv).and_then(|(players, seat)| {
        let mut agent = Agent::new(players, seat, Clubber::new());
        play(&mut agent, input, out)
    });
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            if let AgentError::BadMessage(reason) = &e {
                warn!(%reason, "giving up on hub");
            }
            let _ = writeln!(err, "{e}");
            e.exit_code()
        }
    }
}

fn parse_args(argv: &[String]) -> Result<(PlayerCount, Seat), AgentError> {
    let args = AgentArgs::try_parse_from(argv).map_err(|_| AgentError::Usage)?;
    let players = PlayerCount::parse(&args.players)
        .ok_or_else(|| AgentError::InvalidPlayerCount(args.players.clone()))?;
    let seat = Seat::from_letter(&args.seat, players)
        .ok_or_else(|| AgentError::InvalidSeat(args.seat.clone()))?;
    Ok((players, seat))
}

/// Handshake, then answer the hub until `end`.
pub fn play<S: Strategy>(
    agent: &mut Agent<S>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), AgentError> {
    out.write_all(&[READY])?;
    out.flush()?;
    loop {
        let line = read_hub_line(input)?;
        info!("From hub:{}", line.chars().take(ECHO_LEN).collect::<String>());
        let msg = HubMessage::parse(&line)?;
        match agent.handle(msg)? {
            Step::Wait => {}
            Step::Play(card) => {
                writeln!(out, "{card}")?;
                out.flush()?;
            }
            Step::Done => return Ok(()),
        }
        debug!("{}", agent.tracker().status());
    }
}

/// Reads one newline-terminated line of at most [`MAX_HUB_LINE`] bytes.
///
/// End of input, even after a partial line, means the hub is gone. A line
/// that runs past the limit is a bad message.
pub fn read_hub_line(input: &mut dyn BufRead) -> Result<String, AgentError> {
    let mut buf = Vec::with_capacity(MAX_HUB_LINE + 1);
    input
        .take(MAX_HUB_LINE as u64 + 1)
        .read_until(b'\n', &mut buf)?;
    if buf.pop() != Some(b'\n') {
        return Err(if buf.len() >= MAX_HUB_LINE {
            AgentError::bad("line too long")
        } else {
            AgentError::HubLost
        });
    }
    String::from_utf8(buf).map_err(|_| AgentError::bad("line is not ASCII"))
}
