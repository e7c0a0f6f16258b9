//! # clubhub: Clubs Game Hub
//!
//! Referees a game of Clubs between 2 to 4 player programs. The hub starts
//! each program as a child process, deals from a deck file, asks players for
//! cards in turn, rejects illegal plays, and keeps score until someone
//! reaches the win score. The lowest score wins.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the command line, runs the whole game and returns the
//! process exit status (see [`exit_code`]).
//!
//! ```no_run
//! use std::io;
//! let args = ["clubhub", "decks.txt", "20", "clubber", "clubber"];
//! let code = clubhub_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Modules
//!
//! - `channel`: one player process, its pipes and the readiness handshake
//! - `roster`: every started player and how to stop them all
//! - `shutdown`: SIGINT watcher and the coordinator it reports to
//! - `session`: the deal/trick/score loop over any [`session::PlayerLink`]
//! - `config`: defaults, TOML file and environment overrides

use clap::Parser;
use std::io::Write;
use std::sync::Arc;

use clubhub_engine::deck::DeckSource;
use clubhub_engine::player::PlayerCount;
use tracing::{debug, info};

pub mod channel;
pub mod cli;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod logging;
pub mod roster;
pub mod session;
pub mod shutdown;
pub mod ui;

use channel::Channel;
use cli::HubArgs;
use config::Config;
use roster::Roster;
use session::{Session, parse_threshold};

pub use error::HubError;

/// Runs one game and returns the exit status.
///
/// # Arguments
///
/// * `args` - Command line including the program name
/// * `out` - Receives the game transcript
/// * `err` - Receives player exit reports and the failure message, if any
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let resolved = match config::load_with_sources() {
        Ok(resolved) => resolved,
        Err(e) => return fail(err, HubError::Config(e.to_string())),
    };
    logging::init_logging(&resolved.config.log_filter);
    debug!(config = ?resolved.config, sources = ?resolved.sources, "configuration loaded");

    match host_game(&argv, &resolved.config, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => fail(err, e),
    }
}

fn fail(err: &mut dyn Write, error: HubError) -> i32 {
    info!(?error, "hub exiting");
    let _ = ui::write_error(err, &error);
    error.exit_code()
}

fn host_game(
    argv: &[String],
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), HubError> {
    let args = HubArgs::try_parse_from(argv).map_err(|_| HubError::Usage)?;
    let threshold = parse_threshold(&args.winscore)?;
    let players = PlayerCount::new(args.programs.len()).ok_or(HubError::Usage)?;
    let mut decks = DeckSource::load(&args.deckfile)?;

    let roster = Arc::new(Roster::new(config.grace_period()));
    shutdown::coordinator().attach(&roster);
    let result = seat_and_play(&args.programs, players, threshold, &mut decks, &roster, out);

    // Blocks while an interrupt is shutting the table down; that path exits
    // the process itself.
    if let Some(reports) = roster.terminate_all() {
        let _ = ui::write_reports(err, &reports);
    }
    shutdown::coordinator().detach();
    result
}

fn seat_and_play(
    programs: &[String],
    players: PlayerCount,
    threshold: u32,
    decks: &mut DeckSource,
    roster: &Roster,
    out: &mut dyn Write,
) -> Result<(), HubError> {
    let mut channels = Vec::with_capacity(players.get());
    for (seat, program) in players.seats().zip(programs) {
        let mut channel = Channel::spawn(program, players, seat)?;
        roster.register(&channel);
        channel.handshake()?;
        roster.mark_ready(seat);
        channels.push(channel);
    }

    Session::new(players, threshold).play(decks, &mut channels, out)?;
    out.flush()?;
    Ok(())
}
