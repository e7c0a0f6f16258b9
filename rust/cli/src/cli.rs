use clap::Parser;
use std::path::PathBuf;

/// `clubhub deckfile winscore prog1 prog2 [prog3 [prog4]]`
#[derive(Parser, Debug)]
#[command(
    name = "clubhub",
    about = "Referee a game of Clubs between 2 to 4 player programs",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct HubArgs {
    /// File of one or more 52-card decks
    #[arg(allow_hyphen_values = true)]
    pub deckfile: PathBuf,
    /// Score at which the game ends; checked by the hub, not by clap
    #[arg(allow_hyphen_values = true)]
    pub winscore: String,
    /// Player programs, one per seat starting at A
    #[arg(required = true, num_args = 2..=4, allow_hyphen_values = true)]
    pub programs: Vec<String>,
}
