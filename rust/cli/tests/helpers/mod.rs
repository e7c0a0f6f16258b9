//! Shared pieces for the hub's integration tests.
//!
//! - `cli_runner`: runs the built `clubhub` binary and collects its output
//! - `temp_files`: deck files and executable fake players in a temp dir
//! - `links`: in-process players for driving a `Session` directly
//!
//! ```rust
//! use crate::helpers::cli_runner::{CliRunner, clubber_path};
//! use crate::helpers::temp_files::{TempFileManager, ordered_deck};
//!
//! let tmp = TempFileManager::new();
//! let deck = tmp.create_file("one.deck", &ordered_deck());
//! let clubber = clubber_path();
//! let res = CliRunner::new().run(&[deck.to_str().unwrap(), "20", &clubber, &clubber]);
//! assert_eq!(res.exit_code, 0);
//! ```
#![allow(dead_code)]

pub mod cli_runner;
pub mod links;
pub mod temp_files;
