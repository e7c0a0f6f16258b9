//! One player process as seen from the hub.
//!
//! A [`Channel`] is split in two. The inbound stream stays with the game
//! loop, which is the only reader. The child handle and the outbound stream
//! form a [`ChannelProcess`] behind an `Arc<Mutex<_>>` so the roster can
//! shut the player down from another thread without waiting on a read.

use std::fmt;
use std::io::{self, BufReader, ErrorKind, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex, PoisonError};

use clubhub_engine::player::{PlayerCount, Seat};
use clubhub_engine::protocol::{HubMessage, PLAY_LINE_LEN, READY};
use tracing::debug;

use crate::session::PlayerLink;

/// A player stopped talking or said something that is not a card line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerError {
    /// End of stream, or the player stopped reading our messages
    Quit { seat: Seat },
    /// Reply was not two characters and a newline
    Malformed { seat: Seat, line: String },
}

impl fmt::Display for PeerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerError::Quit { seat } => write!(f, "player {} quit", seat),
            PeerError::Malformed { seat, line } => {
                write!(f, "player {} sent {:?}", seat, line)
            }
        }
    }
}

impl std::error::Error for PeerError {}

/// A player process could not be brought to the ready state.
#[derive(Debug)]
pub enum ProcessError {
    Spawn { program: String, source: io::Error },
    Handshake { seat: Seat, reason: String },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn { program, source } => {
                write!(f, "cannot start {}: {}", program, source)
            }
            ProcessError::Handshake { seat, reason } => {
                write!(f, "player {} did not get ready: {}", seat, reason)
            }
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Spawn { source, .. } => Some(source),
            ProcessError::Handshake { .. } => None,
        }
    }
}

/// Child handle plus the stream we write to it.
///
/// Dropping an unreaped process kills and reaps it.
#[derive(Debug)]
pub struct ChannelProcess {
    seat: Seat,
    child: Child,
    writer: Option<ChildStdin>,
    reaped: bool,
}

impl ChannelProcess {
    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    pub fn is_reaped(&self) -> bool {
        self.reaped
    }

    /// Writes one line and flushes it.
    pub fn send_line(&mut self, line: &str) -> io::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::from(ErrorKind::BrokenPipe))?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    /// Closes the player's input so it sees end of file.
    pub fn close_input(&mut self) {
        self.writer = None;
    }

    /// Reaps the child, killing it first if it is still running. Returns
    /// `None` if it was already reaped.
    pub fn finish(&mut self) -> io::Result<Option<ExitStatus>> {
        if self.reaped {
            return Ok(None);
        }
        let status = match self.child.try_wait()? {
            Some(status) => status,
            None => {
                // fails only if the child exited in between; wait still reaps it
                let _ = self.child.kill();
                self.child.wait()?
            }
        };
        self.reaped = true;
        Ok(Some(status))
    }
}

impl Drop for ChannelProcess {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
            self.reaped = true;
        }
    }
}

pub struct Channel {
    seat: Seat,
    reader: BufReader<ChildStdout>,
    process: Arc<Mutex<ChannelProcess>>,
}

impl Channel {
    /// Starts `program` as player `seat` with arguments `<players> <seat>`.
    ///
    /// The player's stderr is discarded.
    pub fn spawn(program: &str, players: PlayerCount, seat: Seat) -> Result<Self, ProcessError> {
        let child = Command::new(program)
            .arg(players.to_string())
            .arg(seat.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: program.to_string(),
                source,
            })?;
        let mut process = ChannelProcess {
            seat,
            child,
            writer: None,
            reaped: false,
        };
        let (Some(stdin), Some(stdout)) = (process.child.stdin.take(), process.child.stdout.take())
        else {
            return Err(ProcessError::Handshake {
                seat,
                reason: "pipes unavailable".into(),
            });
        };
        process.writer = Some(stdin);
        debug!(%seat, program, pid = process.pid(), "spawned player");
        Ok(Self {
            seat,
            reader: BufReader::new(stdout),
            process: Arc::new(Mutex::new(process)),
        })
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Shared handle to the process half, for the roster.
    pub fn process(&self) -> Arc<Mutex<ChannelProcess>> {
        Arc::clone(&self.process)
    }

    /// Reads the single readiness byte every player sends first.
    pub fn handshake(&mut self) -> Result<(), ProcessError> {
        let seat = self.seat;
        let mut byte = [0u8; 1];
        match read_byte(&mut self.reader, &mut byte) {
            Ok(true) if byte[0] == READY => {
                debug!(%seat, "player ready");
                Ok(())
            }
            Ok(true) => Err(ProcessError::Handshake {
                seat,
                reason: format!("expected {:?}, got {:?}", READY as char, byte[0] as char),
            }),
            Ok(false) => Err(ProcessError::Handshake {
                seat,
                reason: "closed before getting ready".into(),
            }),
            Err(e) => Err(ProcessError::Handshake {
                seat,
                reason: e.to_string(),
            }),
        }
    }
}

/// Reads one byte, retrying interrupted reads. `Ok(false)` at end of stream.
fn read_byte(reader: &mut impl Read, byte: &mut [u8; 1]) -> io::Result<bool> {
    loop {
        match reader.read(byte) {
            Ok(0) => return Ok(false),
            Ok(_) => return Ok(true),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Reads a reply of at most [`PLAY_LINE_LEN`] bytes, stopping after a
/// newline. Returns the two characters before the newline.
pub fn read_play_line(seat: Seat, reader: &mut impl Read) -> Result<String, PeerError> {
    let mut line = Vec::with_capacity(PLAY_LINE_LEN);
    let mut byte = [0u8; 1];
    while line.len() < PLAY_LINE_LEN {
        match read_byte(reader, &mut byte) {
            Ok(true) => {
                line.push(byte[0]);
                if byte[0] == b'\n' {
                    break;
                }
            }
            Ok(false) | Err(_) => return Err(PeerError::Quit { seat }),
        }
    }
    if line.len() != PLAY_LINE_LEN || line[PLAY_LINE_LEN - 1] != b'\n' {
        return Err(PeerError::Malformed {
            seat,
            line: String::from_utf8_lossy(&line).into_owned(),
        });
    }
    line.pop();
    Ok(String::from_utf8_lossy(&line).into_owned())
}

impl PlayerLink for Channel {
    fn send(&mut self, msg: &HubMessage) -> Result<(), PeerError> {
        let seat = self.seat;
        let line = msg.to_string();
        debug!(%seat, "-> {}", line);
        let mut process = self.process.lock().unwrap_or_else(PoisonError::into_inner);
        process
            .send_line(&line)
            .map_err(|_| PeerError::Quit { seat })
    }

    fn receive_play(&mut self) -> Result<String, PeerError> {
        let reply = read_play_line(self.seat, &mut self.reader)?;
        debug!(seat = %self.seat, "<- {}", reply);
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(bytes: &[u8]) -> Result<String, PeerError> {
        read_play_line(Seat::FIRST, &mut Cursor::new(bytes.to_vec()))
    }

    #[test]
    fn reads_two_characters_and_newline() {
        assert_eq!(read(b"QC\n"), Ok("QC".to_string()));
        let mut two = Cursor::new(b"2S\n3S\n".to_vec());
        assert_eq!(read_play_line(Seat::FIRST, &mut two), Ok("2S".to_string()));
        assert_eq!(read_play_line(Seat::FIRST, &mut two), Ok("3S".to_string()));
    }

    #[test]
    fn eof_before_newline_is_quit() {
        assert_eq!(read(b""), Err(PeerError::Quit { seat: Seat::FIRST }));
        assert_eq!(read(b"2S"), Err(PeerError::Quit { seat: Seat::FIRST }));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        for bad in [&b"X\n"[..], b"\n", b"10H\n", b"2SX"] {
            assert!(
                matches!(read(bad), Err(PeerError::Malformed { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn spawn_failure_is_process_error() {
        let two = PlayerCount::new(2).unwrap();
        let err = Channel::spawn("/nonexistent/clubber", two, Seat::FIRST)
            .err()
            .unwrap();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }

    #[test]
    fn finish_reaps_once() {
        let two = PlayerCount::new(2).unwrap();
        let channel = Channel::spawn("cat", two, Seat::FIRST).unwrap();
        let process = channel.process();
        let mut process = process.lock().unwrap();
        process.close_input();
        assert!(process.finish().unwrap().is_some());
        assert!(process.is_reaped());
        assert!(process.finish().unwrap().is_none());
    }
}
