//! Every player process the hub has started, and how to stop them.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use clubhub_engine::player::Seat;
use clubhub_engine::protocol::HubMessage;
use tracing::{debug, info, warn};

use crate::channel::{Channel, ChannelProcess};

struct Entry {
    seat: Seat,
    pid: u32,
    process: Arc<Mutex<ChannelProcess>>,
    /// Completed the readiness handshake; only such players are reported
    ready: bool,
}

/// Owner of the process half of every channel.
///
/// [`Roster::terminate_all`] may be called from the game loop and from the
/// interrupt watcher at once: the first caller does the work while later
/// callers wait for it and then find nothing left to do.
pub struct Roster {
    entries: Mutex<Vec<Entry>>,
    grace: Duration,
    /// Held for the whole shutdown; true once it has run
    terminated: Mutex<bool>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Roster {
    pub fn new(grace: Duration) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            grace,
            terminated: Mutex::new(false),
        }
    }

    pub fn register(&self, channel: &Channel) {
        let process = channel.process();
        let pid = lock(&process).pid();
        lock(&self.entries).push(Entry {
            seat: channel.seat(),
            pid,
            process,
            ready: false,
        });
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records that `seat` completed its handshake, so an abnormal exit of
    /// that player will be reported.
    pub fn mark_ready(&self, seat: Seat) {
        if let Some(entry) = lock(&self.entries).iter_mut().find(|e| e.seat == seat) {
            entry.ready = true;
        }
    }

    pub fn is_terminated(&self) -> bool {
        *lock(&self.terminated)
    }

    /// Stops every player and returns one report line per abnormal exit, or
    /// `None` if another call already did so.
    pub fn terminate_all(&self) -> Option<Vec<String>> {
        self.terminate_then(|reports| reports)
    }

    /// Like [`Roster::terminate_all`], but runs `then` on the reports while
    /// still holding the shutdown lock, so no other caller can proceed
    /// until it returns (or exits the process).
    pub fn terminate_then<T, F>(&self, then: F) -> Option<T>
    where
        F: FnOnce(Vec<String>) -> T,
    {
        let mut terminated = lock(&self.terminated);
        if *terminated {
            return None;
        }
        let entries: Vec<(Seat, u32, Arc<Mutex<ChannelProcess>>, bool)> = lock(&self.entries)
            .iter()
            .map(|e| (e.seat, e.pid, Arc::clone(&e.process), e.ready))
            .collect();

        // Ask nicely. A process busy in a blocked write is skipped here.
        let end = HubMessage::End.to_string();
        let mut waiting = false;
        for (seat, _, process, _) in &entries {
            if let Ok(mut process) = process.try_lock() {
                if process.is_reaped() {
                    continue;
                }
                if process.send_line(&end).is_err() {
                    debug!(%seat, "could not send end");
                }
                process.close_input();
                waiting = true;
            } else {
                waiting = true;
            }
        }
        if waiting {
            thread::sleep(self.grace);
        }

        let mut reports = Vec::new();
        for (seat, pid, process, ready) in &entries {
            let mut guard = match process.try_lock() {
                Ok(guard) => guard,
                Err(_) => {
                    // the holder is stuck writing to this player; killing it
                    // breaks the pipe and releases the lock
                    kill(*pid);
                    lock(process)
                }
            };
            match guard.finish() {
                Ok(Some(status)) => {
                    if *ready && let Some(line) = exit_report(*seat, status) {
                        info!("{}", line);
                        reports.push(line);
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(%seat, "could not reap player: {}", e),
            }
        }

        *terminated = true;
        Some(then(reports))
    }
}

fn kill(pid: u32) {
    if let Ok(pid) = libc::pid_t::try_from(pid) {
        // SAFETY: kill(2) with a pid we spawned and have not reaped yet
        unsafe {
            libc::kill(pid, libc::SIGKILL);
        }
    }
}

/// Report line for a player that did not exit cleanly.
pub fn exit_report(seat: Seat, status: ExitStatus) -> Option<String> {
    if let Some(code) = status.code() {
        (code != 0).then(|| format!("Player {} exited with status {}", seat, code))
    } else {
        status
            .signal()
            .map(|sig| format!("Player {} terminated due to signal {}", seat, sig))
    }
}
