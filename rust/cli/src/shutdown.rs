//! SIGINT handling for the hub.
//!
//! SIGINT is blocked in every hub thread and collected by a dedicated
//! watcher thread with `sigwait`. The watcher reaches the live [`Roster`]
//! through a process-wide [`ShutdownCoordinator`] that holds only a weak
//! reference, so the roster's lifetime stays with the game.

use std::io::{self, Write};
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};
use std::thread;

use tracing::info;

use crate::error::HubError;
use crate::roster::Roster;

#[derive(Debug, Default)]
pub struct ShutdownCoordinator {
    roster: Mutex<Weak<Roster>>,
}

impl ShutdownCoordinator {
    pub fn attach(&self, roster: &Arc<Roster>) {
        *self.roster.lock().unwrap_or_else(PoisonError::into_inner) = Arc::downgrade(roster);
    }

    pub fn detach(&self) {
        *self.roster.lock().unwrap_or_else(PoisonError::into_inner) = Weak::new();
    }

    pub fn roster(&self) -> Option<Arc<Roster>> {
        self.roster
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade()
    }

    /// Shuts the players down and exits with the interrupted status.
    ///
    /// Returns without exiting only when the game loop already finished the
    /// shutdown and is on its way out with its own status.
    pub fn interrupt(&self) {
        let Some(roster) = self.roster() else {
            exit_interrupted(Vec::new());
        };
        roster.terminate_then::<(), _>(|reports| exit_interrupted(reports));
    }
}

fn exit_interrupted(reports: Vec<String>) -> ! {
    let err = HubError::Interrupted;
    info!("{}", err);
    let mut stderr = io::stderr().lock();
    for line in reports {
        let _ = writeln!(stderr, "{}", line);
    }
    let _ = writeln!(stderr, "{}", err);
    let _ = stderr.flush();
    std::process::exit(err.exit_code());
}

pub fn coordinator() -> &'static ShutdownCoordinator {
    static COORDINATOR: OnceLock<ShutdownCoordinator> = OnceLock::new();
    COORDINATOR.get_or_init(ShutdownCoordinator::default)
}

/// Ignores SIGPIPE, blocks SIGINT in the calling thread and starts the
/// watcher. Call from `main` before any other thread or child is started;
/// children get a clean signal mask from `std::process::Command`.
pub fn install_signal_handlers() -> io::Result<()> {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let set = sigint_set();
    // SAFETY: plain libc calls on a fully initialised sigset_t
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_IGN);
        let rc = libc::pthread_sigmask(libc::SIG_BLOCK, &set, ptr::null_mut());
        if rc != 0 {
            return Err(io::Error::from_raw_os_error(rc));
        }
    }

    thread::Builder::new()
        .name("sigint-watcher".into())
        .spawn(move || watch(set))?;
    let _ = INSTALLED.set(());
    Ok(())
}

fn sigint_set() -> libc::sigset_t {
    let mut set = MaybeUninit::<libc::sigset_t>::uninit();
    // SAFETY: sigemptyset initialises the set before it is read
    unsafe {
        libc::sigemptyset(set.as_mut_ptr());
        libc::sigaddset(set.as_mut_ptr(), libc::SIGINT);
        set.assume_init()
    }
}

fn watch(set: libc::sigset_t) {
    loop {
        let mut sig: libc::c_int = 0;
        // SAFETY: `set` is initialised and SIGINT is blocked in this thread
        let rc = unsafe { libc::sigwait(&set, &mut sig) };
        if rc == 0 && sig == libc::SIGINT {
            coordinator().interrupt();
        }
    }
}
