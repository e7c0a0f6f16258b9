use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Default limit for one hub run; a game between clubbers takes well under
/// a second.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct CliRunner {
    binary_path: PathBuf,
    env: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl CliResult {
    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// Path of the built `clubber` agent.
pub fn clubber_path() -> String {
    env!("CARGO_BIN_EXE_clubber").to_string()
}

impl Default for CliRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CliRunner {
    pub fn new() -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_clubhub")),
            env: Vec::new(),
        }
    }

    /// Adds an environment variable for every later run. The test process's
    /// own environment is never modified.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args)
            .env_remove("CLUBHUB_CONFIG")
            .env_remove("CLUBHUB_GRACE_MS")
            .env_remove("CLUBHUB_LOG")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> CliResult {
        self.run_with_timeout(args, DEFAULT_TIMEOUT)
    }

    pub fn run_with_timeout(&self, args: &[&str], limit: Duration) -> CliResult {
        let start = Instant::now();
        let child = self.spawn(args);
        wait_with_timeout(child, start, limit)
    }

    /// Starts the hub without waiting, e.g. to signal it.
    pub fn spawn(&self, args: &[&str]) -> Child {
        self.command(args).spawn().expect("failed to spawn clubhub")
    }
}

/// Waits for `child`, killing it once `limit` has passed since `start`.
pub fn wait_with_timeout(mut child: Child, start: Instant, limit: Duration) -> CliResult {
    loop {
        if child.try_wait().expect("failed to poll child").is_some() {
            break;
        }
        if start.elapsed() >= limit {
            let _ = child.kill();
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    let output = child.wait_with_output().expect("failed to read output");
    CliResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
    }
}
