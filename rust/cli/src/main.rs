use std::io::{self, Write};

use clubhub_cli::{HubError, exit_code, shutdown};

fn main() {
    if let Err(e) = shutdown::install_signal_handlers() {
        let _ = writeln!(io::stderr(), "{}", HubError::from(e));
        std::process::exit(exit_code::SYSCALL);
    }
    let code = clubhub_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
