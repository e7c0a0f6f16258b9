use std::io;

fn main() {
    clubhub_ai::logging::init_logging();
    let code = clubhub_ai::run(
        std::env::args(),
        &mut io::stdin().lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    );
    std::process::exit(code);
}
