use std::io::{self, Write};

use castle::chess::state::GameState;
use castle::session::Session;
use clap::Parser;

/// Text driver for the castle legal move generator.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Initial position in Forsyth-Edwards Notation
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .target(env_logger::Target::Stderr)
        .init();

    let state = match args.fen {
        Some(fen) => GameState::try_from(fen.as_str())?,
        None => GameState::starting(),
    };

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    castle::print_engine_info(&mut output)?;

    let mut session = Session::new(state, &mut input, &mut output);
    session.run()
}
