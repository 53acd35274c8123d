//! Reveal lines of text like a typewriter.
//!
//! Lines come from the arguments, or from stdin when there are none:
//!
//! ```sh
//! cargo run --example typewriter -- "Hello" "World"
//! fortune | cargo run --example typewriter -- --tick-ms 20 --key q
//! ```
//!
//! Set `RUST_LOG=typewriter=trace` to see every frame logged once the terminal is restored.

use std::io::{self, BufRead};
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use typewriter::{Crossterm, Finish, Key, Typewriter};

#[derive(Debug, Parser)]
#[command(about = "Reveal lines of text like a typewriter")]
struct Args {
    /// Milliseconds between two revealed characters.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Milliseconds the finished text stays on screen.
    #[arg(long, default_value_t = 500)]
    hold_ms: u64,

    /// The key that skips the animation, e.g. `Escape`, `q` or `F5`.
    #[arg(long, default_value_t = Key::Escape)]
    key: Key,

    /// Skip the animation on any key press.
    #[arg(long)]
    any_key: bool,

    /// Print the lines without animating.
    #[arg(long)]
    print: bool,

    /// The lines to show. Read from stdin when empty.
    lines: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let lines = if args.lines.is_empty() {
        io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?
    } else {
        args.lines
    };

    let mut typewriter = Typewriter::new()
        .with_tick_interval(Duration::from_millis(args.tick_ms))
        .with_hold_duration(Duration::from_millis(args.hold_ms))
        .with_terminate_key(args.key)
        .with_terminate_on_any_key(args.any_key)
        .with_lines(lines);

    if args.print {
        typewriter.print_lines();
        return Ok(());
    }

    match typewriter.play(Crossterm::default())? {
        Finish::Completed => tracing::info!("animation completed"),
        Finish::Terminated(press) => {
            tracing::info!(key = %press.key, "animation skipped");
            // Leave what had been revealed so far on the normal screen.
            typewriter.print_lines();
        }
    }

    Ok(())
}
