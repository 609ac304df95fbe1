//! TTX deck driver.
//!
//! Reads one JSON action per stdin line and answers with one JSON reply per
//! stdout line. The first line written is the view of the freshly dealt deck.
//!
//! Important env variables:
//!   TTX_DECK_CONFIG : path to TOML deck config (built-in demo exercise if unset)
//!   LOG_LEVEL       : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

use std::io::{self, BufRead, Write};

use tracing::info;

use ttx_deck::session::{dispatch, handle_line, SessionAction};
use ttx_deck::{telemetry, DeckConfig, DeckSession};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let config = DeckConfig::from_env()?.unwrap_or_else(DeckConfig::demo_exercise);
    config.validate()?;
    let mut session = DeckSession::from_config(config);

    let mut stdout = io::stdout().lock();
    let initial = dispatch(&mut session, SessionAction::View);
    writeln!(stdout, "{}", serde_json::to_string(&initial)?)?;
    stdout.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(stdout, "{}", handle_line(&mut session, &line))?;
        stdout.flush()?;
    }

    info!(target: "deck", flips = session.state().flip_count(), "Input closed; exiting");
    Ok(())
}
