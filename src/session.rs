use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::backend::{Backend, TurnOutput};

/// Dispatches a single composed prompt and prints any returned text.
/// Streamed backends have already written to the terminal by the time the
/// dispatch resolves.
pub async fn run_once(backend: &dyn Backend, prompt: &str) -> Result<()> {
    match backend.dispatch(prompt).await? {
        TurnOutput::Text(text) => println!("{text}"),
        TurnOutput::Streamed => {}
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TurnRead {
    Input(String),
    Blank,
    StreamEnd,
}

fn classify_turn(lines: Vec<String>) -> TurnRead {
    if lines.is_empty() {
        return TurnRead::StreamEnd;
    }
    let joined = lines.join("\n");
    if joined.trim().is_empty() {
        return TurnRead::Blank;
    }
    TurnRead::Input(joined)
}

/// Accumulates one turn's lines from stdin until end-of-input. Each turn
/// starts a fresh read; Ctrl+D only terminates the current accumulation.
fn read_turn() -> Result<TurnRead> {
    print!("\n> ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let read = handle
            .read_line(&mut line)
            .context("Failed to read stdin")?;
        if read == 0 {
            break;
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        lines.push(line);
    }
    Ok(classify_turn(lines))
}

/// Interactive read-dispatch-print cycle. Each turn is independent: only the
/// startup-time context reaches the backend, never prior turns.
pub async fn run_interactive(
    backend: &dyn Backend,
    compose: &dyn Fn(&str) -> String,
) -> Result<()> {
    loop {
        let raw = match read_turn()? {
            TurnRead::Input(raw) => raw,
            TurnRead::Blank => continue,
            TurnRead::StreamEnd => break,
        };

        let prompt = compose(&raw);
        match backend.dispatch(&prompt).await? {
            TurnOutput::Text(text) => println!("\n{text}\n"),
            TurnOutput::Streamed => {}
        }
    }
    Ok(())
}

/// SIGINT ends the session with a farewell, matching the interactive
/// contract: interrupt is the one deliberate way out.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        println!("\n\nGoodbye!");
        std::process::exit(0);
    })
    .context("Failed to install interrupt handler")
}
