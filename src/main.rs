//! Headless harness.
//!
//! Reads newline-delimited JSON from stdin and drives one page context over a
//! recording surface. Each line is one of:
//!
//! ```text
//! {"action":"toggleDyslexiaRuler","enabled":true,"color":"#ffeb3b"}
//! {"signal":"pointerMove","y":500}
//! {"signal":"scroll"}
//! {"advanceMs":10}
//! ```
//!
//! Acks and status events are written to stdout as JSON lines; logs go to
//! stderr. At end of input the remaining timers run out and a summary of the
//! surface is printed.
//!
//! Usage: `lumbus-ruler [--config <file>] [--prefs <file>]`

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use lumbus_ruler::storage::{JsonFilePreferences, MemoryPreferences, PreferenceStore};
use lumbus_ruler::{logging, Command, ReadingRuler, RecordingSurface, RulerConfig, Signal};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Input {
    Command(Command),
    Signal(Signal),
    Advance {
        #[serde(rename = "advanceMs")]
        advance_ms: u64,
    },
}

/// Drive a reading ruler over a recording surface from stdin.
#[derive(Debug, Parser)]
#[command(name = "lumbus-ruler", version, about)]
struct Args {
    /// Ruler configuration (JSON). Defaults apply when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preference store (JSON). Kept in memory when absent.
    #[arg(long)]
    prefs: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RulerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => RulerConfig::default(),
    };
    logging::init(config.debug);

    match &args.prefs {
        Some(path) => {
            let prefs = JsonFilePreferences::open(path)
                .with_context(|| format!("opening preferences at {}", path.display()))?;
            run(prefs, config)
        }
        None => run(MemoryPreferences::new(), config),
    }
}

fn run<P: PreferenceStore>(prefs: P, config: RulerConfig) -> anyhow::Result<()> {
    let mut ruler = ReadingRuler::new(RecordingSurface::new(), prefs, config);
    ruler.init();
    info!("harness ready");

    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Input>(line) {
            Ok(Input::Command(command)) => {
                let ack = ruler.dispatch(command);
                writeln!(out, "{}", json!({ "ack": ack }))?;
            }
            Ok(Input::Signal(signal)) => {
                // a real page only delivers signals somebody listens for
                if ruler.surface().listeners_for(signal.kind()).is_empty() {
                    debug!(?signal, "no listener, dropped");
                } else {
                    ruler.handle_signal(signal);
                }
            }
            Ok(Input::Advance { advance_ms }) => {
                ruler.advance_by(std::time::Duration::from_millis(advance_ms));
            }
            Err(e) => {
                warn!(error = %e, "unreadable input line");
                writeln!(out, "{}", json!({ "error": e.to_string() }))?;
            }
        }

        for event in ruler.drain_status() {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        }
    }

    while let Some(deadline) = ruler.next_deadline() {
        ruler.advance_to(deadline);
    }

    let surface = ruler.surface();
    let summary = json!({
        "summary": {
            "nowMs": ruler.now().as_millis() as u64,
            "rulerActive": ruler.overlay().is_active(),
            "bandTop": ruler
                .overlay()
                .band()
                .and_then(|band| surface.style_of(band, "top")),
            "nodes": surface.node_count(),
            "listeners": surface.listener_count(),
            "mutations": surface.log().len(),
        }
    });
    writeln!(out, "{summary}")?;
    out.flush()?;

    ruler.shutdown();
    Ok(())
}
