//! `namaskar`: replay recorded landmark frames through a practice session.
//!
//! Reads JSON-lines frames from a file or stdin (or generates a synthetic
//! practice with `--demo`), tracks Surya Namaskar A progress and prints the
//! final session state.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use namaskar_core::{SequenceDefinition, Timestamp};
use namaskar_session::{
    synthetic_stream, AppConfig, FrameReader, ReplayFrame, SessionRegistry, SessionSnapshot,
};
use namaskar_tracker::TrackerEvent;

#[derive(Parser, Debug)]
#[command(author, version, about = "Surya Namaskar A pose sequence tracker", long_about = None)]
struct Args {
    /// Configuration file (TOML, JSON or YAML); NAMASKAR_* variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-lines landmark frames; stdin when omitted or "-"
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Generate this many synthetic cycles instead of reading input
    #[arg(long, conflicts_with = "input")]
    demo: Option<usize>,

    /// Stop at the first malformed line instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let path = path.to_str().context("config path is not valid UTF-8")?;
            AppConfig::from_file(path).with_context(|| format!("loading config from {}", path))?
        }
        None => AppConfig::from_env().context("loading config from environment")?,
    };
    init_tracing(&config.log_filter)?;

    let registry = SessionRegistry::new(config)?;
    let session = registry.start_session(Timestamp::now()).await?;

    let frames: Box<dyn Iterator<Item = namaskar_core::Result<ReplayFrame>>> = match args.demo {
        Some(cycles) => {
            let frames_per_step = registry.config().tracker.confirmation_threshold as usize;
            let sequence = SequenceDefinition::surya_namaskar_a();
            let stream = synthetic_stream(&sequence, cycles, frames_per_step)?;
            Box::new(stream.into_iter().map(Ok))
        }
        None => Box::new(FrameReader::new(open_input(args.input.as_ref())?)),
    };

    let mut skipped = 0usize;
    for item in frames {
        let replay = match item {
            Ok(replay) => replay,
            Err(e) if args.strict => return Err(e).context("reading frames"),
            Err(e) => {
                tracing::warn!(error = %e, "skipping frame");
                skipped += 1;
                continue;
            }
        };

        let report = registry
            .process_frame(session, &replay.frame, replay.timestamp)
            .await?;
        if let Some(TrackerEvent::StepConfirmed { posture, cursor }) = report.event() {
            tracing::info!(line = replay.line, %posture, cursor, "step confirmed");
        }
    }

    let snapshot = registry.end_session(session).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_summary(&snapshot, skipped);
    }
    Ok(())
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter {:?}", default_filter))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn print_summary(snapshot: &SessionSnapshot, skipped: usize) {
    println!("Started:          {}", snapshot.started_at.to_datetime());
    println!("Frames processed: {}", snapshot.frames_processed);
    if skipped > 0 {
        println!("Frames skipped:   {}", skipped);
    }
    println!("Repetitions:      {}", snapshot.repetitions);
    println!(
        "Next posture:     {} ({}) [{}/{}]",
        snapshot.expected,
        snapshot.expected_names.spanish,
        snapshot.cursor + 1,
        snapshot.sequence_len,
    );
    if let Some(label) = snapshot.current_label {
        println!("Last seen:        {}", label);
    }
}
