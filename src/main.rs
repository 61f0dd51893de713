use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use spooky_quiz::{Category, Config, OfflineSource, Quiz, QuestionCount};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Category to preselect, by name or short name (e.g. "monsters")
    #[arg(short, long, default_value_t = Category::default())]
    category: Category,

    /// Number of questions (5-20)
    #[arg(short = 'n', long, default_value = "10", value_parser = parse_count)]
    count: QuestionCount,

    /// Never contact the question service; use the offline bank
    #[arg(long)]
    offline: bool,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_count(raw: &str) -> Result<QuestionCount, String> {
    let count: usize = raw.parse().map_err(|err| format!("{err}"))?;
    QuestionCount::new(count).map_err(|err| err.to_string())
}

/// Log to `path` when given. The terminal belongs to the UI, so without a
/// file nothing is logged.
fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn build_quiz(offline: bool) -> Quiz {
    if offline {
        return Quiz::offline();
    }

    let config = Config::from_env();
    if !config.has_credentials() {
        warn!("no API key configured; games will use offline questions");
    }

    Quiz::from_config(config).unwrap_or_else(|err| {
        warn!(error = %err, "question service unavailable");
        Quiz::new(Arc::new(OfflineSource::new(err.to_string())))
    })
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenv::dotenv();
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    let quiz = build_quiz(args.offline).with_settings(args.category, args.count);

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
