use anyhow::Result;
use clap::Parser;
use search::{build_engine, run_session};
use search_core::NormalizerKind;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search", about = "Boolean AND/OR/NOT queries over an inverted index")]
struct Args {
    /// Inverted index file (JSON object of lemma -> document ids)
    #[arg(long, default_value = "inverted_index.json")]
    index: PathBuf,
    /// How query words are normalized; must match how the index was built
    #[arg(long, default_value = "russian")]
    normalizer: NormalizerKind,
}

fn main() -> Result<()> {
    // stdout carries the session transcript, logs go to stderr
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = Args::parse();
    let engine = build_engine(&args.index, args.normalizer.build())?;
    run_session(&engine, std::io::stdin().lock(), std::io::stdout().lock())
}
