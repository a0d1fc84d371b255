use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use regex::Regex;
use search_core::lemmatizer::lemmas;
use search_core::persist::save_index;
use search_core::{DocId, InvertedIndex, Lemmatizer, NormalizerKind};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

lazy_static! {
    static ref LEMMA_FILE_RE: Regex = Regex::new(r"^lemmas_(\d+)\.txt$").expect("valid regex");
}

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    body: String,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the lemma -> document inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build from a directory of per-page `lemmas_<N>.txt` files
    FromLemmas {
        /// Directory holding the lemma files
        #[arg(long)]
        input: PathBuf,
        /// Output index file
        #[arg(long, default_value = "inverted_index.json")]
        output: PathBuf,
    },
    /// Build from JSON/JSONL documents, lemmatizing their bodies
    FromDocs {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Output index file
        #[arg(long, default_value = "inverted_index.json")]
        output: PathBuf,
        /// Must match the normalizer the search session runs with
        #[arg(long, default_value = "russian")]
        normalizer: NormalizerKind,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let (index, output) = match cli.command {
        Commands::FromLemmas { input, output } => (build_from_lemmas(&input)?, output),
        Commands::FromDocs { input, output, normalizer } => (build_from_docs(&input, &normalizer.build())?, output),
    };
    save_index(&output, &index)?;
    tracing::info!(output = %output.display(), lemmas = index.num_lemmas(), "index build complete");
    Ok(())
}

/// Page number encoded in a `lemmas_<N>.txt` file name.
fn page_number(file_name: &str) -> Option<DocId> {
    LEMMA_FILE_RE.captures(file_name)?.get(1)?.as_str().parse().ok()
}

/// Lemma of a `<lemma>: <token> <token> ...` line.
fn parse_lemma_line(line: &str) -> Option<&str> {
    let (lemma, _tokens) = line.split_once(':')?;
    let lemma = lemma.trim();
    (!lemma.is_empty()).then_some(lemma)
}

fn build_from_lemmas(dir: &Path) -> Result<InvertedIndex> {
    let mut pages: Vec<(DocId, PathBuf)> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.file_name().to_str().and_then(page_number) {
            Some(page) => pages.push((page, entry.path().to_path_buf())),
            None => tracing::debug!(path = %entry.path().display(), "skipping non-lemma file"),
        }
    }
    pages.sort();

    let mut index = InvertedIndex::new();
    for (page, path) in &pages {
        index_lemma_file(path, *page, &mut index)?;
    }
    tracing::info!(pages = pages.len(), lemmas = index.num_lemmas(), "ingested lemma files");
    Ok(index)
}

fn index_lemma_file(path: &Path, page: DocId, index: &mut InvertedIndex) -> Result<()> {
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(f);
    for line in reader.lines() {
        let line = line?;
        if let Some(lemma) = parse_lemma_line(&line) {
            index.add(lemma, page);
        }
    }
    Ok(())
}

fn build_from_docs<L: Lemmatizer + ?Sized>(input: &Path, lemmatizer: &L) -> Result<InvertedIndex> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input {} does not exist", input.display());
    }

    let mut index = InvertedIndex::new();
    let mut num_docs = 0usize;
    for file in files {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        for doc in docs {
            ingest_doc(doc, lemmatizer, &mut index);
            num_docs += 1;
        }
    }
    tracing::info!(num_docs, lemmas = index.num_lemmas(), "ingested documents");
    Ok(index)
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line).with_context(|| format!("parsing {}", file.display()))?;
        docs.push(doc);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs = match json {
        serde_json::Value::Array(arr) => {
            arr.into_iter().map(serde_json::from_value).collect::<Result<Vec<InputDoc>, _>>()?
        }
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => {
            tracing::warn!(file = %file.display(), "ignoring JSON that is neither an object nor an array");
            Vec::new()
        }
    };
    Ok(docs)
}

/// Each lemma of the body is recorded once for the document.
fn ingest_doc<L: Lemmatizer + ?Sized>(doc: InputDoc, lemmatizer: &L, index: &mut InvertedIndex) {
    let mut seen_in_doc: HashSet<String> = HashSet::new();
    for lemma in lemmas(&doc.body, lemmatizer) {
        if seen_in_doc.insert(lemma.clone()) {
            index.add(&lemma, doc.id);
        }
    }
}
