use crate::{DocId, InvertedIndex};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::Path;

/// Writes the index as a flat JSON object `{ lemma: [ids] }`, keys sorted.
pub fn save_index(path: &Path, index: &InvertedIndex) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    let sorted: BTreeMap<&str, &[DocId]> = index.iter().collect();
    let json = serde_json::to_string_pretty(&sorted)?;
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_index(path: &Path) -> Result<InvertedIndex> {
    let mut f = File::open(path).with_context(|| format!("opening index {}", path.display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let index: InvertedIndex = serde_json::from_str(&buf)
        .with_context(|| format!("parsing index {}", path.display()))?;
    tracing::info!(path = %path.display(), lemmas = index.num_lemmas(), "index loaded");
    Ok(index)
}
