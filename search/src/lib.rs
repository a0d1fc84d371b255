use anyhow::Result;
use search_core::persist::load_index;
use search_core::{Lemmatizer, QueryEngine};
use std::io::{BufRead, Write};
use std::path::Path;

/// Loads the index once; any failure here is fatal for the session.
pub fn build_engine<L: Lemmatizer>(index_path: &Path, lemmatizer: L) -> Result<QueryEngine<L>> {
    let index = load_index(index_path)?;
    tracing::info!(documents = index.universe().len(), "corpus ready");
    Ok(QueryEngine::new(index, lemmatizer))
}

/// Answers one query per input line until `exit` or end of input.
///
/// Rejected queries are reported and the session goes on. A failing input
/// stream ends the session like end of input does.
pub fn run_session<L, R, W>(engine: &QueryEngine<L>, mut input: R, mut output: W) -> Result<()>
where
    L: Lemmatizer,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Enter your query:")?;
    let mut buf = Vec::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%err, "input stream failed, ending session");
                break;
            }
        }
        // a line that is not valid UTF-8 is still a query, just with replacement characters
        let line = String::from_utf8_lossy(&buf);
        let query = line.trim();
        if query == "exit" {
            break;
        }
        match engine.search(query) {
            Ok(hits) => {
                writeln!(output, "Results found: {}", hits.len())?;
                writeln!(output, "{hits:?}")?;
            }
            Err(err) => {
                tracing::debug!(query, %err, "query rejected");
                writeln!(output, "Error: {err}")?;
                writeln!(output, "Results found: 0")?;
            }
        }
    }
    Ok(())
}
