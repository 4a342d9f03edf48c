//! Loading of BibTeX (.bib) files into [`BibEntry`] values.
//!
//! Uses the `biblatex` crate, with a per-entry fallback parse: real .bib
//! files often have minor syntax errors (extra braces, non-standard entry
//! types, raw text separators) that make the whole-file parse fail, and
//! splitting on `@` recovers whatever can still be parsed.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use bibverify_core::BibEntry;

#[derive(Error, Debug)]
pub enum BibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load all entries from a .bib file, in file order.
///
/// A file that parses to zero entries yields an empty vec, not an error;
/// the caller renders an empty report for it.
pub fn load_bib(path: &Path) -> Result<Vec<BibEntry>, BibError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_bib_str(&content))
}

/// Parse .bib content from a string (useful for testing).
pub fn parse_bib_str(content: &str) -> Vec<BibEntry> {
    match biblatex::Bibliography::parse(content) {
        Ok(bibliography) => collect_entries(bibliography.iter()),
        Err(_) => parse_entries_individually(content),
    }
}

/// Split .bib content into individual entry strings and parse each one.
fn parse_entries_individually(content: &str) -> Vec<BibEntry> {
    static ENTRY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^@[a-zA-Z]").unwrap());

    let positions: Vec<usize> = ENTRY_RE.find_iter(content).map(|m| m.start()).collect();

    let mut entries = Vec::new();
    for i in 0..positions.len() {
        let start = positions[i];
        let end = if i + 1 < positions.len() {
            positions[i + 1]
        } else {
            content.len()
        };
        if let Ok(bib) = biblatex::Bibliography::parse(&content[start..end]) {
            entries.extend(collect_entries(bib.iter()));
        }
    }

    entries
}

fn collect_entries<'a>(parsed: impl Iterator<Item = &'a biblatex::Entry>) -> Vec<BibEntry> {
    parsed
        .map(|entry| BibEntry {
            key: entry.key.clone(),
            // An entry without a title field gets the empty string; it will
            // score near zero downstream and come back as CHECK, not an error.
            title: entry.title().map(chunks_to_string).unwrap_or_default(),
        })
        .collect()
}

/// Convert biblatex chunks to a plain string.
fn chunks_to_string(chunks: &[biblatex::Spanned<biblatex::Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            biblatex::Chunk::Normal(s) => s.as_str(),
            biblatex::Chunk::Verbatim(s) => s.as_str(),
            biblatex::Chunk::Math(s) => s.as_str(),
        })
        .collect::<Vec<_>>()
        .join("")
}
