pub mod db;
pub mod matching;
pub mod verifier;

// Re-export for convenience
pub use db::{CandidateRecord, CatalogBackend, MatchResult, QueryError};
pub use matching::{normalize, similarity};
pub use verifier::{verify_entries, verify_entry};

/// Minimum similarity score for an entry to be marked OK.
pub const DEFAULT_THRESHOLD: f64 = 0.80;

/// Per-request timeout for catalog lookups, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A bibliography entry to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    /// Citation key, unique within the source file.
    pub key: String,
    /// Title as written in the source file (may contain TeX markup).
    /// Empty when the entry has no title field.
    pub title: String,
}

/// The verification status of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A catalog match scored at or above the threshold.
    Ok,
    /// No catalog produced a good enough match; needs manual review.
    Check,
}

/// The result of verifying a single entry.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub key: String,
    pub status: Status,
    /// Catalog that produced the accepted match; `None` on [`Status::Check`].
    pub source: Option<String>,
    /// Similarity score of the accepted match, or of the last lookup tried.
    pub score: f64,
    /// Brace-stripped title used for querying and display.
    pub title: String,
}
