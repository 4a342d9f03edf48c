//! Catalog backend trait and implementations for the external lookups.

pub mod arxiv;
pub mod crossref;

#[cfg(test)]
pub mod mock;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use crate::matching::similarity;

/// A catalog record reduced to what scoring and reporting need.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub title: String,
    /// Landing page for the record (DOI link, arXiv abstract page).
    pub url: Option<String>,
}

/// Best candidate for a query plus its similarity score.
///
/// Invariant: `score` is 0.0 whenever `record` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub record: Option<CandidateRecord>,
    pub score: f64,
}

impl MatchResult {
    /// No candidate found.
    pub fn none() -> Self {
        Self {
            record: None,
            score: 0.0,
        }
    }

    /// Score each candidate against `query` and keep the strict-greater best,
    /// first seen winning ties.
    pub fn best_of(query: &str, candidates: impl IntoIterator<Item = CandidateRecord>) -> Self {
        let mut best = Self::none();
        for candidate in candidates {
            let score = similarity(query, &candidate.title);
            if score > best.score {
                best = Self {
                    record: Some(candidate),
                    score,
                };
            }
        }
        best
    }
}

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Parse(String),
}

/// A catalog that can be searched for a record by title.
pub trait CatalogBackend: Send + Sync {
    /// The canonical name of this catalog (e.g., "Crossref", "arXiv").
    /// Used verbatim as the verdict source.
    fn name(&self) -> &str;

    /// Query the catalog for the record best matching the given title.
    fn query<'a>(
        &'a self,
        title: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<MatchResult, QueryError>> + Send + 'a>>;
}
