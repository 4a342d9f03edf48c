//! The verification policy: primary lookup, fallback, threshold decision.

use std::time::Duration;

use tracing::debug;

use crate::db::{CatalogBackend, MatchResult};
use crate::{BibEntry, Status, Verdict};

/// Title used for querying and display: literal braces removed, TeX commands
/// kept. Full normalization only happens inside the similarity scorer.
pub fn display_title(raw: &str) -> String {
    raw.trim().replace(['{', '}'], "")
}

/// Verify one entry against the catalogs in priority order.
///
/// Each catalog is queried in turn until one scores at or above `threshold`;
/// a lookup failure counts as score 0.0 and falls through like any other
/// below-threshold result. When every catalog falls short the verdict is
/// CHECK, surfacing only the score of the last catalog tried.
pub async fn verify_entry(
    entry: &BibEntry,
    backends: &[&dyn CatalogBackend],
    client: &reqwest::Client,
    timeout: Duration,
    threshold: f64,
) -> Verdict {
    let title = display_title(&entry.title);

    let mut last_score = 0.0;
    for backend in backends {
        let result = match backend.query(&title, client, timeout).await {
            Ok(result) => result,
            Err(err) => {
                debug!(
                    catalog = backend.name(),
                    key = %entry.key,
                    error = %err,
                    "catalog lookup failed"
                );
                MatchResult::none()
            }
        };

        if result.score >= threshold {
            return Verdict {
                key: entry.key.clone(),
                status: Status::Ok,
                source: Some(backend.name().to_string()),
                score: result.score,
                title,
            };
        }
        last_score = result.score;
    }

    Verdict {
        key: entry.key.clone(),
        status: Status::Check,
        source: None,
        score: last_score,
        title,
    }
}

/// Verify entries one at a time, in input order.
pub async fn verify_entries(
    entries: &[BibEntry],
    backends: &[&dyn CatalogBackend],
    client: &reqwest::Client,
    timeout: Duration,
    threshold: f64,
) -> Vec<Verdict> {
    let mut verdicts = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        debug!(key = %entry.key, index = i, total = entries.len(), "verifying entry");
        verdicts.push(verify_entry(entry, backends, client, timeout, threshold).await);
    }
    verdicts
}
