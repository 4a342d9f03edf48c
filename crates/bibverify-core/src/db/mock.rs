//! Mock catalog backend for testing the verification policy.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{CandidateRecord, CatalogBackend, MatchResult, QueryError};

/// A configurable response for [`MockCatalog`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Simulate a candidate scoring `score` against any query.
    Match { title: &'static str, score: f64 },
    /// Simulate "no candidates in this catalog".
    Miss,
    /// Simulate a transport/parse failure.
    Error(&'static str),
}

/// A hand-rolled mock implementing [`CatalogBackend`], with call counting.
pub struct MockCatalog {
    name: &'static str,
    response: MockResponse,
    call_count: AtomicUsize,
}

impl MockCatalog {
    pub fn new(name: &'static str, response: MockResponse) -> Self {
        Self {
            name,
            response,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `query()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl CatalogBackend for MockCatalog {
    fn name(&self) -> &str {
        self.name
    }

    fn query<'a>(
        &'a self,
        _title: &'a str,
        _client: &'a reqwest::Client,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<MatchResult, QueryError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let response = self.response.clone();

        Box::pin(async move {
            match response {
                MockResponse::Match { title, score } => Ok(MatchResult {
                    record: Some(CandidateRecord {
                        title: title.to_string(),
                        url: None,
                    }),
                    score,
                }),
                MockResponse::Miss => Ok(MatchResult::none()),
                MockResponse::Error(msg) => Err(QueryError::Parse(msg.to_string())),
            }
        })
    }
}
