use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::{CandidateRecord, CatalogBackend, MatchResult, QueryError};

/// Crossref works search (`api.crossref.org`).
pub struct Crossref {
    /// Contact address for the Crossref polite pool, appended as `mailto`.
    pub mailto: Option<String>,
}

impl CatalogBackend for Crossref {
    fn name(&self) -> &str {
        "Crossref"
    }

    fn query<'a>(
        &'a self,
        title: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<MatchResult, QueryError>> + Send + 'a>> {
        Box::pin(async move {
            let mut url = format!(
                "https://api.crossref.org/works?query.title={}&rows=5",
                urlencoding::encode(title)
            );

            let user_agent = if let Some(ref email) = self.mailto {
                url.push_str(&format!("&mailto={}", urlencoding::encode(email)));
                format!("bibverify/0.1 (mailto:{})", email)
            } else {
                "bibverify/0.1".to_string()
            };

            let resp = client
                .get(&url)
                .header("User-Agent", user_agent)
                .timeout(timeout)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                return Err(QueryError::Status(status));
            }

            let data: serde_json::Value = resp.json().await?;
            Ok(best_from_response(title, &data))
        })
    }
}

/// Score every work in a Crossref response against the query title.
///
/// Crossref titles are multi-part (title + subtitle rows); the parts are
/// joined with a single space before scoring. A work with no title scores
/// as the empty string rather than being skipped.
fn best_from_response(query: &str, data: &serde_json::Value) -> MatchResult {
    let items = data["message"]["items"].as_array().cloned().unwrap_or_default();

    let candidates = items.iter().map(|item| {
        let title = item["title"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        let url = item["DOI"].as_str().map(|d| format!("https://doi.org/{}", d));
        CandidateRecord { title, url }
    });

    MatchResult::best_of(query, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_best_from_response_picks_closest() {
        let data = json!({
            "message": {
                "items": [
                    {"title": ["Something Else Entirely About Birds"], "DOI": "10.1/bird"},
                    {"title": ["Attention Is All You Need"], "DOI": "10.1/attn"},
                ]
            }
        });
        let best = best_from_response("Attention Is All You Need", &data);
        assert_eq!(best.score, 1.0);
        let record = best.record.unwrap();
        assert_eq!(record.title, "Attention Is All You Need");
        assert_eq!(record.url.as_deref(), Some("https://doi.org/10.1/attn"));
    }

    #[test]
    fn test_best_from_response_joins_title_parts() {
        let data = json!({
            "message": {
                "items": [
                    {"title": ["Attention Is All You Need", "A Transformer Retrospective"]}
                ]
            }
        });
        let best = best_from_response(
            "Attention Is All You Need A Transformer Retrospective",
            &data,
        );
        assert_eq!(best.score, 1.0);
    }

    #[test]
    fn test_best_from_response_no_items() {
        let data = json!({"message": {"items": []}});
        assert_eq!(best_from_response("anything", &data), MatchResult::none());
    }

    #[test]
    fn test_best_from_response_missing_message() {
        let data = json!({"status": "error"});
        assert_eq!(best_from_response("anything", &data), MatchResult::none());
    }

    #[test]
    fn test_best_from_response_item_without_title() {
        let data = json!({
            "message": {
                "items": [
                    {"DOI": "10.1/untitled"},
                    {"title": ["Attention Is All You Need"]}
                ]
            }
        });
        let best = best_from_response("Attention Is All You Need", &data);
        assert_eq!(best.record.unwrap().title, "Attention Is All You Need");
    }
}
