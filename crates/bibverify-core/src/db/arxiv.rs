use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::{CandidateRecord, CatalogBackend, MatchResult, QueryError};

/// arXiv export API (`export.arxiv.org`), Atom feed.
pub struct Arxiv;

impl CatalogBackend for Arxiv {
    fn name(&self) -> &str {
        "arXiv"
    }

    fn query<'a>(
        &'a self,
        title: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<MatchResult, QueryError>> + Send + 'a>> {
        Box::pin(async move {
            // Exact-phrase search restricted to the title field; the quotes
            // are part of the query syntax and get URL-encoded with the rest.
            let search = format!("ti:\"{}\"", title);
            let url = format!(
                "http://export.arxiv.org/api/query?search_query={}&max_results=5",
                urlencoding::encode(&search)
            );

            let resp = client.get(&url).timeout(timeout).send().await?;

            let status = resp.status();
            if !status.is_success() {
                return Err(QueryError::Status(status));
            }

            let body = resp.text().await?;
            let candidates = parse_feed(&body)?;
            Ok(MatchResult::best_of(title, candidates))
        })
    }
}

/// Pull every entry's title and abstract link out of an arXiv Atom feed.
fn parse_feed(xml: &str) -> Result<Vec<CandidateRecord>, QueryError> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);

    let mut entries = Vec::new();
    let mut in_entry = false;
    let mut in_title = false;
    let mut current_title = String::new();
    let mut current_link = String::new();

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local = e.local_name();
                match local.as_ref() {
                    b"entry" => {
                        in_entry = true;
                        current_title.clear();
                        current_link.clear();
                    }
                    b"title" if in_entry => {
                        in_title = true;
                        current_title.clear();
                    }
                    b"link" if in_entry => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"href" && current_link.is_empty() {
                                current_link = String::from_utf8_lossy(&attr.value).to_string();
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"link" && in_entry {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"href" && current_link.is_empty() {
                            current_link = String::from_utf8_lossy(&attr.value).to_string();
                        }
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_title {
                    current_title.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"entry" => {
                    entries.push(CandidateRecord {
                        title: current_title.trim().to_string(),
                        url: if current_link.is_empty() {
                            None
                        } else {
                            Some(current_link.clone())
                        },
                    });
                    in_entry = false;
                }
                b"title" => in_title = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(QueryError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}
