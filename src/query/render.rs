//! Ranking and rendering: sort by score, load each page's stored HTML and
//! pull title/snippet via substring search — not a DOM parse, so callers get
//! the first literal `<title>`/`<meta name="description">` marker rather
//! than a normalised extraction.

use super::eval::Hit;
use crate::page::PageRecord;
use crate::Result;
use std::path::Path;

const SNIPPET_MAX_BYTES: usize = 128;

/// A single ranked, metadata-enriched query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDoc {
    pub doc_id: u32,
    pub score: u32,
    pub url: Option<String>,
    pub title: Option<String>,
    pub snippet: Option<String>,
}

/// Sorts hits by descending score (ties broken by ascending `doc_id` for
/// determinism), loads each page's metadata, and renders the listing.
pub fn rank_and_render(hits: Vec<Hit>, page_dir: &Path) -> Result<String> {
    let mut hits = hits;
    hits.sort_by(|a, b| b.score.cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));

    let mut rendered = String::new();
    for hit in hits {
        let doc = load_metadata(hit, page_dir);
        rendered.push_str(&format!("title: {}\n", doc.title.as_deref().unwrap_or("")));
        rendered.push_str(&format!(
            "rank:{} doc:{} : {}\n",
            doc.score,
            doc.doc_id,
            doc.url.as_deref().unwrap_or("")
        ));
        rendered.push_str(&format!("{}...\n\n", doc.snippet.as_deref().unwrap_or("")));
    }

    Ok(rendered)
}

fn load_metadata(hit: Hit, page_dir: &Path) -> RankedDoc {
    match PageRecord::load(page_dir, hit.doc_id) {
        Ok(record) => {
            let html = record.html_str();
            RankedDoc {
                doc_id: hit.doc_id,
                score: hit.score,
                url: Some(record.url.clone()),
                title: extract_title(&html),
                snippet: extract_snippet(&html),
            }
        }
        // A missing PageRecord is not an error: render with empty fields.
        Err(_) => RankedDoc {
            doc_id: hit.doc_id,
            score: hit.score,
            url: None,
            title: None,
            snippet: None,
        },
    }
}

fn extract_title(html: &str) -> Option<String> {
    let open = "<title>";
    let close = "</title>";
    let start = html.find(open)? + open.len();
    let end = html[start..].find(close)?;
    Some(html[start..start + end].to_string())
}

fn extract_snippet(html: &str) -> Option<String> {
    let marker = "<meta name=\"description\"";
    let marker_at = html.find(marker)?;
    let tail = &html[marker_at..];

    let content_marker = "content=\"";
    let content_at = tail.find(content_marker)? + content_marker.len();
    let after_content = &tail[content_at..];
    let end = after_content.find('"')?;
    let value = &after_content[..end];

    let truncated = truncate_to_byte_limit(value, SNIPPET_MAX_BYTES);
    Some(truncated)
}

fn truncate_to_byte_limit(s: &str, limit: usize) -> String {
    if s.len() <= limit {
        s.to_string()
    } else {
        String::from_utf8_lossy(&s.as_bytes()[..limit]).into_owned()
    }
}
