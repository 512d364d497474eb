//! The indexer procedure: walk a page directory and build an in-memory
//! `Index`, ready for `Index::save`.

use crate::index::Index;
use crate::page::{self, PageRecord};
use crate::webpage::scan_words;
use crate::Result;
use std::path::Path;
use tracing::debug;

/// Accepts a candidate token iff it is non-empty, at least 3 characters,
/// and entirely alphabetic — then lowercases it. This is the indexer's own
/// gate; the `webpage` facility hands back raw, unfiltered candidates.
pub fn normalize_word(candidate: &str) -> Option<String> {
    if candidate.len() >= 3 && candidate.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(candidate.to_lowercase())
    } else {
        None
    }
}

/// Builds an inverted index from every page in `page_dir`, in ascending
/// `DocId` order.
pub fn build_index(page_dir: &Path) -> Result<Index> {
    let doc_ids = page::list_doc_ids(page_dir)?;
    let mut index = Index::new();

    for doc_id in doc_ids {
        let record = PageRecord::load(page_dir, doc_id)?;
        let html = record.html_str();

        let mut accepted = 0u32;
        for candidate in scan_words(&html) {
            if let Some(word) = normalize_word(candidate) {
                index.record(&word, doc_id);
                accepted += 1;
            }
        }
        debug!(doc_id, accepted, "indexed page");
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn normalize_word_enforces_length_and_alphabetic_gate() {
        assert_eq!(normalize_word("Dartmouth"), Some("dartmouth".to_string()));
        assert_eq!(normalize_word("a"), None);
        assert_eq!(normalize_word("or"), None);
        assert_eq!(normalize_word("co2"), None);
        assert_eq!(normalize_word(""), None);
    }

    #[test]
    fn build_index_matches_worked_scenario() {
        let dir = tempdir().unwrap();
        let page1 = PageRecord {
            url: "https://example.com/1".to_string(),
            depth: 0,
            html: b"dartmouth dartmouth dartmouth computer".to_vec(),
        };
        let page2 = PageRecord {
            url: "https://example.com/2".to_string(),
            depth: 1,
            html: b"computer computer science science science science science".to_vec(),
        };
        page1.save(dir.path(), 1).unwrap();
        page2.save(dir.path(), 2).unwrap();

        let index = build_index(dir.path()).unwrap();

        let dartmouth = index.get("dartmouth").unwrap();
        assert_eq!(dartmouth.postings.len(), 1);
        assert_eq!(dartmouth.postings[0].count, 3);

        let computer = index.get("computer").unwrap();
        assert_eq!(computer.postings.len(), 2);
        assert_eq!(computer.postings[0].count, 1);
        assert_eq!(computer.postings[1].count, 2);

        let science = index.get("science").unwrap();
        assert_eq!(science.postings[0].count, 5);
    }

    #[test]
    fn reindexing_is_deterministic() {
        let dir = tempdir().unwrap();
        PageRecord {
            url: "https://example.com/1".to_string(),
            depth: 0,
            html: b"alpha beta alpha gamma".to_vec(),
        }
        .save(dir.path(), 1)
        .unwrap();

        let first = build_index(dir.path()).unwrap();
        let second = build_index(dir.path()).unwrap();

        for word in first.words() {
            assert_eq!(first.get(word), second.get(word));
        }
    }
}
