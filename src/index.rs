//! `Index`, `IndexEntry` and `Posting`, plus the on-disk index file format:
//! one line per word, postings in first-seen order, line order unspecified.

use crate::{CoreError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// `(doc_id, count)` pair within an `IndexEntry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: u32,
    pub count: u32,
}

/// A word and the postings recording which documents contain it.
///
/// `postings` is kept in the order each `doc_id` was first seen during
/// indexing; that is also the order it is serialised in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    pub word: String,
    pub postings: Vec<Posting>,
}

/// A mapping from word to `IndexEntry`. No two entries share a word.
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: HashMap<String, IndexEntry>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&IndexEntry> {
        self.entries.get(word)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Records one qualifying occurrence of `word` in `doc_id`, creating the
    /// entry or posting as needed and incrementing an existing posting's
    /// count otherwise.
    pub fn record(&mut self, word: &str, doc_id: u32) {
        let entry = self.entries.entry(word.to_string()).or_insert_with(|| IndexEntry {
            word: word.to_string(),
            postings: Vec::new(),
        });

        match entry.postings.iter_mut().find(|p| p.doc_id == doc_id) {
            Some(posting) => posting.count += 1,
            None => entry.postings.push(Posting { doc_id, count: 1 }),
        }
    }

    /// Serialises the index, one `IndexEntry` per line.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = fs::File::create(path)?;
        for entry in self.entries.values() {
            write!(file, "{}", entry.word)?;
            for posting in &entry.postings {
                write!(file, " {} {}", posting.doc_id, posting.count)?;
            }
            writeln!(file)?;
        }
        Ok(())
    }

    /// Parses a previously serialised index file.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(fs::File::open(path)?);
        let mut index = Index::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split(' ');
            let word = fields
                .next()
                .ok_or_else(|| CoreError::CorruptIndexLine { line: line.clone() })?;

            let mut entry = IndexEntry {
                word: word.to_string(),
                postings: Vec::new(),
            };

            loop {
                let doc_id = match fields.next() {
                    Some(tok) => tok,
                    None => break,
                };
                let count = fields
                    .next()
                    .ok_or_else(|| CoreError::CorruptIndexLine { line: line.clone() })?;

                let doc_id: u32 = doc_id
                    .parse()
                    .map_err(|_| CoreError::CorruptIndexLine { line: line.clone() })?;
                let count: u32 = count
                    .parse()
                    .map_err(|_| CoreError::CorruptIndexLine { line: line.clone() })?;

                entry.postings.push(Posting { doc_id, count });
            }

            index.entries.insert(entry.word.clone(), entry);
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn record_tracks_first_seen_order_and_counts() {
        let mut index = Index::new();
        index.record("dartmouth", 1);
        index.record("dartmouth", 1);
        index.record("dartmouth", 1);
        index.record("computer", 1);
        index.record("computer", 2);
        index.record("computer", 2);

        let dartmouth = index.get("dartmouth").unwrap();
        assert_eq!(dartmouth.postings, vec![Posting { doc_id: 1, count: 3 }]);

        let computer = index.get("computer").unwrap();
        assert_eq!(
            computer.postings,
            vec![
                Posting { doc_id: 1, count: 1 },
                Posting { doc_id: 2, count: 2 },
            ]
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut index = Index::new();
        index.record("science", 2);
        index.record("science", 2);
        index.record("computer", 1);

        let dir = tempdir().unwrap();
        let path = dir.path().join("index.out");
        index.save(&path).unwrap();

        let loaded = Index::load(&path).unwrap();
        assert_eq!(loaded.len(), index.len());
        assert_eq!(loaded.get("science"), index.get("science"));
        assert_eq!(loaded.get("computer"), index.get("computer"));
    }

    #[test]
    fn load_rejects_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.out");
        fs::write(&path, "computer 1\n").unwrap();

        assert!(Index::load(&path).is_err());
    }
}
