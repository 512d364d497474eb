//! `PageRecord` and the page-directory file format: one file per `DocId`,
//! three newline-separated header fields followed by a raw,
//! non-newline-terminated HTML payload.

use crate::webpage::WebPage;
use crate::{CoreError, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// A single crawled page, as persisted by the crawler and read back by the
/// indexer and query engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    pub depth: u32,
    pub html: Vec<u8>,
}

impl PageRecord {
    pub fn html_length(&self) -> usize {
        self.html.len()
    }

    pub fn html_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.html)
    }

    pub fn from_webpage(page: &WebPage) -> Self {
        Self {
            url: page.url().to_string(),
            depth: page.depth(),
            html: page.html().as_bytes().to_vec(),
        }
    }

    /// Writes this record to `<page_dir>/<doc_id>`.
    pub fn save(&self, page_dir: &Path, doc_id: u32) -> Result<()> {
        let path = page_dir.join(doc_id.to_string());
        let mut file = fs::File::create(path)?;
        write!(file, "{}\n{}\n{}\n", self.url, self.depth, self.html.len())?;
        file.write_all(&self.html)?;
        Ok(())
    }

    /// Reads `<page_dir>/<doc_id>` back into a `PageRecord`.
    pub fn load(page_dir: &Path, doc_id: u32) -> Result<Self> {
        let path = page_dir.join(doc_id.to_string());
        let mut raw = Vec::new();
        fs::File::open(&path)?.read_to_end(&mut raw)?;

        let corrupt = |reason: &str| CoreError::InvalidPageRecord {
            doc_id,
            reason: reason.to_string(),
        };

        let first_nl = find(&raw, 0).ok_or_else(|| corrupt("missing url field"))?;
        let url = String::from_utf8(raw[..first_nl].to_vec())
            .map_err(|_| corrupt("url field is not valid UTF-8"))?;

        let second_nl = find(&raw, first_nl + 1).ok_or_else(|| corrupt("missing depth field"))?;
        let depth_str = std::str::from_utf8(&raw[first_nl + 1..second_nl])
            .map_err(|_| corrupt("depth field is not valid UTF-8"))?;
        let depth: u32 = depth_str
            .parse()
            .map_err(|_| corrupt("depth field is not an integer"))?;

        let third_nl =
            find(&raw, second_nl + 1).ok_or_else(|| corrupt("missing html_length field"))?;
        let len_str = std::str::from_utf8(&raw[second_nl + 1..third_nl])
            .map_err(|_| corrupt("html_length field is not valid UTF-8"))?;
        let html_length: usize = len_str
            .parse()
            .map_err(|_| corrupt("html_length field is not an integer"))?;

        let body_start = third_nl + 1;
        let body = &raw[body_start..];
        if body.len() != html_length {
            return Err(corrupt("html_length does not match stored payload size"));
        }

        Ok(Self {
            url,
            depth,
            html: body.to_vec(),
        })
    }
}

/// Lists every `DocId` present in `page_dir` (entries not starting with
/// `.`), sorted ascending.
pub fn list_doc_ids(page_dir: &Path) -> Result<Vec<u32>> {
    let mut ids = Vec::new();
    for entry in fs::read_dir(page_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') {
            continue;
        }
        let doc_id: u32 = name.parse().map_err(|_| {
            CoreError::Startup(format!("page directory entry {:?} is not a DocId", name))
        })?;
        ids.push(doc_id);
    }
    ids.sort_unstable();
    Ok(ids)
}

fn find(haystack: &[u8], from: usize) -> Option<usize> {
    haystack[from..].iter().position(|&b| b == b'\n').map(|p| from + p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips_exactly() {
        let dir = tempdir().unwrap();
        let record = PageRecord {
            url: "https://example.com/".to_string(),
            depth: 2,
            html: b"<html><body>hi</body></html>".to_vec(),
        };

        record.save(dir.path(), 7).unwrap();
        let loaded = PageRecord::load(dir.path(), 7).unwrap();

        assert_eq!(record, loaded);
    }

    #[test]
    fn list_doc_ids_skips_dotfiles_and_sorts() {
        let dir = tempdir().unwrap();
        for id in [3u32, 1, 2] {
            PageRecord {
                url: "https://example.com/".to_string(),
                depth: 0,
                html: Vec::new(),
            }
            .save(dir.path(), id)
            .unwrap();
        }
        fs::write(dir.path().join(".lock"), b"").unwrap();

        let ids = list_doc_ids(dir.path()).unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
