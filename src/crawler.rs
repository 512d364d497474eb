//! The breadth-first crawler: a fixed pool of OS threads sharing a single
//! mutex over the frontier, the visited set, the `DocId` counter and the
//! added/retrieved counters.

use crate::page::PageRecord;
use crate::webpage::{build_http_client, WebPage};
use crate::{CoreError, Result};
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{debug, info, warn};
use url::Url;

/// The reference worker pool size; any small positive count is acceptable.
const WORKER_COUNT: usize = 3;

struct CrawlerState {
    frontier: VecDeque<WebPage>,
    visited: HashSet<String>,
    next_doc_id: u32,
    pages_added: u32,
    pages_retrieved: u32,
    /// Set by any worker that hits a fatal error (failed save); once set,
    /// every worker stops at its next lock acquisition.
    fatal: Option<String>,
}

/// Crawls from `seed_url`, saving each distinct reachable internal page into
/// `page_dir` up to `max_depth`, and returns once the frontier has drained.
///
/// `max_depth` bounds which pages are expanded, not which are saved: the
/// seed is always saved, and a page at `max_depth` is saved but not
/// followed further.
pub fn crawl(seed_url: &str, page_dir: &Path, max_depth: u32) -> Result<()> {
    create_page_dir(page_dir)?;

    let client = build_http_client()?;
    let root = Url::parse(seed_url)?;

    let mut seed_page = WebPage::new(root.clone(), 0);
    seed_page.fetch(&client).map_err(|e| {
        CoreError::Startup(format!("failed to fetch seed URL {seed_url}: {e}"))
    })?;

    let seed_record = PageRecord::from_webpage(&seed_page);
    seed_record
        .save(page_dir, 1)
        .map_err(|e| CoreError::Startup(format!("failed to save seed page: {e}")))?;

    info!(seed_url, max_depth, "seed page saved as doc 1");

    let mut visited = HashSet::new();
    visited.insert(root.to_string());

    let state = CrawlerState {
        frontier: VecDeque::from([seed_page]),
        visited,
        next_doc_id: 2,
        pages_added: 1,
        pages_retrieved: 0,
        fatal: None,
    };

    let state = Arc::new(Mutex::new(state));
    let client = Arc::new(client);
    let root = Arc::new(root);

    let handles: Vec<_> = (0..WORKER_COUNT)
        .map(|id| {
            let state = Arc::clone(&state);
            let client = Arc::clone(&client);
            let root = Arc::clone(&root);
            let page_dir = page_dir.to_path_buf();
            thread::spawn(move || worker_loop(id, state, client, root, page_dir, max_depth))
        })
        .collect();

    for handle in handles {
        // A worker thread only panics on a poisoned mutex, which we treat as
        // unrecoverable; propagate it rather than silently losing the crawl.
        handle
            .join()
            .map_err(|_| CoreError::Startup("crawler worker thread panicked".to_string()))?;
    }

    let guard = state.lock().expect("crawler mutex poisoned");
    if let Some(reason) = &guard.fatal {
        return Err(CoreError::Startup(reason.clone()));
    }

    info!(pages_added = guard.pages_added, "crawl complete");
    Ok(())
}

fn worker_loop(
    worker_id: usize,
    state: Arc<Mutex<CrawlerState>>,
    client: Arc<reqwest::blocking::Client>,
    root: Arc<Url>,
    page_dir: std::path::PathBuf,
    max_depth: u32,
) {
    loop {
        let mut guard = state.lock().expect("crawler mutex poisoned");

        if guard.fatal.is_some() {
            return;
        }

        let page = match guard.frontier.pop_front() {
            Some(page) => page,
            None => {
                if guard.pages_retrieved >= guard.pages_added {
                    // Frontier empty and every added page has been
                    // retrieved: nothing left for any worker to do.
                    return;
                }
                drop(guard);
                thread::yield_now();
                continue;
            }
        };

        guard.pages_retrieved += 1;

        if page.depth() < max_depth {
            process_page(worker_id, &mut guard, &client, &root, &page_dir, &page);
        }
        // Lock released here at end of scope; re-acquired at the top of the
        // loop for the next iteration.
    }
}

/// Expands one dequeued page's outbound links. Runs entirely under the
/// caller's lock: this serialises the workers, but keeps the save-and-enqueue
/// of a child page atomic with respect to the visited set.
fn process_page(
    worker_id: usize,
    guard: &mut CrawlerState,
    client: &reqwest::blocking::Client,
    root: &Url,
    page_dir: &Path,
    page: &WebPage,
) {
    for url in page.outbound_urls() {
        if !WebPage::is_internal(&url, root) {
            continue;
        }

        let key = url.to_string();
        if guard.visited.contains(&key) {
            continue;
        }

        let mut child = WebPage::new(url, page.depth() + 1);
        match child.fetch(client) {
            Ok(()) => {
                let doc_id = guard.next_doc_id;
                let record = PageRecord::from_webpage(&child);
                match record.save(page_dir, doc_id) {
                    Ok(()) => {
                        guard.next_doc_id += 1;
                        guard.pages_added += 1;
                        guard.visited.insert(key);
                        debug!(worker_id, doc_id, url = %child.url(), "saved page");
                        guard.frontier.push_back(child);
                    }
                    Err(e) => {
                        guard.fatal = Some(format!("failed to save doc {doc_id}: {e}"));
                        return;
                    }
                }
            }
            Err(e) => {
                warn!(worker_id, url = %key, error = %e, "fetch failed, discarding URL");
            }
        }
    }
}

fn create_page_dir(page_dir: &Path) -> Result<()> {
    fs::create_dir_all(page_dir)
        .map_err(|e| CoreError::Startup(format!("failed to create page directory: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(page_dir)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(page_dir, perms)?;
    }

    Ok(())
}
