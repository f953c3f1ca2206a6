use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::http_client::USER_AGENT_VALUE;

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "standings_progression";
const CACHE_FILE: &str = "page_cache.json";

// Standings pages for a finished season never change; within this window a
// cached body is served without touching the network at all.
const FRESH_SECS: u64 = 24 * 60 * 60;

static CACHE: Mutex<Option<PageCacheFile>> = Mutex::new(None);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PageCacheFile {
    version: u32,
    pages: HashMap<String, CachedPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedPage {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
}

/// Fetch an HTML page through the on-disk cache.
///
/// A recently fetched body is returned directly; otherwise the request
/// revalidates with ETag/Last-Modified and a 304 refreshes the stored entry
/// instead of re-downloading the page.
pub fn fetch_page_cached(client: &Client, url: &str) -> Result<String> {
    let cached = {
        let mut guard = CACHE.lock().expect("page cache lock poisoned");
        let cache = guard.get_or_insert_with(load_cache_file);
        cache.pages.get(url).cloned()
    };

    if let Some(page) = cached.as_ref() {
        if now_secs().saturating_sub(page.fetched_at) < FRESH_SECS {
            log::debug!("page cache fresh hit: {url}");
            return Ok(page.body.clone());
        }
    }

    let mut req = client.get(url).header(USER_AGENT, USER_AGENT_VALUE);
    if let Some(page) = cached.as_ref() {
        if let Some(etag) = page.etag.as_ref() {
            req = req.header(IF_NONE_MATCH, etag);
        }
        if let Some(last_modified) = page.last_modified.as_ref() {
            req = req.header(IF_MODIFIED_SINCE, last_modified);
        }
    }

    log::debug!("fetching {url}");
    let resp = req.send().context("request failed")?;
    let status = resp.status();
    let headers = resp.headers().clone();

    if status == StatusCode::NOT_MODIFIED {
        if let Some(mut page) = cached {
            page.fetched_at = now_secs();
            let body = page.body.clone();
            store_page(url, page);
            return Ok(body);
        }
        return Err(anyhow::anyhow!("received 304 without a cached body"));
    }

    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {status} fetching {url}"));
    }

    let header_value = |name| {
        headers
            .get(name)
            .and_then(|v: &reqwest::header::HeaderValue| v.to_str().ok())
            .map(str::to_string)
    };
    store_page(
        url,
        CachedPage {
            body: body.clone(),
            etag: header_value(ETAG),
            last_modified: header_value(LAST_MODIFIED),
            fetched_at: now_secs(),
        },
    );
    Ok(body)
}

fn store_page(url: &str, page: CachedPage) {
    let mut guard = CACHE.lock().expect("page cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.version = CACHE_VERSION;
    cache.pages.insert(url.to_string(), page);
    if let Err(err) = save_cache_file(cache) {
        log::warn!("failed to persist page cache: {err:#}");
    }
}

fn load_cache_file() -> PageCacheFile {
    let Some(path) = cache_path() else {
        return PageCacheFile::default();
    };
    let Ok(raw) = fs::read_to_string(path) else {
        return PageCacheFile::default();
    };
    let cache = serde_json::from_str::<PageCacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return PageCacheFile::default();
    }
    cache
}

fn save_cache_file(cache: &PageCacheFile) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(dir).ok();
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize page cache")?;
    fs::write(&tmp, json).context("write page cache")?;
    fs::rename(&tmp, &path).context("swap page cache")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
