//! Shared fixtures: a throwaway content root on disk.

#![allow(dead_code)]

use lantern::config::StaticFilesConfig;
use lantern::files::StaticSite;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const NOT_FOUND_PAGE: &[u8] = b"<h1>404 - nothing here</h1>";
pub const UNSUPPORTED_PAGE: &[u8] = b"<h1>415 - cannot serve that</h1>";

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A content root with `code/404.html` and `code/415.html`, removed on drop.
pub struct TempSite {
    pub root: PathBuf,
}

impl TempSite {
    pub fn new() -> Self {
        let site = Self::empty();
        site.write("code/404.html", NOT_FOUND_PAGE);
        site.write("code/415.html", UNSUPPORTED_PAGE);
        site
    }

    /// A content root without any canned pages.
    pub fn empty() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let root = std::env::temp_dir().join(format!(
            "lantern-test-{}-{}",
            std::process::id(),
            id
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    pub fn write(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn config(&self) -> StaticFilesConfig {
        StaticFilesConfig {
            root: self.root.clone(),
            ..StaticFilesConfig::default()
        }
    }

    pub fn site(&self) -> Arc<StaticSite> {
        Arc::new(StaticSite::load(&self.config()).unwrap())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for TempSite {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// Splits a raw response into (status token, header lines, body).
pub fn split_response(raw: &[u8]) -> (String, Vec<String>, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response head terminator");
    let head = std::str::from_utf8(&raw[..end]).unwrap();
    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap();
    let status = status_line.split(' ').nth(1).unwrap().to_string();
    let headers = lines.map(str::to_string).collect();
    (status, headers, raw[end + 4..].to_vec())
}

pub fn header<'a>(headers: &'a [String], name: &str) -> Option<&'a str> {
    headers.iter().find_map(|line| {
        let (key, value) = line.split_once(": ")?;
        (key == name).then_some(value)
    })
}
