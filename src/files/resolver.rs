//! Request path to filesystem path mapping.

use std::path::{Path, PathBuf};
use url::Url;

/// Maps resource paths onto a single content root.
///
/// Resolution is lexical: query and fragment are dropped, `\` counts as a
/// separator, and dot segments are collapsed so the result can never climb
/// above the root. Every other byte of the path is kept as sent. Existence
/// is not checked here.
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    root: PathBuf,
    index_document: String,
}

impl ResourceResolver {
    pub fn new(root: impl Into<PathBuf>, index_document: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            index_document: index_document.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalized path for `raw`, with the index document applied.
    ///
    /// Absolute-form targets (`http://host/path`) are reduced to their path;
    /// any other scheme yields `None`.
    ///
    /// ```
    /// # use lantern::files::resolver::ResourceResolver;
    /// let resolver = ResourceResolver::new("/srv/www", "index.html");
    /// assert_eq!(resolver.normalize("/").as_deref(), Some("/index.html"));
    /// assert_eq!(resolver.normalize("/a/../b.css?v=2").as_deref(), Some("/b.css"));
    /// assert_eq!(resolver.normalize("/../../etc/passwd").as_deref(), Some("/etc/passwd"));
    /// assert_eq!(resolver.normalize("/café.html").as_deref(), Some("/café.html"));
    /// ```
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let mut path = collapse(origin_path(raw)?);
        if path.ends_with('/') {
            path.push_str(&self.index_document);
        }
        Some(path)
    }

    /// Filesystem path under the content root for `raw`.
    pub fn resolve(&self, raw: &str) -> Option<PathBuf> {
        let path = self.normalize(raw)?;
        Some(self.root.join(path.trim_start_matches('/')))
    }
}

// The path part of a request target, still carrying any query or fragment.
fn origin_path(raw: &str) -> Option<&str> {
    if raw.starts_with(['/', '\\']) {
        return Some(raw);
    }

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            // Slice the raw text so the path keeps the client's own bytes
            let (_, rest) = raw.split_once("://")?;
            Some(rest.find(['/', '?', '#']).map_or("/", |i| &rest[i..]))
        }
        Ok(_) => None,
        // Not a URL at all, e.g. "index.html" or "*"
        Err(_) => Some(raw),
    }
}

fn collapse(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.replace('\\', "/");

    let mut segments: Vec<&str> = Vec::new();
    let mut is_dir = true;
    for segment in path.split('/') {
        is_dir = matches!(segment, "" | "." | "..");
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut out = format!("/{}", segments.join("/"));
    if is_dir && !segments.is_empty() {
        out.push('/');
    }
    out
}
