//! Extension to content-type mapping.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Content type of HTML files and of every canned status page.
pub const TEXT_HTML: &str = "text/html;charset=utf-8";

const STANDARD_TYPES: &[(&str, &str)] = &[
    (".html", TEXT_HTML),
    (".htm", TEXT_HTML),
    (".css", "text/css"),
    (".js", "text/javascript"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".gif", "image/gif"),
    (".svg", "image/svg+xml"),
    (".webp", "image/webp"),
    (".ico", "image/ico"),
    (".woff", "font/woff"),
    (".woff2", "font/woff2"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeError {
    DuplicateExtension(String),
    InvalidExtension(String),
}

impl fmt::Display for MimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MimeError::DuplicateExtension(ext) => {
                write!(f, "extension {ext} is registered more than once")
            }
            MimeError::InvalidExtension(ext) => write!(f, "invalid extension {ext:?}"),
        }
    }
}

impl std::error::Error for MimeError {}

/// Read-only table of servable extensions.
///
/// Keys are stored lowercase with a leading dot; lookups normalize the same
/// way, so `.PNG`, `png` and `.png` all hit the same entry.
#[derive(Debug, Clone)]
pub struct MimeRegistry {
    types: HashMap<String, String>,
}

impl MimeRegistry {
    /// The fixed table of extensions served out of the box.
    pub fn standard() -> Self {
        let types = STANDARD_TYPES
            .iter()
            .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
            .collect();
        Self { types }
    }

    /// The standard table plus `extra`; an extra entry may not shadow a standard one.
    pub fn with_extra<I, K, V>(extra: I) -> Result<Self, MimeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut registry = Self::standard();
        for (ext, mime) in extra {
            registry.insert(ext.as_ref(), mime)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, ext: &str, mime: impl Into<String>) -> Result<(), MimeError> {
        let key =
            normalize_extension(ext).ok_or_else(|| MimeError::InvalidExtension(ext.to_string()))?;
        if self.types.contains_key(&key) {
            return Err(MimeError::DuplicateExtension(key));
        }
        self.types.insert(key, mime.into());
        Ok(())
    }

    pub fn lookup(&self, ext: &str) -> Option<&str> {
        let key = normalize_extension(ext)?;
        self.types.get(&key).map(String::as_str)
    }

    pub fn lookup_path(&self, path: &Path) -> Option<&str> {
        let ext = extension_of(path)?;
        self.types.get(&ext).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for MimeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lowercases `ext` and ensures exactly one leading dot.
///
/// ```
/// # use lantern::files::mime::normalize_extension;
/// assert_eq!(normalize_extension("PNG").as_deref(), Some(".png"));
/// assert_eq!(normalize_extension(".Html").as_deref(), Some(".html"));
/// assert_eq!(normalize_extension("."), None);
/// ```
pub fn normalize_extension(ext: &str) -> Option<String> {
    let bare = ext.trim().strip_prefix('.').unwrap_or(ext.trim());
    if bare.is_empty() || bare.contains(['.', '/', '\\']) || bare.contains(char::is_whitespace) {
        return None;
    }
    Some(format!(".{}", bare.to_ascii_lowercase()))
}

/// The path's extension, lowercased and with its leading dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(normalize_extension)
}
