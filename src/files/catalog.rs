//! Canned bodies for non-200 responses.

use bytes::Bytes;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::http::response::StatusCode;

/// Status codes that have a canned page, loaded from `<code>.html`.
pub const CANNED_STATUSES: &[StatusCode] = &[
    StatusCode::NotFound,
    StatusCode::UnsupportedMediaType,
    StatusCode::InternalServerError,
];

/// Status code to pre-read body, built once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct StatusCatalog {
    pages: HashMap<StatusCode, Bytes>,
}

impl StatusCatalog {
    /// Reads `404.html`, `415.html` and `500.html` from `dir`.
    ///
    /// A page that is missing or unreadable is stored as an empty body.
    pub fn load(dir: &Path) -> Self {
        let mut pages = HashMap::new();

        for status in CANNED_STATUSES {
            let path = dir.join(format!("{}.html", status.as_u16()));
            let body = match std::fs::read(&path) {
                Ok(bytes) => {
                    debug!(status = status.as_u16(), path = %path.display(), "Loaded canned page");
                    Bytes::from(bytes)
                }
                Err(e) => {
                    warn!(
                        status = status.as_u16(),
                        path = %path.display(),
                        error = %e,
                        "Canned page unavailable, using empty body"
                    );
                    Bytes::new()
                }
            };
            pages.insert(*status, body);
        }

        Self { pages }
    }

    /// The canned body for `status`, empty when none was loaded.
    pub fn body(&self, status: StatusCode) -> Bytes {
        self.pages.get(&status).cloned().unwrap_or_default()
    }
}
