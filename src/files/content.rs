//! Turning a resource path into status, content type and body.

use bytes::Bytes;
use std::path::Path;
use tracing::{error, warn};

use crate::files::StaticSite;
use crate::files::catalog::StatusCatalog;
use crate::files::mime::TEXT_HTML;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// The outcome of resolving one request, owned by its handler until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Bytes,
}

impl ResolvedContent {
    pub fn ok(content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::Ok,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// A canned page from `catalog`, always served as HTML.
    pub fn canned(status: StatusCode, catalog: &StatusCatalog) -> Self {
        Self {
            status,
            content_type: TEXT_HTML.to_string(),
            body: catalog.body(status),
        }
    }

    pub fn into_response(self, version: &str) -> Response {
        ResponseBuilder::new(self.status)
            .version(version)
            .content_type(self.content_type)
            .body(self.body)
            .build()
    }
}

impl StaticSite {
    /// Resolves `resource` to the content that answers it.
    ///
    /// Order matters: a missing file is a 404 whatever its extension, an
    /// existing file with an unregistered extension is a 415 whatever its
    /// contents, and only then is the file read.
    pub async fn resolve_content(&self, resource: &str) -> ResolvedContent {
        let Some(path) = self.resolver.resolve(resource) else {
            return ResolvedContent::canned(StatusCode::NotFound, &self.catalog);
        };

        if !self.is_servable_file(resource, &path).await {
            return ResolvedContent::canned(StatusCode::NotFound, &self.catalog);
        }

        let Some(content_type) = self.mime.lookup_path(&path) else {
            return ResolvedContent::canned(StatusCode::UnsupportedMediaType, &self.catalog);
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => ResolvedContent::ok(content_type, bytes),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to read file");
                ResolvedContent::canned(StatusCode::InternalServerError, &self.catalog)
            }
        }
    }

    // A regular file whose canonical location is inside the content root.
    async fn is_servable_file(&self, resource: &str, path: &Path) -> bool {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return false,
        }

        match tokio::fs::canonicalize(path).await {
            Ok(canonical) if canonical.starts_with(self.resolver.root()) => true,
            Ok(canonical) => {
                warn!(
                    resource,
                    target = %canonical.display(),
                    "Blocked resource outside content root"
                );
                false
            }
            Err(_) => false,
        }
    }
}
