//! Static content: what a resource path maps to and what gets sent back.
//!
//! Everything here is built once at startup and shared read-only between
//! connections.

pub mod catalog;
pub mod content;
pub mod mime;
pub mod resolver;

pub use catalog::StatusCatalog;
pub use content::ResolvedContent;
pub use mime::MimeRegistry;
pub use resolver::ResourceResolver;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::StaticFilesConfig;

/// The read-only state every connection handler consults.
#[derive(Debug, Clone)]
pub struct StaticSite {
    pub resolver: ResourceResolver,
    pub mime: MimeRegistry,
    pub catalog: StatusCatalog,
}

impl StaticSite {
    pub fn new(resolver: ResourceResolver, mime: MimeRegistry, catalog: StatusCatalog) -> Self {
        Self {
            resolver,
            mime,
            catalog,
        }
    }

    /// Builds the site from configuration, reading the canned pages from disk.
    pub fn load(cfg: &StaticFilesConfig) -> anyhow::Result<Self> {
        let root = match cfg.root.canonicalize() {
            Ok(root) => root,
            Err(e) => {
                warn!(root = %cfg.root.display(), error = %e, "Content root is not accessible");
                std::path::absolute(&cfg.root)
                    .with_context(|| format!("invalid content root {}", cfg.root.display()))?
            }
        };

        let mime = MimeRegistry::with_extra(&cfg.mime_types).context("invalid mime_types")?;
        let catalog = StatusCatalog::load(&root.join(&cfg.error_pages));

        info!(
            root = %root.display(),
            index = %cfg.index_document,
            mime_types = mime.len(),
            "Static site loaded"
        );

        Ok(Self::new(
            ResourceResolver::new(root, cfg.index_document.clone()),
            mime,
            catalog,
        ))
    }
}
