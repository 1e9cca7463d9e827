use anyhow::Context;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::Config;
use crate::files::StaticSite;
use crate::http::connection::{Connection, ConnectionLimits};

/// Pause after a failed accept before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Loads the site, binds the loopback port and serves until the task is dropped.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let site = Arc::new(StaticSite::load(&cfg.static_files)?);
    let listener = bind(cfg).await?;
    serve(listener, site, ConnectionLimits::from(&cfg.server)).await
}

/// Binds `127.0.0.1:<port>`. Failure is fatal and never retried.
pub async fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let addr = cfg.server.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running at http://localhost:{}", listener.local_addr()?.port());
    Ok(listener)
}

/// Accepts forever, handing each connection to its own task.
///
/// Connection ids are assigned here, in accept order; handlers only ever see
/// their own copy.
pub async fn serve(
    listener: TcpListener,
    site: Arc<StaticSite>,
    limits: ConnectionLimits,
) -> anyhow::Result<()> {
    let mut accepted: u64 = 0;

    loop {
        let (socket, peer) = accept_next(|| listener.accept()).await;
        accepted += 1;
        info!(id = accepted, %peer, "Accepted connection");

        let site = Arc::clone(&site);
        let span = info_span!("conn", id = accepted, %peer);
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, site, limits);
                if let Err(e) = conn.run().await {
                    error!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(span),
        );
    }
}

/// Retries `accept` until it yields, pausing after every failure.
async fn accept_next<F, Fut, T>(mut accept: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<T>>,
{
    loop {
        match accept().await {
            Ok(conn) => return conn,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                // Errors like EMFILE persist until something is released
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
}
