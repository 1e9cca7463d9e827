use anyhow::Context;
use bytes::BytesMut;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::files::StaticSite;
use crate::http::parser::{find_headers_end, parse_request_line};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

/// Size of a single read from the socket.
const READ_CHUNK: usize = 1024;

/// Per-connection bounds on reading and writing.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    pub max_request_bytes: usize,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl From<&ServerConfig> for ConnectionLimits {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            max_request_bytes: cfg.max_request_bytes,
            read_timeout: cfg.read_timeout(),
            write_timeout: cfg.write_timeout(),
        }
    }
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

/// Serves exactly one request on one accepted stream, then closes it.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    site: Arc<StaticSite>,
    limits: ConnectionLimits,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Parsed(Request),
    Responding(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, site: Arc<StaticSite>, limits: ConnectionLimits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            site,
            limits,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the connection to completion.
    ///
    /// The stream is shut down exactly once whether or not serving succeeded.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.serve().await;
        self.state = ConnectionState::Closed;
        let _ = self.stream.shutdown().await;
        result
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(req) => ConnectionState::Parsed(req),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Parsed(req) => {
                    let content = self.site.resolve_content(&req.path).await;
                    let status = content.status.as_u16();
                    let response = content.into_response(&req.version);

                    info!(
                        method = %req.method,
                        path = %req.path,
                        status,
                        bytes = response.content_length(),
                        "Serving request"
                    );

                    self.state = ConnectionState::Responding(ResponseWriter::new(response));
                }

                ConnectionState::Responding(writer) => {
                    writer
                        .write_to_stream(&mut self.stream, self.limits.write_timeout)
                        .await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads the request head and parses its first line.
    ///
    /// `None` means there is nothing to answer: the client sent nothing, or
    /// sent something that is not a request line. Such connections are
    /// closed without writing a single byte.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        self.fill_head().await?;

        match parse_request_line(&self.buffer) {
            Ok(request) => Ok(Some(request)),
            Err(e) => {
                debug!(error = ?e, buffered = self.buffer.len(), "Dropping request");
                Ok(None)
            }
        }
    }

    // Accumulate until the head terminator, EOF, the size limit or the deadline.
    async fn fill_head(&mut self) -> anyhow::Result<()> {
        let deadline = Instant::now() + self.limits.read_timeout;
        let mut chunk = [0u8; READ_CHUNK];

        while find_headers_end(&self.buffer).is_none()
            && self.buffer.len() < self.limits.max_request_bytes
        {
            let n = match timeout_at(deadline, self.stream.read(&mut chunk)).await {
                Ok(read) => read.context("failed to read request")?,
                Err(_) => {
                    debug!(buffered = self.buffer.len(), "Read timed out");
                    break;
                }
            };

            if n == 0 {
                // Client closed its side
                break;
            }

            let room = self.limits.max_request_bytes - self.buffer.len();
            self.buffer.extend_from_slice(&chunk[..n.min(room)]);
        }

        Ok(())
    }
}
