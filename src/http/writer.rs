use anyhow::Context;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::response::Response;

/// Writes one response as two complete writes: the head, then the body.
pub struct ResponseWriter {
    head: Vec<u8>,
    response: Response,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: response.head_bytes(),
            response,
        }
    }

    pub async fn write_to_stream<S>(
        &self,
        stream: &mut S,
        write_timeout: Duration,
    ) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        timeout(write_timeout, async {
            stream
                .write_all(&self.head)
                .await
                .context("failed to write response head")?;

            if !self.response.body.is_empty() {
                stream
                    .write_all(&self.response.body)
                    .await
                    .context("failed to write response body")?;
            }

            stream.flush().await.context("failed to flush response")
        })
        .await
        .context("write timeout")?
    }
}
