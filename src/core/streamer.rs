use futures::TryStreamExt;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;

use crate::core::filename;
use crate::core::resolver::MediaHandle;
use crate::error::Error;

/// Open body of a media download. Dropping it closes the connection.
#[derive(Debug)]
pub struct MediaStream {
    response: reqwest::Response,
}

impl MediaStream {
    /// Not checked by [`open`]; error pages come back as a body too.
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    pub fn into_response(self) -> reqwest::Response {
        self.response
    }

    pub fn into_reader(self) -> impl AsyncRead + Send + Unpin {
        StreamReader::new(Box::pin(
            self.response.bytes_stream().map_err(std::io::Error::other),
        ))
    }

    /// Writes the whole body to `writer`, checking `cancel` between chunks.
    pub async fn copy_to<W>(mut self, writer: &mut W, cancel: &CancellationToken) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written: u64 = 0;
        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("[stream] copy cancelled after {} bytes", written);
                    return Err(Error::Cancelled);
                }
                chunk = self.response.chunk() => chunk?,
            };
            let Some(data) = chunk else {
                break;
            };
            writer.write_all(&data).await?;
            written += data.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }
}

/// Issues the GET for `handle` and fills in its filename from the response
/// headers if it has none yet. Exactly one request is made.
pub async fn open(
    client: &reqwest::Client,
    handle: &mut MediaHandle,
    cancel: &CancellationToken,
) -> Result<MediaStream, Error> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    let url = url::Url::parse(handle.url())?;
    tracing::debug!("[stream] GET {}", url);

    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("[stream] request to {} cancelled", handle.url());
            return Err(Error::Cancelled);
        }
        response = client.get(url).send() => response?,
    };

    if handle.filename().is_empty() {
        match filename::derive_for(handle.delivery(), handle.url(), response.headers()) {
            Ok(name) => handle.set_filename(name),
            Err(e) => {
                tracing::warn!("[stream] {}", e);
                return Err(e.into());
            }
        }
    }

    tracing::debug!(
        "[stream] HTTP {} for {} (filename: {:?}, length: {:?})",
        response.status(),
        handle.url(),
        handle.filename(),
        response.content_length()
    );
    Ok(MediaStream { response })
}
