use cobalt_core::{
    ClientConfig, LegacyRequest, LegacyResponse, LegacyServerInfo, PostRequest, Response,
    ServerInfo, Session, SessionResponse,
};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::core::http_client;
use crate::core::resolver::{self, ApiResponse, MediaHandle};
use crate::core::streamer::{self, MediaStream};
use crate::error::Error;

pub const ENDPOINT_ROOT: &str = "/";
pub const ENDPOINT_SESSION: &str = "/session";
pub const ENDPOINT_LEGACY_JSON: &str = "/api/json";
pub const ENDPOINT_LEGACY_SERVER_INFO: &str = "/api/serverInfo";

/// Client for one cobalt instance.
///
/// Holds no per-request state; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Cobalt {
    client: reqwest::Client,
    api_url: String,
    headers: HeaderMap,
}

impl Cobalt {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        url::Url::parse(&config.api_url)?;
        let client = http_client::build_client(&config)?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            headers: http_client::api_headers(&config)?,
        })
    }

    pub fn with_api(api_url: impl Into<String>) -> Result<Self, Error> {
        Self::new(ClientConfig::with_api_url(api_url))
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Copy of this client that authenticates with a session token.
    pub fn with_bearer(&self, token: &str) -> Result<Self, Error> {
        let mut authed = self.clone();
        http_client::insert_header(
            &mut authed.headers,
            AUTHORIZATION.as_str(),
            &format!("Bearer {}", token),
        )?;
        Ok(authed)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub async fn post(&self, request: &PostRequest) -> Result<Response, Error> {
        self.post_json(ENDPOINT_ROOT, request).await
    }

    pub async fn post_legacy(&self, request: &LegacyRequest) -> Result<LegacyResponse, Error> {
        self.post_json(ENDPOINT_LEGACY_JSON, request).await
    }

    pub async fn server_info(&self) -> Result<ServerInfo, Error> {
        self.get_json(ENDPOINT_ROOT).await
    }

    pub async fn legacy_server_info(&self) -> Result<LegacyServerInfo, Error> {
        self.get_json(ENDPOINT_LEGACY_SERVER_INFO).await
    }

    pub async fn session(&self) -> Result<Session, Error> {
        let url = self.endpoint(ENDPOINT_SESSION);
        tracing::debug!("[cobalt] POST {}", url);
        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .send()
            .await?;
        let raw: SessionResponse = decode(response).await?;
        raw.into_result().map_err(|info| {
            tracing::warn!("[cobalt] session refused: {}", info);
            Error::Api(info)
        })
    }

    /// Opens the media behind `handle`, filling in its filename.
    pub async fn stream(
        &self,
        handle: &mut MediaHandle,
        cancel: &CancellationToken,
    ) -> Result<MediaStream, Error> {
        streamer::open(&self.client, handle, cancel).await
    }

    /// Resolves `response` with the default picker choice and opens it.
    pub async fn download<R: ApiResponse + ?Sized>(
        &self,
        response: &R,
        cancel: &CancellationToken,
    ) -> Result<(MediaHandle, MediaStream), Error> {
        let mut handle = resolver::resolve(response)?;
        let stream = self.stream(&mut handle, cancel).await?;
        Ok((handle, stream))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let payload = serde_json::to_vec(body)?;
        tracing::debug!("[cobalt] POST {}", url);
        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .body(payload)
            .send()
            .await?;
        decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint(path);
        tracing::debug!("[cobalt] GET {}", url);
        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?;
        decode(response).await
    }
}

/// The API reports failures as JSON with 4xx codes, so the body is decoded
/// whatever the status.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let status = response.status();
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("[cobalt] undecodable HTTP {} body: {}", status, e);
        Error::Decode(e)
    })
}
