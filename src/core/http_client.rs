use std::time::Duration;

use cobalt_core::{ClientConfig, ProxySettings};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::error::Error;

pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, Error> {
    let builder = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
    Ok(apply_proxy(builder, &config.proxy)?.build()?)
}

/// A configured but unusable proxy is an error; the client never falls back
/// to a direct connection.
pub fn apply_proxy(
    builder: reqwest::ClientBuilder,
    proxy: &ProxySettings,
) -> Result<reqwest::ClientBuilder, Error> {
    let Some(proxy_url) = proxy.url()? else {
        return Ok(builder);
    };
    let mut p = reqwest::Proxy::all(proxy_url)?;
    if let Some((username, password)) = proxy.credentials() {
        p = p.basic_auth(username, password);
    }
    tracing::debug!("[cobalt] using {} proxy at {}:{}", proxy.proxy_type, proxy.host, proxy.port);
    Ok(builder.proxy(p))
}

/// Headers sent with every API call: JSON content negotiation, the API key
/// if configured, then the caller's own headers verbatim.
pub fn api_headers(config: &ClientConfig) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
        insert_header(&mut headers, AUTHORIZATION.as_str(), &format!("Api-Key {}", key))?;
    }
    for (name, value) in &config.headers {
        insert_header(&mut headers, name, value)?;
    }
    Ok(headers)
}

pub fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), Error> {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(header), Ok(value)) => {
            headers.insert(header, value);
            Ok(())
        }
        _ => Err(Error::InvalidHeader {
            name: name.to_string(),
        }),
    }
}
