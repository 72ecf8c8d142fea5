use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_API_URL: &str = "http://localhost:9000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Sent verbatim with every API request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub proxy: ProxySettings,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_user_agent() -> String {
    concat!("cobalt-client/", env!("CARGO_PKG_VERSION")).into()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    15
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            headers: BTreeMap::new(),
            proxy: ProxySettings::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `COBALT_API_URL` and `COBALT_API_KEY` from `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("COBALT_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(key) = lookup("COBALT_API_KEY").filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_proxy_type")]
    pub proxy_type: String,
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_proxy_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn default_proxy_type() -> String {
    "http".into()
}

fn default_proxy_port() -> u16 {
    8080
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            proxy_type: default_proxy_type(),
            host: String::new(),
            port: default_proxy_port(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl ProxySettings {
    /// Proxy endpoint with credentials percent-encoded into the userinfo.
    /// `Ok(None)` when the proxy is disabled or has no host.
    pub fn url(&self) -> Result<Option<url::Url>, url::ParseError> {
        if !self.enabled || self.host.is_empty() {
            return Ok(None);
        }
        let scheme = match self.proxy_type.as_str() {
            "socks5" => "socks5",
            "https" => "https",
            _ => "http",
        };
        let mut url = url::Url::parse(&format!("{}://{}:{}", scheme, self.host, self.port))?;
        if !self.username.is_empty() {
            url.set_username(&self.username)
                .map_err(|_| url::ParseError::EmptyHost)?;
            url.set_password(Some(&self.password))
                .map_err(|_| url::ParseError::EmptyHost)?;
        }
        Ok(Some(url))
    }

    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.username.is_empty() {
            return None;
        }
        Some((&self.username, &self.password))
    }
}
