use serde::{Deserialize, Serialize};

use super::non_empty;
use super::response::ErrorInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub cobalt: InstanceInfo,
    #[serde(default)]
    pub git: GitInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceInfo {
    pub version: String,
    pub url: String,
    /// Unix time in milliseconds, sent as a string.
    #[serde(default)]
    pub start_time: String,
    /// Maximum downloadable duration in seconds.
    #[serde(default, alias = "limit")]
    pub duration_limit: Option<u64>,
    #[serde(default)]
    pub services: Vec<String>,
}

impl InstanceInfo {
    pub fn start_time_ms(&self) -> Option<u64> {
        self.start_time.parse().ok()
    }

    pub fn supports(&self, service: &str) -> bool {
        self.services.iter().any(|s| s.eq_ignore_ascii_case(service))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitInfo {
    #[serde(default)]
    pub commit: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub remote: String,
}

/// `/api/serverInfo` payload of legacy instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyServerInfo {
    pub version: String,
    #[serde(default)]
    pub commit: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub cors: u8,
    #[serde(default)]
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token for later requests.
    pub token: String,
    /// Lifetime in seconds.
    pub exp: u64,
}

/// Raw `/session` reply; either a token or an error envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub exp: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

impl SessionResponse {
    pub fn into_result(self) -> Result<Session, ErrorInfo> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.status.as_deref() == Some("error") {
            return Err(ErrorInfo::new("error.api.generic"));
        }
        match non_empty(self.token) {
            Some(token) => Ok(Session {
                token,
                exp: self.exp.unwrap_or_default(),
            }),
            None => Err(ErrorInfo::new("error.api.auth.missing_token")),
        }
    }
}
