use cobalt_core::ErrorInfo;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Unstreamable(#[from] UnstreamableError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    HeaderParse(#[from] HeaderParseError),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid value for header `{name}`")]
    InvalidHeader { name: String },

    #[error("API refused the request: {0}")]
    Api(ErrorInfo),

    #[error("request cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Unstreamable(e) => e.is_rate_limited(),
            Self::Api(info) => info.is_rate_limit(),
            _ => false,
        }
    }
}

/// A well-formed response that does not point at anything downloadable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnstreamableError {
    #[error("server reported error: {detail}")]
    ServerError {
        detail: String,
        info: Option<ErrorInfo>,
    },

    #[error("server is rate limiting requests: {detail}")]
    RateLimited {
        detail: String,
        limit: Option<u64>,
    },

    #[error("empty picker")]
    EmptyPicker,

    #[error("no picker item matched the selection")]
    NoMatchingItem,

    #[error("unrecognized status: {tag}")]
    UnrecognizedStatus { tag: String },
}

impl UnstreamableError {
    pub(crate) fn from_info(info: ErrorInfo) -> Self {
        if info.is_rate_limit() {
            return Self::RateLimited {
                detail: info.to_string(),
                limit: info.limit(),
            };
        }
        Self::ServerError {
            detail: info.to_string(),
            info: Some(info),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::ServerError { .. } => "server reported error",
            Self::RateLimited { .. } => "rate limited",
            Self::EmptyPicker => "empty picker",
            Self::NoMatchingItem => "no matching item",
            Self::UnrecognizedStatus { .. } => "unrecognized status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed Content-Disposition header `{header}`: {reason}")]
pub struct HeaderParseError {
    pub header: String,
    pub reason: &'static str,
}
