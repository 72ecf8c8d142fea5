use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use super::options::PickerKind;
use super::response::PickerItem;
use super::{non_empty, status_tag};

/// Reply of an instance still serving the `/api/json` endpoint.
///
/// The tags differ from [`super::response::Response`] (`stream` instead of
/// `tunnel`, plus `success` and `rate-limit`), so the two are kept apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyResponse {
    Error {
        text: Option<String>,
    },
    RateLimit {
        text: Option<String>,
    },
    Redirect {
        url: String,
    },
    Stream {
        url: String,
    },
    Success {
        url: String,
    },
    Picker {
        picker_type: Option<PickerKind>,
        picker: Vec<PickerItem>,
        audio: Option<String>,
    },
    Unknown {
        status: String,
    },
}

impl LegacyResponse {
    pub fn status(&self) -> &str {
        match self {
            Self::Error { .. } => "error",
            Self::RateLimit { .. } => "rate-limit",
            Self::Redirect { .. } => "redirect",
            Self::Stream { .. } => "stream",
            Self::Success { .. } => "success",
            Self::Picker { .. } => "picker",
            Self::Unknown { status } => status,
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
enum Tagged {
    Error {
        #[serde(default)]
        text: Option<String>,
    },
    RateLimit {
        #[serde(default)]
        text: Option<String>,
    },
    Redirect {
        url: String,
    },
    Stream {
        url: String,
    },
    Success {
        url: String,
    },
    Picker {
        #[serde(default, rename = "pickerType")]
        picker_type: Option<PickerKind>,
        #[serde(default)]
        picker: Vec<PickerItem>,
        #[serde(default)]
        audio: Option<String>,
    },
}

impl From<Tagged> for LegacyResponse {
    fn from(tagged: Tagged) -> Self {
        match tagged {
            Tagged::Error { text } => Self::Error {
                text: non_empty(text),
            },
            Tagged::RateLimit { text } => Self::RateLimit {
                text: non_empty(text),
            },
            Tagged::Redirect { url } => Self::Redirect { url },
            Tagged::Stream { url } => Self::Stream { url },
            Tagged::Success { url } => Self::Success { url },
            Tagged::Picker {
                picker_type,
                picker,
                audio,
            } => Self::Picker {
                picker_type,
                picker,
                audio: non_empty(audio),
            },
        }
    }
}

impl<'de> Deserialize<'de> for LegacyResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let status = status_tag(&value).ok_or_else(|| D::Error::missing_field("status"))?;

        match status.as_str() {
            "error" | "rate-limit" | "redirect" | "stream" | "success" | "picker" => {
                serde_json::from_value::<Tagged>(value)
                    .map(Self::from)
                    .map_err(D::Error::custom)
            }
            _ => Ok(Self::Unknown { status }),
        }
    }
}
