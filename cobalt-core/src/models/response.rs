use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::options::PickerItemKind;
use super::{non_empty, status_tag};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Machine readable code, e.g. `error.api.link.invalid`.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Rate limit ceiling or maximum duration in seconds, depending on the code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            context: None,
        }
    }

    pub fn service(&self) -> Option<&str> {
        self.context.as_ref()?.service.as_deref()
    }

    pub fn limit(&self) -> Option<u64> {
        self.context.as_ref()?.limit
    }

    pub fn is_rate_limit(&self) -> bool {
        self.code.ends_with("rate_exceeded")
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        match (self.service(), self.limit()) {
            (Some(service), Some(limit)) => write!(f, " (service: {}, limit: {})", service, limit),
            (Some(service), None) => write!(f, " (service: {})", service),
            (None, Some(limit)) => write!(f, " (limit: {})", limit),
            (None, None) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PickerItemKind>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

/// Reply of a current API instance, keyed by its `status` field.
///
/// Tags this client does not know decode to [`Response::Unknown`] instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Error {
        error: ErrorInfo,
    },
    Redirect {
        url: String,
        filename: Option<String>,
    },
    Tunnel {
        url: String,
        filename: Option<String>,
    },
    Picker {
        picker: Vec<PickerItem>,
        audio: Option<String>,
        audio_filename: Option<String>,
    },
    Unknown {
        status: String,
    },
}

impl Response {
    pub fn status(&self) -> &str {
        match self {
            Self::Error { .. } => "error",
            Self::Redirect { .. } => "redirect",
            Self::Tunnel { .. } => "tunnel",
            Self::Picker { .. } => "picker",
            Self::Unknown { status } => status,
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Tagged {
    Error {
        error: ErrorInfo,
    },
    Redirect {
        url: String,
        #[serde(default)]
        filename: Option<String>,
    },
    Tunnel {
        url: String,
        #[serde(default)]
        filename: Option<String>,
    },
    Picker {
        #[serde(default)]
        picker: Vec<PickerItem>,
        #[serde(default)]
        audio: Option<String>,
        #[serde(default, rename = "audioFilename")]
        audio_filename: Option<String>,
    },
}

impl From<Tagged> for Response {
    fn from(tagged: Tagged) -> Self {
        match tagged {
            Tagged::Error { error } => Self::Error { error },
            Tagged::Redirect { url, filename } => Self::Redirect {
                url,
                filename: non_empty(filename),
            },
            Tagged::Tunnel { url, filename } => Self::Tunnel {
                url,
                filename: non_empty(filename),
            },
            Tagged::Picker {
                picker,
                audio,
                audio_filename,
            } => Self::Picker {
                picker,
                audio: non_empty(audio),
                audio_filename: non_empty(audio_filename),
            },
        }
    }
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let status = status_tag(&value).ok_or_else(|| D::Error::missing_field("status"))?;

        match status.as_str() {
            "error" | "redirect" | "tunnel" | "picker" => serde_json::from_value::<Tagged>(value)
                .map(Self::from)
                .map_err(D::Error::custom),
            _ => Ok(Self::Unknown { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Response {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_tunnel_with_filename() {
        let resp = parse(r#"{"status":"tunnel","url":"https://cdn/x","filename":"clip.mp4"}"#);
        assert_eq!(
            resp,
            Response::Tunnel {
                url: "https://cdn/x".into(),
                filename: Some("clip.mp4".into()),
            }
        );
        assert_eq!(resp.status(), "tunnel");
    }

    #[test]
    fn empty_filename_is_absent() {
        let resp = parse(r#"{"status":"redirect","url":"https://host/a.mp4","filename":""}"#);
        assert_eq!(
            resp,
            Response::Redirect {
                url: "https://host/a.mp4".into(),
                filename: None,
            }
        );
    }

    #[test]
    fn parses_error_context() {
        let resp = parse(
            r#"{"status":"error","error":{"code":"error.api.content.too_long","context":{"service":"youtube","limit":10800}}}"#,
        );
        let Response::Error { error } = resp else {
            panic!("expected error variant");
        };
        assert_eq!(error.code, "error.api.content.too_long");
        assert_eq!(error.service(), Some("youtube"));
        assert_eq!(error.limit(), Some(10800));
        assert!(!error.is_rate_limit());
        assert_eq!(
            error.to_string(),
            "error.api.content.too_long (service: youtube, limit: 10800)"
        );
    }

    #[test]
    fn rate_exceeded_code_is_rate_limit() {
        assert!(ErrorInfo::new("error.api.rate_exceeded").is_rate_limit());
    }

    #[test]
    fn parses_picker_with_audio() {
        let resp = parse(
            r#"{"status":"picker","audio":"https://cdn/a.mp3","audioFilename":"a.mp3","picker":[{"type":"photo","url":"https://cdn/1.jpg","thumb":"https://cdn/t1.jpg"},{"type":"video","url":"https://cdn/2.mp4"}]}"#,
        );
        let Response::Picker {
            picker,
            audio,
            audio_filename,
        } = resp
        else {
            panic!("expected picker variant");
        };
        assert_eq!(picker.len(), 2);
        assert_eq!(picker[0].kind, Some(PickerItemKind::Photo));
        assert_eq!(picker[0].thumb.as_deref(), Some("https://cdn/t1.jpg"));
        assert_eq!(picker[1].thumb, None);
        assert_eq!(audio.as_deref(), Some("https://cdn/a.mp3"));
        assert_eq!(audio_filename.as_deref(), Some("a.mp3"));
    }

    #[test]
    fn picker_with_unknown_item_type_decodes() {
        let resp = parse(
            r#"{"status":"picker","picker":[{"type":"audio","url":"https://cdn/1.mp3"},{"type":"video","url":"https://cdn/2.mp4"}]}"#,
        );
        let Response::Picker { picker, .. } = resp else {
            panic!("expected picker variant");
        };
        assert_eq!(picker[0].kind, Some(PickerItemKind::Unknown));
        assert_eq!(picker[0].url, "https://cdn/1.mp3");
        assert_eq!(picker[1].kind, Some(PickerItemKind::Video));
    }

    #[test]
    fn unknown_status_keeps_tag() {
        let resp = parse(r#"{"status":"local-processing","tunnel":["a","b"]}"#);
        assert_eq!(
            resp,
            Response::Unknown {
                status: "local-processing".into(),
            }
        );
        assert_eq!(resp.status(), "local-processing");
    }

    #[test]
    fn missing_status_fails() {
        let err = serde_json::from_str::<Response>(r#"{"url":"https://cdn/x"}"#).unwrap_err();
        assert!(err.to_string().contains("status"));
    }

    #[test]
    fn known_tag_with_bad_shape_fails() {
        assert!(serde_json::from_str::<Response>(r#"{"status":"tunnel"}"#).is_err());
    }

    #[test]
    fn foreign_fields_are_ignored() {
        let resp = parse(r#"{"status":"redirect","url":"https://host/f.mp4","picker":[],"error":{"code":"x"}}"#);
        assert!(matches!(resp, Response::Redirect { .. }));
    }
}
