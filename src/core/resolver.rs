use cobalt_core::{LegacyResponse, PickerItem, PickerItemKind, Response};

use crate::core::filename::{url_basename, Delivery};
use crate::error::UnstreamableError;

/// A URL ready for a download GET plus whatever filename is known so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle {
    url: String,
    filename: String,
    delivery: Delivery,
}

impl MediaHandle {
    pub fn new(url: impl Into<String>, delivery: Delivery) -> Self {
        Self {
            url: url.into(),
            filename: String::new(),
            delivery,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Empty until the server or the download response supplies one.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn delivery(&self) -> Delivery {
        self.delivery
    }

    pub(crate) fn set_filename(&mut self, filename: String) {
        self.filename = filename;
    }
}

/// What a response points at before any item is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Single {
        url: &'a str,
        filename: Option<&'a str>,
        delivery: Delivery,
    },
    Picker(&'a [PickerItem]),
}

/// Common view over both response schema revisions.
pub trait ApiResponse {
    fn status(&self) -> &str;

    fn target(&self) -> Result<Target<'_>, UnstreamableError>;

    /// Slideshow background audio, if the server sent one. Never chosen by
    /// [`resolve`]; callers stream it explicitly.
    fn background_audio(&self) -> Option<MediaHandle> {
        None
    }
}

impl ApiResponse for Response {
    fn status(&self) -> &str {
        Response::status(self)
    }

    fn target(&self) -> Result<Target<'_>, UnstreamableError> {
        match self {
            Response::Error { error } => Err(UnstreamableError::from_info(error.clone())),
            Response::Redirect { url, filename } => Ok(Target::Single {
                url,
                filename: filename.as_deref(),
                delivery: Delivery::Redirect,
            }),
            Response::Tunnel { url, filename } => Ok(Target::Single {
                url,
                filename: filename.as_deref(),
                delivery: Delivery::Proxied,
            }),
            Response::Picker { picker, .. } => Ok(Target::Picker(picker)),
            Response::Unknown { status } => Err(UnstreamableError::UnrecognizedStatus {
                tag: status.clone(),
            }),
        }
    }

    fn background_audio(&self) -> Option<MediaHandle> {
        match self {
            Response::Picker {
                audio: Some(audio),
                audio_filename,
                ..
            } => Some(
                MediaHandle::new(audio.as_str(), Delivery::PickerItem)
                    .with_filename(audio_filename.clone().unwrap_or_default()),
            ),
            _ => None,
        }
    }
}

impl ApiResponse for LegacyResponse {
    fn status(&self) -> &str {
        LegacyResponse::status(self)
    }

    fn target(&self) -> Result<Target<'_>, UnstreamableError> {
        match self {
            LegacyResponse::Error { text } => Err(UnstreamableError::ServerError {
                detail: text.clone().unwrap_or_else(|| "error".to_string()),
                info: None,
            }),
            LegacyResponse::RateLimit { text } => Err(UnstreamableError::RateLimited {
                detail: text.clone().unwrap_or_else(|| "rate-limit".to_string()),
                limit: None,
            }),
            LegacyResponse::Redirect { url } => Ok(Target::Single {
                url,
                filename: None,
                delivery: Delivery::Redirect,
            }),
            LegacyResponse::Stream { url } | LegacyResponse::Success { url } => {
                Ok(Target::Single {
                    url,
                    filename: None,
                    delivery: Delivery::Proxied,
                })
            }
            LegacyResponse::Picker { picker, .. } => Ok(Target::Picker(picker)),
            LegacyResponse::Unknown { status } => Err(UnstreamableError::UnrecognizedStatus {
                tag: status.clone(),
            }),
        }
    }

    fn background_audio(&self) -> Option<MediaHandle> {
        match self {
            LegacyResponse::Picker {
                audio: Some(audio), ..
            } => Some(MediaHandle::new(audio.as_str(), Delivery::PickerItem)),
            _ => None,
        }
    }
}

/// Resolves to the single target, or the first picker item.
pub fn resolve<R: ApiResponse + ?Sized>(response: &R) -> Result<MediaHandle, UnstreamableError> {
    resolve_with(response, |_| true)
}

/// Like [`resolve`], taking the first picker item accepted by `select`.
pub fn resolve_with<R, F>(response: &R, select: F) -> Result<MediaHandle, UnstreamableError>
where
    R: ApiResponse + ?Sized,
    F: FnMut(&PickerItem) -> bool,
{
    let result = resolve_target(response.target(), select);
    match &result {
        Ok(handle) => tracing::debug!(
            "[resolve] {} -> {} (filename: {:?})",
            response.status(),
            handle.url(),
            handle.filename()
        ),
        Err(e) => tracing::warn!("[resolve] {} is not streamable: {}", response.status(), e),
    }
    result
}

fn resolve_target<F>(
    target: Result<Target<'_>, UnstreamableError>,
    mut select: F,
) -> Result<MediaHandle, UnstreamableError>
where
    F: FnMut(&PickerItem) -> bool,
{
    match target? {
        Target::Single {
            url,
            filename: Some(filename),
            delivery,
        } => Ok(MediaHandle::new(url, delivery).with_filename(filename)),
        Target::Single {
            url,
            filename: None,
            delivery: Delivery::Redirect,
        } => Ok(MediaHandle::new(url, Delivery::Redirect).with_filename(url_basename(url))),
        Target::Single {
            url,
            filename: None,
            delivery,
        } => Ok(MediaHandle::new(url, delivery)),
        Target::Picker([]) => Err(UnstreamableError::EmptyPicker),
        Target::Picker(items) => items
            .iter()
            .find(|item| select(item))
            .map(|item| MediaHandle::new(item.url.as_str(), Delivery::PickerItem))
            .ok_or(UnstreamableError::NoMatchingItem),
    }
}

/// Picker selector accepting the first item of `kind`.
/// Items of an unrecognized type never match, not even `first_of(Unknown)`.
pub fn first_of(kind: PickerItemKind) -> impl FnMut(&PickerItem) -> bool {
    move |item| kind != PickerItemKind::Unknown && item.kind == Some(kind)
}
