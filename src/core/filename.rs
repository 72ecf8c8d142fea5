use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};

use crate::core::content_disposition;
use crate::error::HeaderParseError;

/// How the server delivers the resolved URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Points straight at the origin service.
    Redirect,
    /// Proxied or rendered by the instance (`tunnel`, `stream`, `success`).
    Proxied,
    /// One entry of a picker; may be either of the above.
    PickerItem,
}

impl Delivery {
    /// Maps a status tag of either schema revision. Error-like and unknown
    /// tags have no delivery.
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "redirect" => Some(Self::Redirect),
            "tunnel" | "stream" | "success" => Some(Self::Proxied),
            "picker" => Some(Self::PickerItem),
            _ => None,
        }
    }
}

/// Filename for a response with the given status tag. Empty means unknown.
pub fn derive_filename(
    status: &str,
    url: &str,
    headers: &HeaderMap,
) -> Result<String, HeaderParseError> {
    match Delivery::from_status(status) {
        Some(delivery) => derive_for(delivery, url, headers),
        None => Ok(String::new()),
    }
}

pub fn derive_for(
    delivery: Delivery,
    url: &str,
    headers: &HeaderMap,
) -> Result<String, HeaderParseError> {
    match delivery {
        Delivery::Redirect => Ok(url_basename(url)),
        Delivery::Proxied => from_headers(headers).map(Option::unwrap_or_default),
        Delivery::PickerItem => Ok(from_headers(headers)?.unwrap_or_else(|| url_basename(url))),
    }
}

fn from_headers(headers: &HeaderMap) -> Result<Option<String>, HeaderParseError> {
    match headers.get(CONTENT_DISPOSITION) {
        Some(value) => content_disposition::parse_filename(&String::from_utf8_lossy(value.as_bytes())),
        None => Ok(None),
    }
}

/// Percent-decoded last path segment, without query or fragment.
pub fn url_basename(url: &str) -> String {
    let Ok(parsed) = url::Url::parse(url) else {
        return String::new();
    };
    let last = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or_default();

    String::from_utf8_lossy(&urlencoding::decode_binary(last.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn disposition(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_DISPOSITION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn basename_drops_query() {
        assert_eq!(url_basename("https://host/a/b/file.mp4?x=1"), "file.mp4");
    }

    #[test]
    fn basename_decodes_escapes() {
        assert_eq!(url_basename("https://host/media/my%20clip%C3%A9.mp4"), "my clipé.mp4");
    }

    #[test]
    fn basename_trailing_slash() {
        assert_eq!(url_basename("https://host/videos/abc/"), "abc");
    }

    #[test]
    fn basename_empty_path() {
        assert_eq!(url_basename("https://host"), "");
        assert_eq!(url_basename("https://host/"), "");
        assert_eq!(url_basename("https://host/?file=a.mp4"), "");
    }

    #[test]
    fn basename_unparseable() {
        assert_eq!(url_basename("not a url"), "");
    }

    #[test]
    fn redirect_ignores_headers() {
        let headers = disposition("attachment; filename=\"other.mp4\"");
        assert_eq!(
            derive_filename("redirect", "https://host/x/real.mp4", &headers).unwrap(),
            "real.mp4"
        );
    }

    #[test]
    fn proxied_reads_header() {
        let headers = disposition("attachment; filename=\"song.mp3\"");
        for status in ["tunnel", "stream", "success"] {
            assert_eq!(
                derive_filename(status, "https://cdn/y", &headers).unwrap(),
                "song.mp3"
            );
        }
    }

    #[test]
    fn proxied_without_header_is_empty() {
        assert_eq!(
            derive_filename("tunnel", "https://cdn/y/file.mp4", &HeaderMap::new()).unwrap(),
            ""
        );
    }

    #[test]
    fn proxied_malformed_header_fails() {
        let headers = disposition("attachment; filename=\"oops");
        assert!(derive_filename("stream", "https://cdn/y", &headers).is_err());
    }

    #[test]
    fn error_like_statuses_skip_parsing() {
        let headers = disposition("attachment; filename=\"oops");
        for status in ["error", "rate-limit", "something-new"] {
            assert_eq!(derive_filename(status, "https://cdn/y.mp4", &headers).unwrap(), "");
        }
    }

    #[test]
    fn picker_item_prefers_header_then_url() {
        let headers = disposition("inline; filename=photo_1.jpg");
        assert_eq!(
            derive_filename("picker", "https://cdn/p/1.jpg", &headers).unwrap(),
            "photo_1.jpg"
        );
        assert_eq!(
            derive_filename("picker", "https://cdn/p/1.jpg", &HeaderMap::new()).unwrap(),
            "1.jpg"
        );
    }
}
