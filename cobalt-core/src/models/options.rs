use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    H264,
    Av1,
    Vp9,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoQuality {
    #[serde(rename = "144")]
    P144,
    #[serde(rename = "240")]
    P240,
    #[serde(rename = "360")]
    P360,
    #[serde(rename = "480")]
    P480,
    #[serde(rename = "720")]
    P720,
    #[serde(rename = "1080")]
    P1080,
    #[serde(rename = "1440")]
    P1440,
    #[serde(rename = "2160")]
    P2160,
    #[serde(rename = "4320")]
    P4320,
    #[serde(rename = "max")]
    Max,
}

impl VideoQuality {
    pub const UHD_4K: VideoQuality = VideoQuality::P2160;
    pub const UHD_8K: VideoQuality = VideoQuality::P4320;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Best,
    Mp3,
    Ogg,
    Wav,
    Opus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioBitrate {
    #[serde(rename = "320")]
    Kbps320,
    #[serde(rename = "256")]
    Kbps256,
    #[serde(rename = "128")]
    Kbps128,
    #[serde(rename = "96")]
    Kbps96,
    #[serde(rename = "64")]
    Kbps64,
    #[serde(rename = "8")]
    Kbps8,
}

/// Naming scheme the server applies to generated files.
///
/// `Classic` gives `youtube_dQw4w9WgXcQ_2560x1440_h264.mp4`, `Pretty` gives
/// `Video Title (1440p, h264, youtube).mp4`, `Basic` drops the service and
/// `Nerdy` adds the media id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameStyle {
    Classic,
    Pretty,
    Basic,
    Nerdy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    Auto,
    Audio,
    Mute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerItemKind {
    Video,
    Photo,
    Gif,
    /// Any type this client does not know yet, e.g. `audio`.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerKind {
    Various,
    Images,
    #[serde(other)]
    Unknown,
}
