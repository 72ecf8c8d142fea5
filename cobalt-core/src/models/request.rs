use serde::{Deserialize, Serialize};

use super::options::{
    AudioBitrate, AudioFormat, DownloadMode, FilenameStyle, VideoCodec, VideoQuality,
};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Body of a download request for current API instances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_quality: Option<VideoQuality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<AudioFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_bitrate: Option<AudioBitrate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename_style: Option<FilenameStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_mode: Option<DownloadMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_video_codec: Option<VideoCodec>,
    /// BCP 47 tag such as `en` or `es-US`. Unset keeps the original track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_dub_lang: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub always_proxy: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_metadata: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub tiktok_full_audio: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub tiktok_h265: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub twitter_gif: bool,
    #[serde(default, rename = "youtubeHLS", skip_serializing_if = "is_false")]
    pub youtube_hls: bool,
}

impl PostRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn video_quality(mut self, quality: VideoQuality) -> Self {
        self.video_quality = Some(quality);
        self
    }

    pub fn audio_format(mut self, format: AudioFormat) -> Self {
        self.audio_format = Some(format);
        self
    }

    pub fn audio_bitrate(mut self, bitrate: AudioBitrate) -> Self {
        self.audio_bitrate = Some(bitrate);
        self
    }

    pub fn filename_style(mut self, style: FilenameStyle) -> Self {
        self.filename_style = Some(style);
        self
    }

    pub fn download_mode(mut self, mode: DownloadMode) -> Self {
        self.download_mode = Some(mode);
        self
    }

    pub fn youtube_video_codec(mut self, codec: VideoCodec) -> Self {
        self.youtube_video_codec = Some(codec);
        self
    }

    pub fn youtube_dub_lang(mut self, lang: impl Into<String>) -> Self {
        self.youtube_dub_lang = Some(lang.into());
        self
    }

    pub fn always_proxy(mut self, enabled: bool) -> Self {
        self.always_proxy = enabled;
        self
    }

    pub fn disable_metadata(mut self, enabled: bool) -> Self {
        self.disable_metadata = enabled;
        self
    }

    pub fn tiktok_full_audio(mut self, enabled: bool) -> Self {
        self.tiktok_full_audio = enabled;
        self
    }

    pub fn tiktok_h265(mut self, enabled: bool) -> Self {
        self.tiktok_h265 = enabled;
        self
    }

    pub fn twitter_gif(mut self, enabled: bool) -> Self {
        self.twitter_gif = enabled;
        self
    }

    pub fn youtube_hls(mut self, enabled: bool) -> Self {
        self.youtube_hls = enabled;
        self
    }
}

/// Body of a download request for instances still serving `/api/json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyRequest {
    pub url: String,
    #[serde(rename = "vCodec", default, skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<VideoCodec>,
    #[serde(rename = "vQuality", default, skip_serializing_if = "Option::is_none")]
    pub video_quality: Option<VideoQuality>,
    #[serde(rename = "aFormat", default, skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<AudioFormat>,
    #[serde(rename = "filenamePattern", default, skip_serializing_if = "Option::is_none")]
    pub filename_pattern: Option<FilenameStyle>,
    #[serde(rename = "isAudioOnly", default, skip_serializing_if = "is_false")]
    pub audio_only: bool,
    #[serde(rename = "isTTFullAudio", default, skip_serializing_if = "is_false")]
    pub tiktok_full_audio: bool,
    #[serde(rename = "isAudioMuted", default, skip_serializing_if = "is_false")]
    pub audio_muted: bool,
    #[serde(rename = "dubLang", default, skip_serializing_if = "is_false")]
    pub dub_lang: bool,
    #[serde(rename = "disableMetadata", default, skip_serializing_if = "is_false")]
    pub disable_metadata: bool,
    #[serde(rename = "twitterGif", default, skip_serializing_if = "is_false")]
    pub twitter_gif: bool,
    #[serde(rename = "tiktokH265", default, skip_serializing_if = "is_false")]
    pub tiktok_h265: bool,
}

impl LegacyRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn video_codec(mut self, codec: VideoCodec) -> Self {
        self.video_codec = Some(codec);
        self
    }

    pub fn video_quality(mut self, quality: VideoQuality) -> Self {
        self.video_quality = Some(quality);
        self
    }

    pub fn audio_format(mut self, format: AudioFormat) -> Self {
        self.audio_format = Some(format);
        self
    }

    pub fn filename_pattern(mut self, style: FilenameStyle) -> Self {
        self.filename_pattern = Some(style);
        self
    }

    pub fn audio_only(mut self, enabled: bool) -> Self {
        self.audio_only = enabled;
        self
    }

    pub fn tiktok_full_audio(mut self, enabled: bool) -> Self {
        self.tiktok_full_audio = enabled;
        self
    }

    pub fn audio_muted(mut self, enabled: bool) -> Self {
        self.audio_muted = enabled;
        self
    }

    pub fn dub_lang(mut self, enabled: bool) -> Self {
        self.dub_lang = enabled;
        self
    }

    pub fn disable_metadata(mut self, enabled: bool) -> Self {
        self.disable_metadata = enabled;
        self
    }

    pub fn twitter_gif(mut self, enabled: bool) -> Self {
        self.twitter_gif = enabled;
        self
    }

    pub fn tiktok_h265(mut self, enabled: bool) -> Self {
        self.tiktok_h265 = enabled;
        self
    }
}
