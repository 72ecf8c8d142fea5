pub mod api;
pub mod core;
pub mod error;

pub use api::Cobalt;
pub use crate::core::filename::{derive_filename, Delivery};
pub use crate::core::resolver::{first_of, resolve, resolve_with, ApiResponse, MediaHandle, Target};
pub use crate::core::streamer::MediaStream;
pub use error::{Error, HeaderParseError, UnstreamableError};

pub use cobalt_core as models;
pub use cobalt_core::{
    AudioBitrate, AudioFormat, ClientConfig, DownloadMode, ErrorInfo, FilenameStyle,
    LegacyRequest, LegacyResponse, PickerItem, PickerItemKind, PickerKind, PostRequest,
    ProxySettings, Response, ServerInfo, Session, VideoCodec, VideoQuality,
};
pub use tokio_util::sync::CancellationToken;
