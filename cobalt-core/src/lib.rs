pub mod models;

pub use models::legacy::LegacyResponse;
pub use models::options::{
    AudioBitrate, AudioFormat, DownloadMode, FilenameStyle, PickerItemKind, PickerKind,
    VideoCodec, VideoQuality,
};
pub use models::request::{LegacyRequest, PostRequest};
pub use models::response::{ErrorContext, ErrorInfo, PickerItem, Response};
pub use models::server::{
    GitInfo, InstanceInfo, LegacyServerInfo, ServerInfo, Session, SessionResponse,
};
pub use models::settings::{ClientConfig, ProxySettings};
