pub mod content_disposition;
pub mod filename;
pub mod http_client;
pub mod resolver;
pub mod streamer;
