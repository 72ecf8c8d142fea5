pub mod legacy;
pub mod options;
pub mod request;
pub mod response;
pub mod server;
pub mod settings;

pub(crate) fn status_tag(value: &serde_json::Value) -> Option<String> {
    value.get("status")?.as_str().map(str::to_string)
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
