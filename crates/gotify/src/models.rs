use serde::Deserialize;

/// Upstream listing endpoints consumed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Application,
    Client,
    Message,
}

impl Endpoint {
    /// Path segment appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Application => "application",
            Endpoint::Client => "client",
            Endpoint::Message => "message",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// One record from `/application` or `/client`.
///
/// Only the number of records matters, but each must still be a JSON object.
pub type UpstreamRecord = serde_json::Map<String, serde_json::Value>;

/// One page of `/message`. The messages themselves are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePage {
    pub paging: Paging,
}

/// Paging block of a `/message` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Paging {
    /// Number of messages in this page; 0 when absent
    #[serde(default)]
    pub size: u64,
    /// Cursor for the next page; 0 (or absent) on the last page
    #[serde(default)]
    pub since: u64,
}

impl Paging {
    pub fn is_last(&self) -> bool {
        self.since == 0
    }
}
