use std::fmt;

use thiserror::Error;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// A message received from the chat platform.
///
/// `text` is absent for events that carry no body, such as edits or deletions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub channel_id: String,
    pub text: Option<String>,
}

/// The kind of search term a lookup was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Username,
    Serial,
    AssetTag,
}

impl LookupKind {
    /// The label used for this kind of search term in replies.
    pub fn label(self) -> &'static str {
        match self {
            LookupKind::Username => "username",
            LookupKind::Serial => "serial number",
            LookupKind::AssetTag => "asset tag",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display status of an asset, derived from the inventory's `status_meta`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Deployed,
    Deployable,
    Other(String),
}

impl AssetStatus {
    pub fn from_meta(meta: &str) -> Self {
        match meta {
            "deployed" => AssetStatus::Deployed,
            "deployable" => AssetStatus::Deployable,
            other => AssetStatus::Other(other.to_string()),
        }
    }
}

/// The fields of an asset that end up in a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSummary {
    pub id: u64,
    pub asset_tag: String,
    pub serial: String,
    pub model_name: String,
    pub status: AssetStatus,
    pub assigned_to_name: Option<String>,
    /// Link to the asset's detail page (`<base_url>hardware/<id>`).
    pub link: String,
}

/// A successful inventory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    UserAssets { user_name: String, total: u64, assets: Vec<AssetSummary> },
    BySerial(Vec<AssetSummary>),
    ByTag(AssetSummary),
    NotFound,
}

/// Failures while talking to the inventory API or reading its payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("`{endpoint}` returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("`{endpoint}` timed out")]
    Timeout { endpoint: String },
    #[error("request to `{endpoint}` failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("unexpected response from `{endpoint}`: {detail}")]
    Shape { endpoint: String, detail: String },
}

pub type LookupResult = Result<Lookup, LookupError>;
