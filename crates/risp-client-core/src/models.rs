//! Wire types for the Risp backend RPC contract.
//!
//! Every field is optional on the wire: the backend omits zero values, so
//! all structs deserialize with `#[serde(default)]`. Type discriminants are
//! small integers where "unset" is a meaningful default (the first variant),
//! not a missing value.

use serde::{Deserialize, Serialize};

use crate::api::RpcError;

// ═══════════════════════════════════════════════════════════════════════
// Discriminants
// ═══════════════════════════════════════════════════════════════════════

/// Kind of an indexed resource.
///
/// An unset or zero `type` is [`ResourceType::FsFile`]. Integers the client
/// does not know are kept as [`ResourceType::Unknown`] so they survive a
/// round trip, and are composed like files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i32>", into = "i32")]
pub enum ResourceType {
    #[default]
    FsFile,
    WebPage,
    Unknown(i32),
}

impl From<Option<i32>> for ResourceType {
    fn from(value: Option<i32>) -> Self {
        match value {
            None | Some(0) => ResourceType::FsFile,
            Some(1) => ResourceType::WebPage,
            Some(n) => ResourceType::Unknown(n),
        }
    }
}

impl From<ResourceType> for i32 {
    fn from(value: ResourceType) -> Self {
        match value {
            ResourceType::FsFile => 0,
            ResourceType::WebPage => 1,
            ResourceType::Unknown(n) => n,
        }
    }
}

impl ResourceType {
    /// Human label for list columns.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::FsFile => "File",
            ResourceType::WebPage => "Web page",
            ResourceType::Unknown(_) => "-",
        }
    }
}

/// Adapter that produced a source. Unset or zero is [`AdapterType::Fs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i32>", into = "i32")]
pub enum AdapterType {
    #[default]
    Fs,
    Web,
    Unknown(i32),
}

impl From<Option<i32>> for AdapterType {
    fn from(value: Option<i32>) -> Self {
        match value {
            None | Some(0) => AdapterType::Fs,
            Some(1) => AdapterType::Web,
            Some(n) => AdapterType::Unknown(n),
        }
    }
}

impl From<AdapterType> for i32 {
    fn from(value: AdapterType) -> Self {
        match value {
            AdapterType::Fs => 0,
            AdapterType::Web => 1,
            AdapterType::Unknown(n) => n,
        }
    }
}

impl AdapterType {
    pub fn label(&self) -> &'static str {
        match self {
            AdapterType::Fs => "FS",
            AdapterType::Web => "Web",
            AdapterType::Unknown(_) => "-",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════

/// Application error codes reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    AllGood,
    Unknown,
    InvalidCommand,
    InvalidQuery,
    InvalidSourceUri,
    InvalidContext,
    InvalidSource,
    InvalidResource,
    Other(i64),
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            0 => ErrorCode::AllGood,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::InvalidCommand,
            3 => ErrorCode::InvalidQuery,
            4 => ErrorCode::InvalidSourceUri,
            5 => ErrorCode::InvalidContext,
            6 => ErrorCode::InvalidSource,
            7 => ErrorCode::InvalidResource,
            n => ErrorCode::Other(n),
        }
    }
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::AllGood => 0,
            ErrorCode::Unknown => 1,
            ErrorCode::InvalidCommand => 2,
            ErrorCode::InvalidQuery => 3,
            ErrorCode::InvalidSourceUri => 4,
            ErrorCode::InvalidContext => 5,
            ErrorCode::InvalidSource => 6,
            ErrorCode::InvalidResource => 7,
            ErrorCode::Other(n) => n,
        }
    }
}

/// The `error` member embedded in every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolError {
    pub code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProtocolError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: Some(message.into()),
        }
    }

    /// A populated, non-zero code is an application failure.
    pub fn is_failure(&self) -> bool {
        self.code != 0
    }
}

/// Responses that carry an optional application [`ProtocolError`].
pub trait ApiResponse: Sized {
    fn error(&self) -> Option<&ProtocolError>;

    /// Converts an embedded application error into [`RpcError::Application`].
    ///
    /// Transport success does not imply success: callers go through this
    /// before trusting any other field.
    fn into_result(self) -> Result<Self, RpcError> {
        match self.error() {
            Some(err) if err.is_failure() => Err(RpcError::from(err.clone())),
            _ => Ok(self),
        }
    }
}

macro_rules! api_response {
    ($($ty:ty),+ $(,)?) => {
        $(impl ApiResponse for $ty {
            fn error(&self) -> Option<&ProtocolError> {
                self.error.as_ref()
            }
        })+
    };
}

// ═══════════════════════════════════════════════════════════════════════
// Entities
// ═══════════════════════════════════════════════════════════════════════

/// A named isolated workspace grouping sources and resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

/// An indexed origin: a filesystem path or a web URI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub context_id: String,
    pub id: String,
    pub urn: String,
    pub canonical_uri: String,
    pub adapter_type: AdapterType,
}

/// One indexed item produced from a source.
///
/// `source_urn` and `source_canonical_uri` point back at the owning source
/// for lookup only. `data_json` is an opaque, type-dependent payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub context_id: String,
    pub source_urn: String,
    pub source_canonical_uri: String,
    pub id: String,
    pub urn: String,
    pub canonical_uri: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub data_json: String,
}

/// A `"<entity-kind>.<field>"` tagged list of pre-rendered markup fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightFragment {
    pub key: String,
    pub values: Vec<String>,
}

impl HighlightFragment {
    pub fn new(key: impl Into<String>, values: &[&str]) -> Self {
        Self {
            key: key.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// One scored match. The score only orders hits within one response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryHit {
    pub score: f64,
    pub resource: Resource,
    pub highlights: Vec<HighlightFragment>,
}

/// Stable identity and display text for rows that can be selected.
pub trait Entity {
    /// Noun used in summaries for one item, e.g. `"context"`.
    const SINGULAR: &'static str;
    /// Noun used in summaries for zero or many items.
    const PLURAL: &'static str;

    fn id(&self) -> &str;

    /// The canonical display field shown when exactly one item is selected.
    fn display_field(&self) -> &str;
}

impl Entity for Context {
    const SINGULAR: &'static str = "context";
    const PLURAL: &'static str = "contexts";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_field(&self) -> &str {
        &self.name
    }
}

impl Entity for Source {
    const SINGULAR: &'static str = "source";
    const PLURAL: &'static str = "sources";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_field(&self) -> &str {
        &self.canonical_uri
    }
}

impl Entity for Resource {
    const SINGULAR: &'static str = "resource";
    const PLURAL: &'static str = "resources";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_field(&self) -> &str {
        &self.canonical_uri
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Requests
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetContextsRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateContextRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportContextsRequest {
    pub context_ids: Vec<String>,
    pub output_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetSourcesRequest {
    pub context_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexUriRequest {
    pub context_id: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetResourcesRequest {
    pub context_id: String,
}

/// Full-text query. The expression travels as `value`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub value: String,
    pub context_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteRequest {
    pub command: String,
}

// ═══════════════════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetContextsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
    pub contexts_total: i64,
    pub contexts: Vec<Context>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateContextResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportContextsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetSourcesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
    pub sources_total: i64,
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexUriResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetResourcesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
    pub resources_total: i64,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
    pub max_score: f64,
    pub edges_total: i64,
    pub edges: Vec<QueryHit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
}

api_response!(
    GetContextsResponse,
    CreateContextResponse,
    ExportContextsResponse,
    GetSourcesResponse,
    IndexUriResponse,
    GetResourcesResponse,
    QueryResponse,
    ExecuteResponse,
);
