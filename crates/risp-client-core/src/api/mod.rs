//! The backend RPC contract as a trait.
//!
//! [`RispApi`] mirrors the fixed set of calls the backend exposes. Each
//! method returns the raw response on transport success; an application
//! error embedded in that response is still the caller's to check, via
//! [`ApiResponse::into_result`](crate::models::ApiResponse::into_result).
//!
//! Implementations must be `Send + Sync` so screens can share one client
//! across concurrent loads.
//!
//! | Call | Request | Response |
//! |------|---------|----------|
//! | [`get_contexts`](RispApi::get_contexts) | none | [`GetContextsResponse`] |
//! | [`create_context`](RispApi::create_context) | name | [`CreateContextResponse`] |
//! | [`export_contexts`](RispApi::export_contexts) | ids, output path | [`ExportContextsResponse`] |
//! | [`get_sources`](RispApi::get_sources) | none | [`GetSourcesResponse`] |
//! | [`index_uri`](RispApi::index_uri) | uri | [`IndexUriResponse`] |
//! | [`get_resources`](RispApi::get_resources) | none | [`GetResourcesResponse`] |
//! | [`query`](RispApi::query) | expression | [`QueryResponse`] |
//! | [`execute`](RispApi::execute) | command | [`ExecuteResponse`] |
//! | [`open_uri`](RispApi::open_uri) | uri | `()` |

pub mod memory;

use async_trait::async_trait;

use crate::models::{
    CreateContextResponse, ErrorCode, ExecuteResponse, ExportContextsResponse,
    GetContextsResponse, GetResourcesResponse, GetSourcesResponse, IndexUriResponse,
    ProtocolError, QueryResponse,
};

/// Failure of one RPC call.
///
/// Transport failures and application errors are kept apart here but are
/// handled the same way downstream: both surface to the user, neither is
/// retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    /// The call itself failed (connection, HTTP status, undecodable body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The call resolved but the response carried a non-zero error code.
    #[error("backend error ({code:?}): {message}")]
    Application { code: ErrorCode, message: String },
}

impl RpcError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        RpcError::Transport(err.to_string())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RpcError::Transport(_))
    }
}

impl From<ProtocolError> for RpcError {
    fn from(err: ProtocolError) -> Self {
        RpcError::Application {
            code: ErrorCode::from(err.code),
            message: err.message.unwrap_or_default(),
        }
    }
}

/// Typed stubs for the backend contract.
#[async_trait]
pub trait RispApi: Send + Sync {
    async fn get_contexts(&self) -> Result<GetContextsResponse, RpcError>;

    async fn create_context(&self, name: &str) -> Result<CreateContextResponse, RpcError>;

    /// Exports the given contexts to `output_path` on the backend host.
    async fn export_contexts(
        &self,
        ids: &[String],
        output_path: &str,
    ) -> Result<ExportContextsResponse, RpcError>;

    async fn get_sources(&self) -> Result<GetSourcesResponse, RpcError>;

    async fn index_uri(&self, uri: &str) -> Result<IndexUriResponse, RpcError>;

    async fn get_resources(&self) -> Result<GetResourcesResponse, RpcError>;

    async fn query(&self, expression: &str) -> Result<QueryResponse, RpcError>;

    /// Runs a raw backend command (REPL input that is not a query).
    async fn execute(&self, command: &str) -> Result<ExecuteResponse, RpcError>;

    /// Opens a URI with the platform handler. Empty on success.
    async fn open_uri(&self, uri: &str) -> Result<(), RpcError>;
}
