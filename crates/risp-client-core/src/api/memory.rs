//! In-memory [`RispApi`] implementation for tests and demos.
//!
//! Holds contexts, sources, and resources behind `std::sync::RwLock`.
//! Queries are answered from canned responses registered per expression;
//! there is no ranking or tokenization. Every call is counted so tests can
//! assert that validation short-circuited the RPC boundary.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::models::{
    AdapterType, Context, CreateContextResponse, ErrorCode, ExecuteResponse,
    ExportContextsResponse, GetContextsResponse, GetResourcesResponse, GetSourcesResponse,
    IndexUriResponse, ProtocolError, QueryResponse, Resource, Source,
};

use super::{RispApi, RpcError};

/// A recorded `ExportContexts` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub ids: Vec<String>,
    pub output_path: String,
}

/// In-memory backend.
pub struct InMemoryApi {
    contexts: RwLock<Vec<Context>>,
    sources: RwLock<Vec<Source>>,
    resources: RwLock<Vec<Resource>>,
    queries: RwLock<HashMap<String, QueryResponse>>,
    exports: RwLock<Vec<ExportRecord>>,
    commands: RwLock<Vec<String>>,
    opened: RwLock<Vec<String>>,
    fail_next: RwLock<Option<ProtocolError>>,
    calls: AtomicUsize,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self {
            contexts: RwLock::new(Vec::new()),
            sources: RwLock::new(Vec::new()),
            resources: RwLock::new(Vec::new()),
            queries: RwLock::new(HashMap::new()),
            exports: RwLock::new(Vec::new()),
            commands: RwLock::new(Vec::new()),
            opened: RwLock::new(Vec::new()),
            fail_next: RwLock::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_contexts(self, contexts: Vec<Context>) -> Self {
        *self.contexts.write().unwrap() = contexts;
        self
    }

    pub fn with_sources(self, sources: Vec<Source>) -> Self {
        *self.sources.write().unwrap() = sources;
        self
    }

    pub fn with_resources(self, resources: Vec<Resource>) -> Self {
        *self.resources.write().unwrap() = resources;
        self
    }

    /// Registers the response returned for an exact query expression.
    pub fn with_query_response(self, expression: &str, response: QueryResponse) -> Self {
        self.queries
            .write()
            .unwrap()
            .insert(expression.to_string(), response);
        self
    }

    /// Makes the next call (of any kind) resolve with this application error.
    pub fn fail_next(&self, error: ProtocolError) {
        *self.fail_next.write().unwrap() = Some(error);
    }

    /// Total number of RPC calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn exports(&self) -> Vec<ExportRecord> {
        self.exports.read().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.read().unwrap().clone()
    }

    fn begin_call(&self) -> Option<ProtocolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fail_next.write().unwrap().take()
    }
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

fn adapter_for_uri(uri: &str) -> AdapterType {
    let lower = uri.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        AdapterType::Web
    } else {
        AdapterType::Fs
    }
}

#[async_trait]
impl RispApi for InMemoryApi {
    async fn get_contexts(&self) -> Result<GetContextsResponse, RpcError> {
        if let Some(error) = self.begin_call() {
            return Ok(GetContextsResponse {
                error: Some(error),
                ..Default::default()
            });
        }
        let contexts = self.contexts.read().unwrap().clone();
        Ok(GetContextsResponse {
            error: None,
            contexts_total: contexts.len() as i64,
            contexts,
        })
    }

    async fn create_context(&self, name: &str) -> Result<CreateContextResponse, RpcError> {
        if let Some(error) = self.begin_call() {
            return Ok(CreateContextResponse {
                error: Some(error),
                context: None,
            });
        }
        let mut contexts = self.contexts.write().unwrap();
        if contexts.iter().any(|c| c.name == name) {
            return Ok(CreateContextResponse {
                error: Some(ProtocolError::new(
                    ErrorCode::InvalidContext,
                    format!("context already exists: {}", name),
                )),
                context: None,
            });
        }
        let context = Context {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            is_default: contexts.is_empty(),
        };
        contexts.push(context.clone());
        Ok(CreateContextResponse {
            error: None,
            context: Some(context),
        })
    }

    async fn export_contexts(
        &self,
        ids: &[String],
        output_path: &str,
    ) -> Result<ExportContextsResponse, RpcError> {
        if let Some(error) = self.begin_call() {
            return Ok(ExportContextsResponse { error: Some(error) });
        }
        let contexts = self.contexts.read().unwrap();
        if let Some(missing) = ids.iter().find(|id| !contexts.iter().any(|c| &c.id == *id)) {
            return Ok(ExportContextsResponse {
                error: Some(ProtocolError::new(
                    ErrorCode::InvalidContext,
                    format!("context not found: {}", missing),
                )),
            });
        }
        self.exports.write().unwrap().push(ExportRecord {
            ids: ids.to_vec(),
            output_path: output_path.to_string(),
        });
        Ok(ExportContextsResponse { error: None })
    }

    async fn get_sources(&self) -> Result<GetSourcesResponse, RpcError> {
        if let Some(error) = self.begin_call() {
            return Ok(GetSourcesResponse {
                error: Some(error),
                ..Default::default()
            });
        }
        let sources = self.sources.read().unwrap().clone();
        Ok(GetSourcesResponse {
            error: None,
            sources_total: sources.len() as i64,
            sources,
        })
    }

    async fn index_uri(&self, uri: &str) -> Result<IndexUriResponse, RpcError> {
        if let Some(error) = self.begin_call() {
            return Ok(IndexUriResponse {
                error: Some(error),
                source: None,
            });
        }
        let id = uuid::Uuid::new_v4().to_string();
        let source = Source {
            context_id: String::new(),
            urn: format!("urn:risp:source:{}", id),
            id,
            canonical_uri: uri.to_string(),
            adapter_type: adapter_for_uri(uri),
        };
        self.sources.write().unwrap().push(source.clone());
        Ok(IndexUriResponse {
            error: None,
            source: Some(source),
        })
    }

    async fn get_resources(&self) -> Result<GetResourcesResponse, RpcError> {
        if let Some(error) = self.begin_call() {
            return Ok(GetResourcesResponse {
                error: Some(error),
                ..Default::default()
            });
        }
        let resources = self.resources.read().unwrap().clone();
        Ok(GetResourcesResponse {
            error: None,
            resources_total: resources.len() as i64,
            resources,
        })
    }

    async fn query(&self, expression: &str) -> Result<QueryResponse, RpcError> {
        if let Some(error) = self.begin_call() {
            return Ok(QueryResponse {
                error: Some(error),
                ..Default::default()
            });
        }
        Ok(self
            .queries
            .read()
            .unwrap()
            .get(expression)
            .cloned()
            .unwrap_or_default())
    }

    async fn execute(&self, command: &str) -> Result<ExecuteResponse, RpcError> {
        if let Some(error) = self.begin_call() {
            return Ok(ExecuteResponse { error: Some(error) });
        }
        if command.trim().is_empty() {
            return Ok(ExecuteResponse {
                error: Some(ProtocolError::new(ErrorCode::InvalidCommand, "empty command")),
            });
        }
        self.commands.write().unwrap().push(command.to_string());
        Ok(ExecuteResponse { error: None })
    }

    async fn open_uri(&self, uri: &str) -> Result<(), RpcError> {
        if let Some(error) = self.begin_call() {
            return Err(RpcError::from(error));
        }
        self.opened.write().unwrap().push(uri.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiResponse;

    #[tokio::test]
    async fn create_then_list_contexts() {
        let api = InMemoryApi::new();
        let created = api.create_context("work").await.unwrap().into_result().unwrap();
        let ctx = created.context.unwrap();
        assert_eq!(ctx.name, "work");
        assert!(ctx.is_default);

        let listed = api.get_contexts().await.unwrap();
        assert_eq!(listed.contexts_total, 1);
        assert_eq!(listed.contexts[0].id, ctx.id);
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn duplicate_context_is_application_error() {
        let api = InMemoryApi::new();
        api.create_context("work").await.unwrap();
        let err = api
            .create_context("work")
            .await
            .unwrap()
            .into_result()
            .unwrap_err();
        assert!(matches!(
            err,
            RpcError::Application {
                code: ErrorCode::InvalidContext,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn index_uri_picks_adapter_from_scheme() {
        let api = InMemoryApi::new();
        let web = api.index_uri("https://example.com").await.unwrap().source.unwrap();
        let fs = api.index_uri("file:///home/docs").await.unwrap().source.unwrap();
        assert_eq!(web.adapter_type, AdapterType::Web);
        assert_eq!(fs.adapter_type, AdapterType::Fs);
        assert_eq!(api.get_sources().await.unwrap().sources_total, 2);
    }

    #[tokio::test]
    async fn fail_next_applies_once() {
        let api = InMemoryApi::new();
        api.fail_next(ProtocolError::new(ErrorCode::Unknown, "boom"));
        assert!(api.get_sources().await.unwrap().into_result().is_err());
        assert!(api.get_sources().await.unwrap().into_result().is_ok());
    }

    #[tokio::test]
    async fn unknown_query_is_empty() {
        let api = InMemoryApi::new();
        let resp = api.query("nothing").await.unwrap();
        assert_eq!(resp.edges_total, 0);
        assert!(resp.edges.is_empty());
    }
}
