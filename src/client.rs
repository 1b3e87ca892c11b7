//! HTTP transport for the backend RPC contract.
//!
//! Every call is `POST {base_url}/rpc/{Method}` with a JSON request body and
//! a JSON response body. Context-scoped calls carry the configured
//! `repl.context_id`.
//!
//! | Method | Request body |
//! |--------|--------------|
//! | `GetContexts` | `{}` |
//! | `CreateContext` | `{ "name" }` |
//! | `ExportContexts` | `{ "context_ids", "output_path" }` |
//! | `GetSources` | `{ "context_id" }` |
//! | `IndexURI` | `{ "context_id", "uri" }` |
//! | `GetResources` | `{ "context_id" }` |
//! | `Query` | `{ "value", "context_id" }` |
//! | `Execute` | `{ "command" }` |
//!
//! A non-2xx status, a connection failure, a timeout, or an undecodable body
//! is a [`RpcError::Transport`]. A decoded body with a non-zero `error.code`
//! is returned as-is; callers check it via
//! [`ApiResponse::into_result`](risp_client_core::models::ApiResponse::into_result).
//!
//! `OpenURI` never reaches the backend: it runs the local platform opener.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use risp_client_core::api::{RispApi, RpcError};
use risp_client_core::models::*;

use crate::config::Config;
use crate::open;

pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    context_id: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration, context_id: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            context_id: context_id.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.backend.base_url,
            Duration::from_secs(config.backend.timeout_secs),
            &config.repl.context_id,
        )
    }

    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/rpc/{}", self.base_url, method)
    }

    async fn call<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, RpcError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned + ApiResponse,
    {
        let url = self.endpoint(method);
        tracing::debug!(method, %url, "rpc call");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(method, error = %e, "rpc transport failure");
                RpcError::transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(method, %status, "rpc http error");
            return Err(RpcError::Transport(format!("HTTP {}: {}", status, body.trim())));
        }

        let decoded: Resp = response.json().await.map_err(|e| {
            tracing::error!(method, error = %e, "undecodable rpc response");
            RpcError::transport(e)
        })?;

        if let Some(err) = decoded.error().filter(|e| e.is_failure()) {
            tracing::warn!(
                method,
                code = err.code,
                message = err.message.as_deref().unwrap_or(""),
                "backend returned application error"
            );
        }
        Ok(decoded)
    }
}

#[async_trait]
impl RispApi for HttpApi {
    async fn get_contexts(&self) -> Result<GetContextsResponse, RpcError> {
        self.call("GetContexts", &GetContextsRequest {}).await
    }

    async fn create_context(&self, name: &str) -> Result<CreateContextResponse, RpcError> {
        let request = CreateContextRequest {
            name: name.to_string(),
        };
        self.call("CreateContext", &request).await
    }

    async fn export_contexts(
        &self,
        ids: &[String],
        output_path: &str,
    ) -> Result<ExportContextsResponse, RpcError> {
        let request = ExportContextsRequest {
            context_ids: ids.to_vec(),
            output_path: output_path.to_string(),
        };
        self.call("ExportContexts", &request).await
    }

    async fn get_sources(&self) -> Result<GetSourcesResponse, RpcError> {
        let request = GetSourcesRequest {
            context_id: self.context_id.clone(),
        };
        self.call("GetSources", &request).await
    }

    async fn index_uri(&self, uri: &str) -> Result<IndexUriResponse, RpcError> {
        let request = IndexUriRequest {
            context_id: self.context_id.clone(),
            uri: uri.to_string(),
        };
        self.call("IndexURI", &request).await
    }

    async fn get_resources(&self) -> Result<GetResourcesResponse, RpcError> {
        let request = GetResourcesRequest {
            context_id: self.context_id.clone(),
        };
        self.call("GetResources", &request).await
    }

    async fn query(&self, expression: &str) -> Result<QueryResponse, RpcError> {
        let request = QueryRequest {
            value: expression.to_string(),
            context_id: self.context_id.clone(),
        };
        self.call("Query", &request).await
    }

    async fn execute(&self, command: &str) -> Result<ExecuteResponse, RpcError> {
        let request = ExecuteRequest {
            command: command.to_string(),
        };
        self.call("Execute", &request).await
    }

    async fn open_uri(&self, uri: &str) -> Result<(), RpcError> {
        open::open_uri(uri).await.map_err(RpcError::transport)
    }
}
