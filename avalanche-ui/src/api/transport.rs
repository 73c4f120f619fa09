//! gloo-net Transport
//!
//! Sends dashboard requests with `fetch`, cookies included.

use async_trait::async_trait;
use avalanche::{ApiConfig, ApiRequest, ApiResponse, DashboardError, DashboardResult, Method, Transport};
use gloo_net::http::Request;
use web_sys::RequestCredentials;

/// Transport over the browser's `fetch`
#[derive(Clone)]
pub struct GlooTransport {
    api: ApiConfig,
}

impl GlooTransport {
    pub fn new(api: ApiConfig) -> Self {
        Self { api }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse> {
        let url = self.api.url(&request.path);

        let mut builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        }
        .credentials(RequestCredentials::Include);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match &request.body {
            Some(body) => builder
                .header("Content-Type", body.content_type())
                .body(body.as_str().to_string()),
            None => builder.build(),
        }
        .map_err(|e| DashboardError::Transport(format!("Request build error: {}", e)))?;

        let response = built
            .send()
            .await
            .map_err(|e| DashboardError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| DashboardError::Transport(e.to_string()))?;

        Ok(ApiResponse::new(status, body))
    }
}
