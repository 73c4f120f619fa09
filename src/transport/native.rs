//! reqwest-backed transport for native builds

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::config::ApiConfig;
use crate::error::{DashboardError, DashboardResult};

/// Transport that sends requests to `base_url` with reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport for the configured backend
    pub fn new(config: &ApiConfig) -> DashboardResult<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| DashboardError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn map_request_error(e: reqwest::Error) -> DashboardError {
    if e.is_timeout() {
        DashboardError::Transport("Request timeout".to_string())
    } else if e.is_connect() {
        DashboardError::Transport(format!("Backend unavailable: {}", e))
    } else {
        DashboardError::Transport(e.to_string())
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!(method = request.method.as_str(), %url, "Sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type())
                .body(body.as_str().to_string());
        }

        let response = builder.send().await.map_err(map_request_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_request_error)?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let mut config = ApiConfig::default();
        config.base_url = "http://localhost:8080/".to_string();
        let transport = ReqwestTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8080");
    }
}
