//! HTTP Transport
//!
//! The dashboard talks to the backend through one narrow seam: send a request,
//! get back a status and a body. The browser front-end implements it over `fetch`,
//! the CLI over reqwest, and the unit tests over an in-memory fake.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{DashboardError, DashboardResult};

#[cfg(feature = "native")]
mod native;
#[cfg(test)]
pub(crate) mod fake;

#[cfg(feature = "native")]
pub use native::ReqwestTransport;

/// HTTP methods used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Encoded request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/json`
    Json(String),
    /// `application/x-www-form-urlencoded`, as a native form submit sends it
    Form(String),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestBody::Json(s) | RequestBody::Form(s) => s,
        }
    }
}

/// A request against a backend endpoint path
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path, e.g. `/api/v1/auth/login`. The transport adds the base URL.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(path)
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn accept_json(self) -> Self {
        self.header("Accept", "application/json")
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> DashboardResult<Self> {
        self.body = Some(RequestBody::Json(serde_json::to_string(body)?));
        Ok(self)
    }

    /// Attach a url-encoded form body
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        let encoded = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.body = Some(RequestBody::Form(encoded));
        self
    }

    /// Look up a header value (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a backend response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Mirrors `Response.ok` in the fetch API
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> DashboardResult<T> {
        serde_json::from_slice(&self.body).map_err(DashboardError::from)
    }

    /// Turn a non-success status into `DashboardError::Http`
    pub fn error_for_status(self) -> DashboardResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(DashboardError::Http {
                status: self.status,
            })
        }
    }
}

/// One request in, one response out
///
/// Futures are not required to be `Send`: the browser's `fetch` futures are not.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse>;
}

#[async_trait(?Send)]
impl<'a, T: Transport + ?Sized> Transport for &'a T {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse> {
        (**self).send(request).await
    }
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse> {
        (**self).send(request).await
    }
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse> {
        (**self).send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_encoding() {
        let req = ApiRequest::post("/api/v1/auth/register")
            .form(&[("username", "ikey"), ("password", "p@ss word&")]);
        assert_eq!(
            req.body,
            Some(RequestBody::Form(
                "username=ikey&password=p%40ss%20word%26".to_string()
            ))
        );
        assert_eq!(
            req.body.unwrap().content_type(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_bearer_header() {
        let req = ApiRequest::post("/api/v1/auth/logout").bearer("abc123");
        assert_eq!(req.header_value("authorization"), Some("Bearer abc123"));
        assert!(req.body.is_none());
    }

    #[test]
    fn test_response_status() {
        assert!(ApiResponse::new(204, Vec::new()).is_success());
        assert!(!ApiResponse::new(401, Vec::new()).is_success());
        let err = ApiResponse::new(500, "boom").error_for_status().unwrap_err();
        assert_eq!(err, DashboardError::Http { status: 500 });
    }
}
