//! In-memory transport for unit tests

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{DashboardError, DashboardResult};

/// Canned responses keyed by endpoint path; records every request it sees
#[derive(Default)]
pub struct FakeTransport {
    routes: RefCell<HashMap<String, VecDeque<DashboardResult<ApiResponse>>>>,
    pub requests: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response for `path`. The last queued response repeats.
    pub fn respond(&self, path: &str, status: u16, body: &str) -> &Self {
        self.routes
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(Ok(ApiResponse::new(status, body.as_bytes().to_vec())));
        self
    }

    /// Queue a network failure for `path`
    pub fn fail(&self, path: &str) -> &Self {
        self.routes
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(Err(DashboardError::Transport("connection refused".to_string())));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse> {
        let path = request.path.clone();
        self.requests.borrow_mut().push(request);

        let mut routes = self.routes.borrow_mut();
        let queue = routes
            .get_mut(&path)
            .ok_or_else(|| DashboardError::Transport(format!("no route for {}", path)))?;
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| Err(DashboardError::Transport("empty".into())))
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(DashboardError::Transport("empty".into())))
        }
    }
}
