//! Pending Connections
//!
//! Polls the services API for incoming connection requests and re-renders the list
//! wholesale each time. A failed poll leaves the previous list on screen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::config::Config;
use crate::error::DashboardResult;
use crate::transport::{ApiRequest, Transport};

/// Header row shown above the connection rows
pub const LIST_HEADER: &str = "Incoming connections";

/// Connection identifier exactly as the backend sent it
///
/// Usually a string or an integer, but any JSON value is kept and displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub serde_json::Value);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// One pending connection request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub id: ConnectionId,
    /// Anything else the backend sends along
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Something that displays the connection list
pub trait ConnectionView {
    /// Replace everything currently shown
    fn replace(&mut self, records: &[ConnectionRecord]);
}

impl ConnectionView for Vec<ConnectionRecord> {
    fn replace(&mut self, records: &[ConnectionRecord]) {
        *self = records.to_vec();
    }
}

/// Fetches pending connections on a fixed cadence
pub struct ConnectionPoller<T> {
    transport: T,
    endpoint: String,
    interval: Duration,
}

impl<T: Transport> ConnectionPoller<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            endpoint: config.api.enumerate.clone(),
            interval: config.polling.connections_interval(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch the current list of pending connections
    pub async fn fetch(&self) -> DashboardResult<Vec<ConnectionRecord>> {
        let request = ApiRequest::get(&self.endpoint).accept_json();
        let response = self.transport.send(request).await?.error_for_status()?;
        response.json()
    }

    /// One poll: replace the view on success, keep it on failure
    ///
    /// Returns whether the view was updated.
    pub async fn poll_once<V: ConnectionView + ?Sized>(&self, view: &mut V) -> bool {
        match self.fetch().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Fetched connections");
                view.replace(&records);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch connections");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::transport::fake::FakeTransport;
    use std::rc::Rc;

    const ENUMERATE: &str = "/api/v1/services/enumerate";

    fn poller() -> (Rc<FakeTransport>, ConnectionPoller<Rc<FakeTransport>>) {
        let transport = Rc::new(FakeTransport::new());
        let poller = ConnectionPoller::new(Rc::clone(&transport), &Config::default());
        (transport, poller)
    }

    #[tokio::test]
    async fn test_fetch_mixed_ids() {
        let (transport, poller) = poller();
        transport.respond(ENUMERATE, 200, r#"[{"id":"peer-a","address":"10.0.0.2"},{"id":7}]"#);

        let records = poller.fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.to_string(), "peer-a");
        assert_eq!(records[0].extra["address"], "10.0.0.2");
        assert_eq!(records[1].id, ConnectionId(serde_json::json!(7)));

        let request = transport.last_request().unwrap();
        assert_eq!(request.header_value("Accept"), Some("application/json"));
        assert_eq!(poller.interval(), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_fetch_any_id_shape() {
        let (transport, poller) = poller();
        transport.respond(
            ENUMERATE,
            200,
            r#"[{"id":"a"},{"id":1.5},{"id":18446744073709551615},{"id":null},{"id":-3}]"#,
        );

        let mut view: Vec<ConnectionRecord> = Vec::new();
        assert!(poller.poll_once(&mut view).await);
        let ids: Vec<String> = view.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, ["a", "1.5", "18446744073709551615", "null", "-3"]);
    }

    #[tokio::test]
    async fn test_poll_failure_keeps_previous_list() {
        let (transport, poller) = poller();
        transport.respond(ENUMERATE, 200, r#"[{"id":"peer-a"}]"#);
        transport.respond(ENUMERATE, 503, "");

        let mut view: Vec<ConnectionRecord> = Vec::new();
        assert!(poller.poll_once(&mut view).await);
        assert_eq!(view.len(), 1);

        assert!(!poller.poll_once(&mut view).await);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id.to_string(), "peer-a");
    }

    #[tokio::test]
    async fn test_poll_replaces_wholesale() {
        let (transport, poller) = poller();
        transport.respond(ENUMERATE, 200, r#"[{"id":"a"},{"id":"b"}]"#);
        transport.respond(ENUMERATE, 200, r#"[]"#);

        let mut view: Vec<ConnectionRecord> = Vec::new();
        poller.poll_once(&mut view).await;
        assert_eq!(view.len(), 2);
        poller.poll_once(&mut view).await;
        assert!(view.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_surfaces() {
        let (transport, poller) = poller();
        transport.respond(ENUMERATE, 401, "");
        assert_eq!(poller.fetch().await.unwrap_err(), DashboardError::Http { status: 401 });
    }
}
