//! # Avalanche
//!
//! Client side of the Avalanche web dashboard: account actions, the pending
//! connection list and live system metrics charts.
//!
//! ## Features
//!
//! - **Form validation**: browser-style constraint checks with inline feedback
//! - **Accounts**: login, registration and logout with a stored session token
//! - **Connections**: polled list of incoming connection requests
//! - **Charts**: memory, CPU and disk charts fed from the stats API
//!
//! ## Modules
//!
//! - [`validation`]: Field constraints and form checks
//! - [`auth`]: Auth API client and account button
//! - [`connections`]: Pending connection poller
//! - [`charts`]: Chart descriptors, options and controller
//! - [`transport`]: HTTP seam shared by the browser and native builds
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use avalanche::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let transport = ReqwestTransport::new(&config.api)?;
//!     let store = FileStorage::new(&config.session.file);
//!     let auth = AuthClient::new(&transport, store, &config);
//!
//!     let form = LoginForm::new("alice", "secret1");
//!     auth.login(&form, &NoControl).await?;
//!
//!     let poller = ConnectionPoller::new(&transport, &config);
//!     for record in poller.fetch().await? {
//!         println!("{}", record.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod charts;
pub mod config;
pub mod connections;
pub mod error;
#[cfg(feature = "native")]
pub mod scheduler;
pub mod session;
pub mod transport;
pub mod validation;

// Re-export top-level types for convenience
pub use auth::{AccountAction, AccountButton, AuthClient, Navigation, NoControl, SubmitControl};

pub use charts::{
    AttachedChart, ChartController, ChartDescriptor, ChartElement, ChartForm, ChartOptions,
    ChartPhase, ChartSeries, ChartSurface, ChartUpdate, DataSource, LabelContext, LabelFormat,
    MetricsPayload,
};

pub use config::{
    generate_default_config, ApiConfig, ChartsConfig, Config, ConfigError, LoggingConfig,
    NavigationConfig, PollingConfig, SessionConfig,
};

pub use connections::{ConnectionId, ConnectionPoller, ConnectionRecord, ConnectionView};

pub use error::{DashboardError, DashboardResult};

pub use session::{FileStorage, MemoryStorage, Session, SessionState, SessionStore};

pub use transport::{ApiRequest, ApiResponse, Method, RequestBody, Transport};

#[cfg(feature = "native")]
pub use transport::ReqwestTransport;

pub use validation::{
    input_feedback, password_feedback, BuilderForm, FieldConstraints, FieldFeedback, FieldKind,
    FieldValidity, LoginForm, RegisterForm, Validity,
};
