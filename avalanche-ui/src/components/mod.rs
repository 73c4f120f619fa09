//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod connection_list;
pub mod field;
pub mod metrics_chart;
pub mod nav;
pub mod toast;

pub use connection_list::ConnectionList;
pub use field::ValidatedInput;
pub use metrics_chart::MetricsChart;
pub use nav::Nav;
pub use toast::Toast;
