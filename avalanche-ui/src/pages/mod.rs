//! Pages

pub mod builders;
pub mod dashboard;
pub mod login;
pub mod register;

pub use builders::Builders;
pub use dashboard::Dashboard;
pub use login::Login;
pub use register::Register;
