//! Application State

pub mod global;
