//! Shared types and pure decision logic for the beauty boutique marketplace.
//!
//! Everything here is free of I/O: the backend and any client consume the
//! same validation rules, messages and access decisions.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
