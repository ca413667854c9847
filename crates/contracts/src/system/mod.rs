pub mod access_gate;
pub mod auth;
pub mod registration;
pub mod users;
