pub mod form;
pub mod locations;
pub mod messages;
pub mod validation;
