pub mod auth;
pub mod error;
pub mod gateway;
pub mod probe;
pub mod transport;
pub mod types;
