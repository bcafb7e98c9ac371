//! Notary transports

pub mod http;

pub use http::HttpMessenger;
