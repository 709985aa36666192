//! Shared utilities.

pub mod http;

pub use http::HttpClient;
