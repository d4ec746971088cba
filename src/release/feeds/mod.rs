//! Feed client implementations

pub mod http;

pub use http::HttpFeedClient;
