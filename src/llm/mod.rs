//! Outbound language-model capability: wire types and the HTTP client.

pub mod client;
pub mod types;
