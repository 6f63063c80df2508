//! Council backend adapter: HTTP client and SSE stream codec.

pub mod client;
pub mod sse;

pub use client::HttpCouncilGateway;
