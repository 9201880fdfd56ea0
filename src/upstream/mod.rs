//! Upstream API integration.
//!
//! This module provides the typed client for the Users and Posts APIs and the
//! transport capability it runs on.

pub mod client;
pub mod transport;

#[cfg(test)]
pub mod stub;

pub use client::UpstreamClient;
pub use transport::{HttpTransport, ReqwestTransport, TransportOptions};
