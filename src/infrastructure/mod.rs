//! Infrastructure - cold path only
//!
//! This module contains non-latency-critical code:
//! - Logging and configuration
//! - Network retry policy
//! - Status endpoint and its bounded buffer

pub mod api;
pub mod config;
pub mod logging;
pub mod retry;
pub mod ring_buffer;

pub use api::{StatusRecord, StatusService};
pub use retry::RetryPolicy;
pub use ring_buffer::RingBuffer;
