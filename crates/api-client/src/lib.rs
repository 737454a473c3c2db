//! HTTP client for the bug report backend.
//!
//! A thin wrapper around `reqwest` that enforces the `{success, data, error}`
//! response envelope, injects the fixed `Content-Type`/`X-API-Key` headers,
//! and unwraps every failure into a single error type. Four typed operations
//! cover the public bug-report endpoints; all of them route through the same
//! request primitive.

mod client;
mod options;

pub use client::{Client, ClientConfig, DEFAULT_REQUEST_TIMEOUT, Error};
pub use options::ListReportsOptions;
