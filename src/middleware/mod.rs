//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.

/// Request id propagation
pub mod request_id;
