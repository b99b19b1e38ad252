//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, form, URL params, etc.)
//! 2. Converts extractor rejections into `AppError`
//! 3. Calls the item store or credential check
//! 4. Returns HTTP response (JSON, status code)

/// Service health endpoint
pub mod health;
/// Item endpoints, one per HTTP method
pub mod items;
/// Form login endpoint
pub mod login;
/// File upload endpoint
pub mod uploads;
