//! Request and response types shared by the handlers and the item stores.

/// Item catalogue model
pub mod item;
/// Login form model
pub mod login;
/// File upload model
pub mod upload;
