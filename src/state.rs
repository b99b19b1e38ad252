//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::services::{credentials::Credentials, item_store::ItemStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, credentials: Credentials) -> Self {
        Self {
            store,
            credentials: Arc::new(credentials),
        }
    }
}
