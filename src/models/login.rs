//! Login form types.

use serde::{Deserialize, Serialize};

/// URL-encoded body of `POST /login/`. Both fields are required.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Body returned for accepted credentials: `{"status": "success"}`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
}

impl LoginResponse {
    pub fn success() -> Self {
        Self { status: "success" }
    }
}
