//! Form login handler.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};

use crate::{
    error::AppError,
    models::login::{LoginForm, LoginResponse},
    state::AppState,
};

/// Check submitted credentials.
///
/// # Endpoint
///
/// `POST /login/` with an `application/x-www-form-urlencoded` body:
///
/// ```text
/// username=admin&password=secret
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"status": "success"}`
/// - **Error (401)**: plain-text `Invalid credentials`
/// - **Error (422)**: a field is missing or the body is not a form
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Form(form) = form?;

    if state.credentials.verify(&form.username, &form.password) {
        tracing::info!(username = %form.username, "login succeeded");
        Ok(Json(LoginResponse::success()))
    } else {
        tracing::warn!(username = %form.username, "login rejected");
        Err(AppError::InvalidCredentials)
    }
}
