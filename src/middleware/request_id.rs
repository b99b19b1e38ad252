//! Request id middleware.
//!
//! Every request gets an `X-Request-Id`:
//! 1. A non-empty id sent by the client is kept as is
//! 2. Otherwise a random UUID v4 is generated and added to the request headers
//! 3. The id is inserted into the request extensions as `RequestId`
//! 4. The same id is echoed on the response

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Id of the current request, available to handlers via `Extension<RequestId>`.
#[derive(Debug, Clone)]
pub struct RequestId(pub HeaderValue);

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = match request.headers().get(&REQUEST_ID_HEADER) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => {
            let value = HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            request
                .headers_mut()
                .insert(REQUEST_ID_HEADER.clone(), value.clone());
            value
        }
    };

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER.clone(), id);
    response
}
