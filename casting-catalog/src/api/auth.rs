//! Admin secret middleware
//!
//! The admin page keeps the shared secret in browser storage and sends it
//! as `X-Admin-Secret`. This service only requires that one is present;
//! the sheets endpoint decides whether it is correct when a save reaches it.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Header carrying the admin secret
pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Secret taken from the request, available to admin handlers as an extension
#[derive(Debug, Clone)]
pub struct AdminSecret(pub String);

/// Reject admin requests that carry no secret
///
/// On success the secret is stored in the request extensions so handlers
/// can forward it to the endpoint.
pub async fn admin_secret_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let value = request
        .headers()
        .get(ADMIN_SECRET_HEADER)
        .ok_or(AuthError::MissingSecret)?;

    // Browsers send header values as Latin-1
    let secret: String = value.as_bytes().iter().map(|&b| char::from(b)).collect();
    let secret = secret.trim().to_string();

    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    request.extensions_mut().insert(AdminSecret(secret));
    Ok(next.run(request).await)
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    MissingSecret,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingSecret => "Admin secret required",
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
