use crate::error::{AppError, AuthError};
use crate::models::credentials::{LoginRequest, TokenResponse};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use tracing::{error, info, warn};

/// Exchange an email/password pair for a bearer token
#[utoipa::path(
    post,
    path = "/auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing email or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
        (status = 429, description = "Too many attempts from this address")
    ),
    tag = "Authentication"
)]
pub async fn auth(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, password } = payload.into_inner();

    if email.is_empty() {
        warn!("Auth request without email");
        return Err(AppError::BadRequest("Missing parameter: email".to_string()));
    }
    if password.is_empty() {
        warn!(email = %email, "Auth request without password");
        return Err(AppError::BadRequest("Missing parameter: password".to_string()));
    }

    info!(email = %email, "Login attempt");

    // Argon2 verification is CPU bound; keep it off the worker thread.
    let checker = state.credentials.clone();
    let candidate = email.clone();
    let valid = web::block(move || checker.check(&candidate, &password))
        .await
        .map_err(|e| {
            error!(error = %e, "Credential check did not complete");
            AppError::Internal
        })?;

    if !valid {
        warn!(email = %email, "Login failed: invalid credentials");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.issuer.issue(&email, chrono::Utc::now())?;

    info!(email = %email, "Token issued");

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
