use crate::models::claims::Claims;
use actix_web::{web, HttpResponse, Responder};

/// Public health check
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = String, example = json!("Healthy"))
    ),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json("Healthy")
}

/// Return the claims of the presented token
#[utoipa::path(
    get,
    path = "/contents",
    responses(
        (status = 200, description = "Verified token claims", body = Claims),
        (status = 401, description = "Missing, invalid or expired token", body = crate::error::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Secure"
)]
pub async fn contents(claims: web::ReqData<Claims>) -> impl Responder {
    HttpResponse::Ok().json(claims.into_inner())
}
