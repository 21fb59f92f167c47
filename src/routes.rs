use actix_web::{error::JsonPayloadError, web, HttpRequest};
use tracing::warn;

use crate::docs;
use crate::error::AppError;
use crate::handlers;
use crate::middleware::auth::AuthMiddleware;
use crate::middleware::rate_limit::RateLimitMiddleware;

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), error = %err, "Rejected malformed JSON body");
    AppError::BadRequest("Malformed JSON body".to_string()).into()
}

/// Register every route. `AppState` must be added as `web::Data` by the caller.
pub fn configure(cfg: &mut web::ServiceConfig, auth_rate_limit: RateLimitMiddleware) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        // Public routes
        .route("/", web::get().to(handlers::api::health))
        .route("/api-docs/openapi.json", web::get().to(docs::openapi_json))
        .service(
            web::resource("/auth")
                .wrap(auth_rate_limit)
                .route(web::post().to(handlers::auth::auth)),
        )
        // Protected routes
        .service(
            web::resource("/contents")
                .wrap(AuthMiddleware)
                .route(web::get().to(handlers::api::contents)),
        );
}
