use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /auth`. Fields default to empty so a missing parameter can be
/// reported by name instead of as a generic JSON error.
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
