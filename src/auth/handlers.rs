use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RegisterRequest, SuccessResponse},
        services::AuthService,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(service, payload))]
pub async fn register(
    State(service): State<AuthService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SuccessResponse<()>>), ApiError> {
    let Json(mut payload) = payload?;
    payload.normalize();
    payload.validate().map_err(ApiError::Validation)?;

    service.register(&payload.email, &payload.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new("Registration success", None)),
    ))
}

#[instrument(skip(service, payload))]
pub async fn login(
    State(service): State<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<LoginResponse>>, ApiError> {
    let Json(mut payload) = payload?;
    payload.normalize();
    payload.validate().map_err(ApiError::Validation)?;

    let tokens = service.login(&payload.email, &payload.password).await?;

    Ok(Json(SuccessResponse::new(
        "Login success",
        Some(LoginResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }),
    )))
}
