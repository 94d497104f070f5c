use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        error::AuthError,
        services,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let Json(payload) = payload.map_err(malformed)?;
    payload.validate().inspect_err(|e| warn!(error = %e, "register rejected"))?;

    let user = services::register(
        state.store.as_ref(),
        &state.passwords,
        &payload.username,
        &payload.password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::success("User registered successfully", user)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthError> {
    let Json(payload) = payload.map_err(malformed)?;
    payload.validate().inspect_err(|e| warn!(error = %e, "login rejected"))?;

    let user = services::authenticate(
        state.store.as_ref(),
        &state.passwords,
        &payload.username,
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse::success("Login successful", user)))
}

fn malformed(rejection: JsonRejection) -> AuthError {
    warn!(error = %rejection, "unreadable json body");
    AuthError::MalformedRequest(rejection.body_text())
}
