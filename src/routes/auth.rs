use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::AppResult, models::UserLogin, routes::AppState, services::auth};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Handler for exchanging credentials for an access token
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<UserLogin>,
) -> AppResult<Json<LoginResponse>> {
    let access_token = auth::login(state.users.as_ref(), &state.tokens, credentials).await?;
    Ok(Json(LoginResponse { access_token }))
}
