//! User API endpoints

use api_types::user::{RegisterUser, UserView};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

fn view(user: &engine::User) -> UserView {
    UserView {
        username: user.username.clone(),
        email_address: user.email_address.clone(),
        budget: user.pretty_budget(),
    }
}

/// Handle requests for creating a new account
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterUser>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .register_user(&payload.username, &payload.email_address, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(view(&user))))
}

/// Handle requests for the current user's profile
pub async fn get(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<UserView>, ServerError> {
    let user = state.engine.user(&user.username).await?;

    Ok(Json(view(&user)))
}
