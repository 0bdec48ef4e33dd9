use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{EmailPayload, MessageResponse, UserListResponse, UserPayload},
        password, repo,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/addUser", post(add_user))
        .route("/updateUser/:user_id", put(update_user))
        .route("/updateEmail/:user_id", patch(update_email))
        .route("/delete/:user_id", delete(delete_user))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = repo::list_all(&state.db).await?;
    if users.is_empty() {
        warn!("no users in store");
        return Err(ApiError::NotFound("Users not found".into()));
    }
    Ok(Json(UserListResponse { data: users }))
}

#[instrument(skip(state, payload))]
pub async fn add_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let new_user = payload.validated().map_err(|errors| {
        warn!(?errors, "addUser payload rejected");
        ApiError::from(errors)
    })?;

    let hash = password::hash_password(&new_user.password)?;
    let user = repo::create(&state.db, &new_user.email, &hash).await?;

    info!(user_id = user.id, email = %user.email, "user created");
    Ok(Json(MessageResponse {
        message: "put record success",
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let new_user = payload.validated().map_err(|errors| {
        warn!(user_id, ?errors, "updateUser payload rejected");
        ApiError::from(errors)
    })?;

    // Check-then-update is two round-trips, not a transaction; a
    // concurrent delete of the same id can interleave.
    if repo::find_by_id(&state.db, user_id).await?.is_none() {
        warn!(user_id, "updateUser: id not found");
        return Err(ApiError::NotFound("id not found".into()));
    }

    let hash = password::hash_password(&new_user.password)?;
    repo::update_by_id(&state.db, user_id, &new_user.email, &hash).await?;

    info!(user_id, email = %new_user.email, "user updated");
    Ok(Json(MessageResponse {
        message: "update email successful",
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_email(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(payload): Json<EmailPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let change = payload.validated().map_err(|errors| {
        warn!(user_id, ?errors, "updateEmail payload rejected");
        ApiError::from(errors)
    })?;

    if repo::find_by_id(&state.db, user_id).await?.is_none() {
        warn!(user_id, "updateEmail: id not found");
        return Err(ApiError::NotFound("id not found".into()));
    }

    repo::update_email(&state.db, user_id, &change.email).await?;

    info!(user_id, email = %change.email, "email updated");
    Ok(Json(MessageResponse {
        message: "update email successful",
    }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    if repo::find_by_id(&state.db, user_id).await?.is_none() {
        warn!(user_id, "delete: id not found");
        return Err(ApiError::NotFound("id not found".into()));
    }

    repo::delete_by_id(&state.db, user_id).await?;

    info!(user_id, "user deleted");
    Ok(Json(MessageResponse {
        message: "delete user successful",
    }))
}
