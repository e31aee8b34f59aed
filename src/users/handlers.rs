use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, Entity},
    extract::{EntityId, JsonBody},
    state::AppState,
    users::{
        dto::{UserDetails, UserSummary},
        password::hash_password,
        repo_types::{NewUser, UserPatch},
        validate::{validate_create_user, validate_update_user},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/", post(create_user))
        .route(
            "/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

fn store_err(e: crate::db::StoreError) -> ApiError {
    ApiError::from_store(e, Entity::User)
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
) -> Result<Json<UserDetails>, ApiError> {
    let mut session = state.db.begin().await.map_err(store_err)?;
    let user = session.get_user(user_id).await.map_err(store_err)?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<UserSummary>, ApiError> {
    let payload = validate_create_user(&body).map_err(|e| {
        warn!(field = %e.field, "invalid user payload");
        e
    })?;
    let password_hash = hash_password(&payload.password)?;

    let mut session = state.db.begin().await.map_err(store_err)?;
    let user = session
        .insert_user(NewUser {
            name: payload.name,
            password_hash,
            email: Some(payload.email),
        })
        .await
        .map_err(|e| {
            warn!(error = %e, "create user failed");
            store_err(e)
        })?;
    session.commit().await.map_err(store_err)?;

    info!(user_id = user.id, name = %user.name, "user created");
    Ok(Json(user.into()))
}

#[instrument(skip(state, body))]
pub async fn update_user(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<UserSummary>, ApiError> {
    let payload = validate_update_user(&body).map_err(|e| {
        warn!(field = %e.field, user_id, "invalid user patch");
        e
    })?;
    let password_hash = match payload.password {
        Some(plain) => Some(hash_password(&plain)?),
        None => None,
    };
    let patch = UserPatch {
        name: payload.name,
        password_hash,
        email: payload.email,
    };

    let mut session = state.db.begin().await.map_err(store_err)?;
    let user = session
        .update_user(user_id, patch)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id, "update user failed");
            store_err(e)
        })?;
    session.commit().await.map_err(store_err)?;

    info!(user_id = user.id, "user updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
) -> Result<Json<UserSummary>, ApiError> {
    let mut session = state.db.begin().await.map_err(store_err)?;
    let user = session.delete_user(user_id).await.map_err(store_err)?;
    session.commit().await.map_err(store_err)?;

    info!(user_id = user.id, "user deleted");
    Ok(Json(user.into()))
}
