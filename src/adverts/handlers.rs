use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    adverts::dto::{
        AdvertisementSummary, AdvertisementView, CreateAdvertisementRequest,
        UpdateAdvertisementRequest,
    },
    db::StoreError,
    error::{ApiError, Entity},
    extract::{EntityId, JsonBody},
    state::AppState,
};

pub fn advert_routes() -> Router<AppState> {
    Router::new()
        .route("/adv/", post(create_advertisement))
        .route(
            "/adv/:adv_id",
            get(get_advertisement)
                .patch(update_advertisement)
                .delete(delete_advertisement),
        )
}

fn store_err(e: StoreError) -> ApiError {
    ApiError::from_store(e, Entity::Advertisement)
}

#[instrument(skip(state))]
pub async fn get_advertisement(
    State(state): State<AppState>,
    EntityId(adv_id): EntityId,
) -> Result<Json<AdvertisementView>, ApiError> {
    let mut session = state.db.begin().await.map_err(store_err)?;
    let adv = session.get_advertisement(adv_id).await.map_err(store_err)?;
    Ok(Json(adv.into()))
}

// Only structural checks apply here; user payloads get semantic validation.
#[instrument(skip(state, payload))]
pub async fn create_advertisement(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateAdvertisementRequest>,
) -> Result<Json<AdvertisementView>, ApiError> {
    let mut session = state.db.begin().await.map_err(store_err)?;
    let adv = session
        .insert_advertisement(payload.into())
        .await
        .map_err(|e| {
            warn!(error = %e, "create advertisement failed");
            store_err(e)
        })?;
    session.commit().await.map_err(store_err)?;

    info!(adv_id = adv.id, user_id = ?adv.user_id, "advertisement created");
    Ok(Json(adv.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_advertisement(
    State(state): State<AppState>,
    EntityId(adv_id): EntityId,
    JsonBody(payload): JsonBody<UpdateAdvertisementRequest>,
) -> Result<Json<AdvertisementView>, ApiError> {
    let mut session = state.db.begin().await.map_err(store_err)?;
    let adv = session
        .update_advertisement(adv_id, payload.into())
        .await
        .map_err(|e| {
            warn!(error = %e, adv_id, "update advertisement failed");
            store_err(e)
        })?;
    session.commit().await.map_err(store_err)?;

    info!(adv_id = adv.id, "advertisement updated");
    Ok(Json(adv.into()))
}

#[instrument(skip(state))]
pub async fn delete_advertisement(
    State(state): State<AppState>,
    EntityId(adv_id): EntityId,
) -> Result<Json<AdvertisementSummary>, ApiError> {
    let mut session = state.db.begin().await.map_err(store_err)?;
    let adv = session
        .delete_advertisement(adv_id)
        .await
        .map_err(store_err)?;
    session.commit().await.map_err(store_err)?;

    info!(adv_id = adv.id, "advertisement deleted");
    Ok(Json(adv.into()))
}
