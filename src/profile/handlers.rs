use axum::{
    extract::State,
    routing::{delete, get, put},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::jwt::AuthFarmer,
    error::ApiError,
    profile::{
        dto::{FarmerResponse, OkResponse, UpdatePasswordRequest, UpdateProfileRequest},
        services,
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/profile", get(get_profile).put(update_profile))
        .route("/auth/update-password", put(update_password))
        .route("/auth/delete-account", delete(delete_account))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthFarmer(farmer_id): AuthFarmer,
) -> Result<Json<FarmerResponse>, ApiError> {
    let farmer = services::get_profile(state.store.as_ref(), farmer_id).await?;
    Ok(Json(FarmerResponse {
        success: true,
        farmer,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthFarmer(farmer_id): AuthFarmer,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<FarmerResponse>, ApiError> {
    let farmer = services::update_profile(state.store.as_ref(), farmer_id, payload).await?;
    Ok(Json(FarmerResponse {
        success: true,
        farmer,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_password(
    State(state): State<AppState>,
    AuthFarmer(farmer_id): AuthFarmer,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    services::update_password(state.store.as_ref(), farmer_id, &payload.password).await?;
    Ok(Json(OkResponse { success: true }))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthFarmer(farmer_id): AuthFarmer,
) -> Result<Json<OkResponse>, ApiError> {
    services::delete_account(state.store.as_ref(), farmer_id).await?;
    Ok(Json(OkResponse { success: true }))
}
