use tracing::info;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::validation::{is_strong_password, WEAK_PASSWORD_MESSAGE};
use crate::error::ApiError;
use crate::farmers::{Farmer, FarmerStore, ProfileChanges};
use crate::profile::dto::UpdateProfileRequest;

pub async fn get_profile(store: &dyn FarmerStore, id: Uuid) -> Result<Farmer, ApiError> {
    store.find_by_id(id).await?.ok_or(ApiError::NotFound)
}

/// Applies the provided fields, keeping stored values for fields that are
/// absent or blank. Email is never part of the changes.
pub async fn update_profile(
    store: &dyn FarmerStore,
    id: Uuid,
    req: UpdateProfileRequest,
) -> Result<Farmer, ApiError> {
    let changes = ProfileChanges {
        name: req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        role: req.role.filter(|r| !r.is_empty()),
        profile_picture: req.profile_picture.filter(|p| !p.is_empty()),
    };
    let farmer = store
        .update_profile(id, changes)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(farmer_id = %farmer.id, "profile updated");
    Ok(farmer)
}

pub async fn update_password(
    store: &dyn FarmerStore,
    id: Uuid,
    password: &str,
) -> Result<(), ApiError> {
    if !is_strong_password(password) {
        return Err(ApiError::validation("password", WEAK_PASSWORD_MESSAGE));
    }
    let hash = hash_password(password)?;
    if !store.update_password(id, &hash).await? {
        return Err(ApiError::NotFound);
    }
    info!(farmer_id = %id, "password updated");
    Ok(())
}

pub async fn delete_account(store: &dyn FarmerStore, id: Uuid) -> Result<(), ApiError> {
    if !store.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    info!(farmer_id = %id, "account deleted");
    Ok(())
}
