//! Hotel catalog endpoints

use axum::{
    Json,
    extract::{Extension, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{AuthUser, require_admin},
    models::{NewHotel, UpdateHotel},
    routes::forms::FormFields,
};

/// Create a hotel (admin). The image is required, unlike rooms.
pub async fn create_hotel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user)?;

    let form = FormFields::from_multipart(&mut multipart).await?;
    let image = form
        .image
        .clone()
        .ok_or_else(|| ApiError::Validation("Hotel image is required".to_string()))?;

    let new_hotel = NewHotel {
        name: form.require("name")?.to_string(),
        location: form.require("location")?.to_string(),
        description: form.text("description").unwrap_or_default().to_string(),
        amenities: form.list("amenities").unwrap_or_default(),
        price_per_night: form
            .price("price_per_night")?
            .ok_or_else(|| ApiError::Validation("price_per_night is required".to_string()))?,
        image: upload_image(&state, image).await?,
    };

    let hotel = state.hotel_repository.create(&new_hotel).await.map_err(|e| {
        error!("Failed to create hotel: {}", e);
        ApiError::Internal
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "data": hotel})),
    ))
}

/// Partially update a hotel (admin); optional image replaces the stored one
pub async fn update_hotel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user)?;

    let form = FormFields::from_multipart(&mut multipart).await?;

    let image = match form.image.clone() {
        Some(image) => Some(upload_image(&state, image).await?),
        None => None,
    };

    let update = UpdateHotel {
        name: form.text("name").map(str::to_string),
        location: form.text("location").map(str::to_string),
        description: form.text("description").map(str::to_string),
        amenities: form.list("amenities"),
        price_per_night: form.price("price_per_night")?,
        image,
    };

    let hotel = state
        .hotel_repository
        .update(id, &update)
        .await
        .map_err(|e| {
            error!("Failed to update hotel: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    Ok(Json(json!({"success": true, "data": hotel})))
}

/// List all hotels, newest first (public)
pub async fn get_hotels(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let hotels = state.hotel_repository.list().await.map_err(|e| {
        error!("Failed to list hotels: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(json!({"success": true, "data": hotels})))
}

/// Get a hotel by ID (public)
pub async fn get_hotel_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let hotel = state
        .hotel_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get hotel: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    Ok(Json(json!({"success": true, "data": hotel})))
}

/// Delete a hotel (admin); restricted while rooms still reference it
pub async fn delete_hotel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user)?;

    // The delete carries its own room guard; a failed delete is either a
    // guarded hotel or a missing id, told apart by reading the row back.
    let deleted = state
        .hotel_repository
        .delete_if_empty(id)
        .await
        .map_err(|e| {
            error!("Failed to delete hotel: {}", e);
            ApiError::Internal
        })?;

    if !deleted {
        let still_there = state.hotel_repository.find_by_id(id).await.map_err(|e| {
            error!("Failed to get hotel: {}", e);
            ApiError::Internal
        })?;

        return Err(match still_there {
            Some(_) => ApiError::Validation(
                "Hotel still has rooms and cannot be deleted".to_string(),
            ),
            None => ApiError::NotFound("Hotel not found".to_string()),
        });
    }

    Ok(Json(
        json!({"success": true, "message": "Hotel deleted successfully"}),
    ))
}

async fn upload_image(
    state: &AppState,
    image: crate::routes::forms::FormImage,
) -> Result<String, ApiError> {
    state
        .image_store
        .upload("hotels", image.data, &image.content_type)
        .await
        .map_err(|e| {
            error!("Failed to upload hotel image: {}", e);
            ApiError::Internal
        })
}
