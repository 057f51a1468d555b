//! Room catalog endpoints

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
    models::{NewRoom, UpdateRoom},
    routes::forms::FormFields,
};

/// Create a room (admin). The image is optional and defaults to empty.
pub async fn create_room(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user)?;

    let form = FormFields::from_multipart(&mut multipart).await?;

    let image = match form.image.clone() {
        Some(image) => upload_image(&state, image).await?,
        None => String::new(),
    };

    let hotel_id = form
        .uuid("hotel_id")?
        .ok_or_else(|| ApiError::Validation("hotel_id is required".to_string()))?;

    let new_room = NewRoom {
        hotel_id,
        room_type: form.require("room_type")?.to_string(),
        description: form.text("description").unwrap_or_default().to_string(),
        capacity: form.integer("capacity")?.unwrap_or(1),
        price_per_night: form.price("price_per_night")?.unwrap_or(0.0),
        image,
    };

    let room = state.room_repository.create(&new_room).await.map_err(|e| {
        error!("Failed to create room: {}", e);
        ApiError::Internal
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "data": room})),
    ))
}

/// Partially update a room (admin)
pub async fn update_room(
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

    let update = UpdateRoom {
        room_type: form.text("room_type").map(str::to_string),
        description: form.text("description").map(str::to_string),
        capacity: form.integer("capacity")?,
        price_per_night: form.price("price_per_night")?,
        availability: form.boolean("availability")?,
        image,
    };

    let room = state
        .room_repository
        .update(id, &update)
        .await
        .map_err(|e| {
            error!("Failed to update room: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;

    Ok(Json(json!({"success": true, "data": room})))
}

/// List all rooms with their hotel resolved (public)
pub async fn get_rooms(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rooms = state.room_repository.list_with_hotels().await.map_err(|e| {
        error!("Failed to list rooms: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(json!({"success": true, "data": rooms})))
}

/// Get a room by ID (public)
pub async fn get_room_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let room = state
        .room_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get room: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;

    Ok(Json(json!({"success": true, "data": room})))
}

/// Delete a room (admin); restricted while a CONFIRMED booking references it
pub async fn delete_room(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user)?;

    // The delete carries its own booking guard; a failed delete is either
    // a guarded room or a missing id, told apart by reading the row back.
    let deleted = state
        .room_repository
        .delete_if_unbooked(id)
        .await
        .map_err(|e| {
            error!("Failed to delete room: {}", e);
            ApiError::Internal
        })?;

    if !deleted {
        let still_there = state.room_repository.find_by_id(id).await.map_err(|e| {
            error!("Failed to get room: {}", e);
            ApiError::Internal
        })?;

        return Err(match still_there {
            Some(_) => ApiError::Validation(
                "Room has an active booking and cannot be deleted".to_string(),
            ),
            None => ApiError::NotFound("Room not found".to_string()),
        });
    }

    Ok(Json(json!({"success": true, "message": "Room deleted"})))
}

async fn upload_image(
    state: &AppState,
    image: crate::routes::forms::FormImage,
) -> Result<String, ApiError> {
    state
        .image_store
        .upload("rooms", image.data, &image.content_type)
        .await
        .map_err(|e| {
            error!("Failed to upload room image: {}", e);
            ApiError::Internal
        })
}
