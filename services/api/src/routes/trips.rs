//! Trip package endpoints

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
    models::{NewTripPlan, UpdateTripPlan},
    routes::forms::FormFields,
};

/// Create a trip package (admin); image optional, defaults to empty
pub async fn create_trip_package(
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

    let new_trip = NewTripPlan {
        name: form.require("name")?.to_string(),
        description: form.text("description").unwrap_or_default().to_string(),
        price: form.price("price")?.unwrap_or(0.0),
        hotels: form.uuid_list("hotels")?.unwrap_or_default(),
        rooms: form.uuid_list("rooms")?.unwrap_or_default(),
        image,
    };

    let trip = state.trip_repository.create(&new_trip).await.map_err(|e| {
        error!("Failed to create trip package: {}", e);
        ApiError::Internal
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "data": trip})),
    ))
}

/// Partially update a trip package (admin)
pub async fn update_trip_package(
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

    let update = UpdateTripPlan {
        name: form.text("name").map(str::to_string),
        description: form.text("description").map(str::to_string),
        price: form.price("price")?,
        hotels: form.uuid_list("hotels")?,
        rooms: form.uuid_list("rooms")?,
        image,
    };

    let trip = state
        .trip_repository
        .update(id, &update)
        .await
        .map_err(|e| {
            error!("Failed to update trip package: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Trip package not found".to_string()))?;

    Ok(Json(json!({"success": true, "data": trip})))
}

/// List all trip packages (public)
pub async fn get_trip_packages(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let trips = state.trip_repository.list().await.map_err(|e| {
        error!("Failed to list trip packages: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(json!({"success": true, "data": trips})))
}

/// Get a trip package by ID (public)
pub async fn get_trip_package_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let trip = state
        .trip_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get trip package: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Trip package not found".to_string()))?;

    Ok(Json(json!({"success": true, "data": trip})))
}

/// Delete a trip package (admin)
pub async fn delete_trip_package(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user)?;

    let deleted = state.trip_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete trip package: {}", e);
        ApiError::Internal
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Trip package not found".to_string()));
    }

    Ok(Json(
        json!({"success": true, "message": "Trip package deleted successfully"}),
    ))
}

async fn upload_image(
    state: &AppState,
    image: crate::routes::forms::FormImage,
) -> Result<String, ApiError> {
    state
        .image_store
        .upload("trip-packages", image.data, &image.content_type)
        .await
        .map_err(|e| {
            error!("Failed to upload trip package image: {}", e);
            ApiError::Internal
        })
}
