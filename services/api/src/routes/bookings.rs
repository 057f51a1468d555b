//! Booking endpoints — creation, cancellation, and gated reads

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{AuthUser, require_admin},
    models::{Booking, BookingStatus, NewBooking},
    notifier::BookingEmail,
    repositories::ReserveOutcome,
};

/// Request for booking a room
#[derive(Deserialize)]
pub struct BookingRequest {
    pub hotel: Option<Uuid>,
    pub room: Option<Uuid>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub total_amount: Option<f64>,
}

/// Book an available room. The reservation is atomic: the availability
/// check and flip happen in one conditional update, so concurrent attempts
/// on the same room cannot both succeed. The confirmation email is
/// best-effort and only reported through the `emailSent` flag.
pub async fn book_room(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if user.role.is_admin() {
        return Err(ApiError::Forbidden(
            "Admins cannot book rooms from user portal".to_string(),
        ));
    }

    let (Some(hotel), Some(room), Some(check_in), Some(check_out), Some(total_amount)) = (
        payload.hotel,
        payload.room,
        payload.check_in,
        payload.check_out,
        payload.total_amount,
    ) else {
        return Err(ApiError::Validation(
            "All booking details are required".to_string(),
        ));
    };

    let new_booking = NewBooking {
        user_id: user.id,
        hotel_id: hotel,
        room_id: room,
        check_in,
        check_out,
        total_amount,
    };

    let outcome = state
        .booking_repository
        .reserve(&new_booking)
        .await
        .map_err(|e| {
            error!("Failed to book room: {}", e);
            ApiError::Internal
        })?;

    let booking = match outcome {
        ReserveOutcome::Booked(booking) => booking,
        ReserveOutcome::RoomUnavailable => {
            return Err(ApiError::Validation("Room not available".to_string()));
        }
        ReserveOutcome::HotelMissing => {
            return Err(ApiError::Validation("Hotel not found".to_string()));
        }
    };

    let email_sent = match send_confirmation(&state, &booking).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Booking confirmation email failed: {}", e);
            false
        }
    };

    let message = if email_sent {
        "Booking confirmed and email sent"
    } else {
        "Booking confirmed (email failed)"
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": message,
            "emailSent": email_sent,
            "data": booking,
        })),
    ))
}

/// Cancel a CONFIRMED booking; flips the room back to available
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state
        .booking_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get booking: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    if !user.can_access(booking.user_id) {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }

    if booking.status == BookingStatus::Cancelled {
        return Err(ApiError::Validation(
            "Booking already cancelled".to_string(),
        ));
    }

    // The guarded transition also catches a concurrent cancel that landed
    // between the read above and this update.
    let cancelled = state
        .booking_repository
        .cancel(id)
        .await
        .map_err(|e| {
            error!("Failed to cancel booking: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::Validation("Booking already cancelled".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Booking cancelled successfully",
        "data": cancelled,
    })))
}

/// Get a booking by ID with its references resolved; owner or admin only
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let details = state
        .booking_repository
        .find_details(id)
        .await
        .map_err(|e| {
            error!("Failed to get booking: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    if !user.can_access(details.booking.user_id) {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }

    Ok(Json(json!({"success": true, "data": details})))
}

/// List the caller's bookings, newest first
pub async fn get_user_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = state
        .booking_repository
        .list_for_user(user.id)
        .await
        .map_err(|e| {
            error!("Failed to list bookings: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(json!({"success": true, "data": bookings})))
}

/// List all bookings (admin), newest first
pub async fn get_all_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&user)?;

    let bookings = state.booking_repository.list_all().await.map_err(|e| {
        error!("Failed to list bookings: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(json!({"success": true, "data": bookings})))
}

/// Resolve the recipient and entity names, then dispatch the confirmation.
/// Any failure here is the caller's `emailSent: false`, never a 500.
async fn send_confirmation(state: &AppState, booking: &Booking) -> anyhow::Result<()> {
    let user = state
        .user_repository
        .find_by_id(booking.user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Booking user missing"))?;

    let hotel_name = match booking.hotel_id {
        Some(hotel_id) => state
            .hotel_repository
            .find_by_id(hotel_id)
            .await?
            .map(|h| h.name),
        None => None,
    };

    let room_type = match booking.room_id {
        Some(room_id) => state
            .room_repository
            .find_by_id(room_id)
            .await?
            .map(|r| r.room_type),
        None => None,
    };

    state
        .mailer
        .send_booking_confirmation(BookingEmail {
            to: &user.email,
            user_name: &user.name,
            hotel_name: hotel_name.as_deref().unwrap_or("your hotel"),
            room_type: room_type.as_deref().unwrap_or("your room"),
            check_in: booking.check_in,
            check_out: booking.check_out,
            total_amount: booking.total_amount,
        })
        .await?;

    Ok(())
}
