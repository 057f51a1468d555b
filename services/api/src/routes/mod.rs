//! API routes
//!
//! Mutating catalog/trip routes and everything under bookings require a
//! valid bearer token; listing and detail reads on the catalog are public.

use axum::{
    Json, Router,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{AppState, middleware::auth_middleware};

pub mod auth;
pub mod bookings;
pub mod forms;
pub mod hotels;
pub mod rooms;
pub mod trips;

/// Create the router for the booking service
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/bookings",
            post(bookings::book_room).get(bookings::get_user_bookings),
        )
        .route("/api/bookings/all", get(bookings::get_all_bookings))
        .route(
            "/api/bookings/:id",
            get(bookings::get_booking).patch(bookings::cancel_booking),
        )
        .route("/api/hotels", post(hotels::create_hotel))
        .route(
            "/api/hotels/:id",
            axum::routing::patch(hotels::update_hotel).delete(hotels::delete_hotel),
        )
        .route("/api/rooms", post(rooms::create_room))
        .route(
            "/api/rooms/:id",
            axum::routing::patch(rooms::update_room).delete(rooms::delete_room),
        )
        .route("/api/trips", post(trips::create_trip_package))
        .route(
            "/api/trips/:id",
            axum::routing::patch(trips::update_trip_package).delete(trips::delete_trip_package),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/hotels", get(hotels::get_hotels))
        .route("/api/hotels/:id", get(hotels::get_hotel_by_id))
        .route("/api/rooms", get(rooms::get_rooms))
        .route("/api/rooms/:id", get(rooms::get_room_by_id))
        .route("/api/trips", get(trips::get_trip_packages))
        .route("/api/trips/:id", get(trips::get_trip_package_by_id))
        .merge(protected)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "booking-api"
    }))
}
