//! Hotel and trip booking REST backend
//!
//! Auth, catalog, bookings, trip packages, and the supporting image and
//! email components. The binary in `main.rs` wires these together.

use sqlx::PgPool;

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod notifier;
pub mod repositories;
pub mod routes;
pub mod storage;
pub mod validation;

use crate::{
    jwt::JwtService,
    notifier::Mailer,
    repositories::{
        BookingRepository, HotelRepository, RoomRepository, TripRepository, UserRepository,
    },
    routes::auth::AdminConfig,
    storage::ImageStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub admin: AdminConfig,
    pub mailer: Mailer,
    pub image_store: ImageStore,
    pub user_repository: UserRepository,
    pub hotel_repository: HotelRepository,
    pub room_repository: RoomRepository,
    pub booking_repository: BookingRepository,
    pub trip_repository: TripRepository,
}
