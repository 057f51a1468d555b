//! Room model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::hotel::HotelSummary;

/// Room entity. The availability flag is the single source of truth for
/// bookability; it is flipped in lockstep with the booking lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type: String,
    pub description: String,
    pub capacity: i32,
    pub price_per_night: f64,
    pub availability: bool,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New room creation payload
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub hotel_id: Uuid,
    pub room_type: String,
    pub description: String,
    pub capacity: i32,
    pub price_per_night: f64,
    pub image: String,
}

/// Room update payload; unset fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateRoom {
    pub room_type: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_night: Option<f64>,
    pub availability: Option<bool>,
    pub image: Option<String>,
}

/// Compact room view embedded in booking listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: Uuid,
    pub room_type: String,
    pub image: String,
}

/// Room with its hotel reference resolved, as returned by the listing
#[derive(Debug, Clone, Serialize)]
pub struct RoomWithHotel {
    #[serde(flatten)]
    pub room: Room,
    pub hotel: Option<HotelSummary>,
}
