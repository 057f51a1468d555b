//! Hotel model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hotel entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub amenities: Vec<String>,
    pub price_per_night: f64,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New hotel creation payload
#[derive(Debug, Clone)]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub description: String,
    pub amenities: Vec<String>,
    pub price_per_night: f64,
    pub image: String,
}

/// Hotel update payload; unset fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateHotel {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub price_per_night: Option<f64>,
    pub image: Option<String>,
}

/// Compact hotel view embedded in room listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSummary {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub image: String,
}
