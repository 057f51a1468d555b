//! Trip package model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bundled trip offering referencing hotels and rooms. The referenced ids
/// are stored as given; no existence validation is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub hotels: Vec<Uuid>,
    pub rooms: Vec<Uuid>,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New trip package payload
#[derive(Debug, Clone)]
pub struct NewTripPlan {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub hotels: Vec<Uuid>,
    pub rooms: Vec<Uuid>,
    pub image: String,
}

/// Trip package update payload; unset fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateTripPlan {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub hotels: Option<Vec<Uuid>>,
    pub rooms: Option<Vec<Uuid>>,
    pub image: Option<String>,
}
