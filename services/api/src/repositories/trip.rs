//! Trip package repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{NewTripPlan, TripPlan, UpdateTripPlan};

const TRIP_COLUMNS: &str =
    "id, name, description, price, hotels, rooms, image, created_at, updated_at";

/// Trip package repository
#[derive(Clone)]
pub struct TripRepository {
    pool: PgPool,
}

fn trip_from_row(row: &PgRow) -> TripPlan {
    TripPlan {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        hotels: row.get("hotels"),
        rooms: row.get("rooms"),
        image: row.get("image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl TripRepository {
    /// Create a new trip repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new trip package
    pub async fn create(&self, new_trip: &NewTripPlan) -> Result<TripPlan> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO trip_plans (name, description, price, hotels, rooms, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TRIP_COLUMNS}
            "#
        ))
        .bind(&new_trip.name)
        .bind(&new_trip.description)
        .bind(new_trip.price)
        .bind(&new_trip.hotels)
        .bind(&new_trip.rooms)
        .bind(&new_trip.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(trip_from_row(&row))
    }

    /// Partially update a trip package; unset fields keep their stored value
    pub async fn update(&self, id: Uuid, update: &UpdateTripPlan) -> Result<Option<TripPlan>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE trip_plans
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                hotels = COALESCE($5, hotels),
                rooms = COALESCE($6, rooms),
                image = COALESCE($7, image),
                updated_at = now()
            WHERE id = $1
            RETURNING {TRIP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .bind(&update.hotels)
        .bind(&update.rooms)
        .bind(&update.image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(trip_from_row))
    }

    /// List all trip packages, newest first
    pub async fn list(&self) -> Result<Vec<TripPlan>> {
        let rows = sqlx::query(&format!(
            "SELECT {TRIP_COLUMNS} FROM trip_plans ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(trip_from_row).collect())
    }

    /// Find a trip package by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TripPlan>> {
        let row = sqlx::query(&format!(
            "SELECT {TRIP_COLUMNS} FROM trip_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(trip_from_row))
    }

    /// Delete a trip package; returns false when the id does not resolve
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM trip_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
