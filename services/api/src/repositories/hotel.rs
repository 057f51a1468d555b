//! Hotel repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{Hotel, NewHotel, UpdateHotel};

const HOTEL_COLUMNS: &str =
    "id, name, location, description, amenities, price_per_night, image, created_at, updated_at";

/// Hotel repository
#[derive(Clone)]
pub struct HotelRepository {
    pool: PgPool,
}

fn hotel_from_row(row: &PgRow) -> Hotel {
    Hotel {
        id: row.get("id"),
        name: row.get("name"),
        location: row.get("location"),
        description: row.get("description"),
        amenities: row.get("amenities"),
        price_per_night: row.get("price_per_night"),
        image: row.get("image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl HotelRepository {
    /// Create a new hotel repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new hotel
    pub async fn create(&self, new_hotel: &NewHotel) -> Result<Hotel> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO hotels (name, location, description, amenities, price_per_night, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {HOTEL_COLUMNS}
            "#
        ))
        .bind(&new_hotel.name)
        .bind(&new_hotel.location)
        .bind(&new_hotel.description)
        .bind(&new_hotel.amenities)
        .bind(new_hotel.price_per_night)
        .bind(&new_hotel.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(hotel_from_row(&row))
    }

    /// Partially update a hotel; unset fields keep their stored value
    pub async fn update(&self, id: Uuid, update: &UpdateHotel) -> Result<Option<Hotel>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE hotels
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                description = COALESCE($4, description),
                amenities = COALESCE($5, amenities),
                price_per_night = COALESCE($6, price_per_night),
                image = COALESCE($7, image),
                updated_at = now()
            WHERE id = $1
            RETURNING {HOTEL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.name)
        .bind(&update.location)
        .bind(&update.description)
        .bind(&update.amenities)
        .bind(update.price_per_night)
        .bind(&update.image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(hotel_from_row))
    }

    /// List all hotels, newest first
    pub async fn list(&self) -> Result<Vec<Hotel>> {
        let rows = sqlx::query(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(hotel_from_row).collect())
    }

    /// Find a hotel by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>> {
        let row = sqlx::query(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(hotel_from_row))
    }

    /// Delete a hotel unless rooms still reference it.
    ///
    /// The room check is part of the delete statement itself, so a room
    /// created concurrently cannot slip between a separate check and the
    /// delete. Returns false when nothing was deleted; the caller reads
    /// the hotel back to tell a missing id from a guarded one.
    pub async fn delete_if_empty(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM hotels
            WHERE id = $1
              AND NOT EXISTS (SELECT 1 FROM rooms WHERE hotel_id = $1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
