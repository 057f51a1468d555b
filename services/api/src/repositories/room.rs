//! Room repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{HotelSummary, NewRoom, Room, RoomWithHotel, UpdateRoom};

const ROOM_COLUMNS: &str = "id, hotel_id, room_type, description, capacity, price_per_night, \
                            availability, image, created_at, updated_at";

/// Room repository
#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

fn room_from_row(row: &PgRow) -> Room {
    Room {
        id: row.get("id"),
        hotel_id: row.get("hotel_id"),
        room_type: row.get("room_type"),
        description: row.get("description"),
        capacity: row.get("capacity"),
        price_per_night: row.get("price_per_night"),
        availability: row.get("availability"),
        image: row.get("image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl RoomRepository {
    /// Create a new room repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new room, available by default
    pub async fn create(&self, new_room: &NewRoom) -> Result<Room> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO rooms (hotel_id, room_type, description, capacity, price_per_night, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ROOM_COLUMNS}
            "#
        ))
        .bind(new_room.hotel_id)
        .bind(&new_room.room_type)
        .bind(&new_room.description)
        .bind(new_room.capacity)
        .bind(new_room.price_per_night)
        .bind(&new_room.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(room_from_row(&row))
    }

    /// Partially update a room; unset fields keep their stored value
    pub async fn update(&self, id: Uuid, update: &UpdateRoom) -> Result<Option<Room>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE rooms
            SET room_type = COALESCE($2, room_type),
                description = COALESCE($3, description),
                capacity = COALESCE($4, capacity),
                price_per_night = COALESCE($5, price_per_night),
                availability = COALESCE($6, availability),
                image = COALESCE($7, image),
                updated_at = now()
            WHERE id = $1
            RETURNING {ROOM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.room_type)
        .bind(&update.description)
        .bind(update.capacity)
        .bind(update.price_per_night)
        .bind(update.availability)
        .bind(&update.image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(room_from_row))
    }

    /// List all rooms with their hotel reference resolved
    pub async fn list_with_hotels(&self) -> Result<Vec<RoomWithHotel>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.hotel_id, r.room_type, r.description, r.capacity,
                   r.price_per_night, r.availability, r.image, r.created_at, r.updated_at,
                   h.id AS joined_hotel_id, h.name AS hotel_name,
                   h.location AS hotel_location, h.image AS hotel_image
            FROM rooms r
            LEFT JOIN hotels h ON h.id = r.hotel_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let rooms = rows
            .iter()
            .map(|row| {
                let hotel = row
                    .get::<Option<Uuid>, _>("joined_hotel_id")
                    .map(|hotel_id| HotelSummary {
                        id: hotel_id,
                        name: row.get("hotel_name"),
                        location: row.get("hotel_location"),
                        image: row.get("hotel_image"),
                    });

                RoomWithHotel {
                    room: room_from_row(row),
                    hotel,
                }
            })
            .collect();

        Ok(rooms)
    }

    /// Find a room by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>> {
        let row = sqlx::query(&format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(room_from_row))
    }

    /// Delete a room unless a CONFIRMED booking still references it.
    ///
    /// The booking check is part of the delete statement itself, so a
    /// reservation committing concurrently cannot slip between a separate
    /// check and the delete. Returns false when nothing was deleted; the
    /// caller reads the room back to tell a missing id from a guarded one.
    pub async fn delete_if_unbooked(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM rooms
            WHERE id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM bookings
                  WHERE room_id = $1 AND status = 'CONFIRMED'
              )
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
