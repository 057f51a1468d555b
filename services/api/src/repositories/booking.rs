//! Booking repository — the availability state machine
//!
//! Reservation and cancellation are single transactions built around
//! conditional updates, so the room's availability flag and the booking
//! status can never drift apart, even under concurrent requests. Two
//! concurrent attempts on one room race on
//! `UPDATE rooms .. WHERE availability = TRUE`; exactly one sees a row
//! modified and proceeds.

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{Booking, BookingDetails, HotelSummary, NewBooking, RoomSummary, UserSummary};

const BOOKING_COLUMNS: &str = "id, user_id, hotel_id, room_id, check_in, check_out, \
                               total_amount, status, created_at, updated_at";

const DETAIL_COLUMNS: &str = "b.id, b.user_id, b.hotel_id, b.room_id, b.check_in, b.check_out, \
                              b.total_amount, b.status, b.created_at, b.updated_at, \
                              h.id AS joined_hotel_id, h.name AS hotel_name, \
                              h.location AS hotel_location, h.image AS hotel_image, \
                              r.id AS joined_room_id, r.room_type AS joined_room_type, \
                              r.image AS room_image, \
                              u.name AS user_name, u.email AS user_email";

const DETAIL_JOINS: &str = "FROM bookings b \
                            LEFT JOIN hotels h ON h.id = b.hotel_id \
                            LEFT JOIN rooms r ON r.id = b.room_id \
                            JOIN users u ON u.id = b.user_id";

/// Result of a reservation attempt
#[derive(Debug)]
pub enum ReserveOutcome {
    /// The room was flipped and the CONFIRMED booking inserted
    Booked(Booking),
    /// The room does not exist or was not available
    RoomUnavailable,
    /// The referenced hotel does not exist
    HotelMissing,
}

/// Booking repository
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

fn booking_from_row(row: &PgRow) -> Result<Booking> {
    let status: String = row.get("status");
    Ok(Booking {
        id: row.get("id"),
        user_id: row.get("user_id"),
        hotel_id: row.get("hotel_id"),
        room_id: row.get("room_id"),
        check_in: row.get("check_in"),
        check_out: row.get("check_out"),
        total_amount: row.get("total_amount"),
        status: status.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn details_from_row(row: &PgRow, with_user: bool) -> Result<BookingDetails> {
    let booking = booking_from_row(row)?;

    let hotel = row
        .get::<Option<Uuid>, _>("joined_hotel_id")
        .map(|id| HotelSummary {
            id,
            name: row.get("hotel_name"),
            location: row.get("hotel_location"),
            image: row.get("hotel_image"),
        });

    let room = row
        .get::<Option<Uuid>, _>("joined_room_id")
        .map(|id| RoomSummary {
            id,
            room_type: row.get("joined_room_type"),
            image: row.get("room_image"),
        });

    let user = with_user.then(|| UserSummary {
        id: booking.user_id,
        name: row.get("user_name"),
        email: row.get("user_email"),
    });

    Ok(BookingDetails {
        booking,
        hotel,
        room,
        user,
    })
}

impl BookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically reserve a room and insert the CONFIRMED booking.
    ///
    /// The hotel reference is verified first so a dangling hotel id is a
    /// reported outcome rather than a foreign-key failure mid-transaction.
    /// The conditional room update makes the availability check and the
    /// flip one atomic step.
    pub async fn reserve(&self, new_booking: &NewBooking) -> Result<ReserveOutcome> {
        let mut tx = self.pool.begin().await?;

        let hotel_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM hotels WHERE id = $1)")
                .bind(new_booking.hotel_id)
                .fetch_one(&mut *tx)
                .await?;

        if !hotel_exists {
            tx.rollback().await?;
            return Ok(ReserveOutcome::HotelMissing);
        }

        let reserved = sqlx::query(
            r#"
            UPDATE rooms
            SET availability = FALSE, updated_at = now()
            WHERE id = $1 AND availability = TRUE
            "#,
        )
        .bind(new_booking.room_id)
        .execute(&mut *tx)
        .await?;

        if reserved.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(ReserveOutcome::RoomUnavailable);
        }

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO bookings (user_id, hotel_id, room_id, check_in, check_out, total_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'CONFIRMED')
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(new_booking.user_id)
        .bind(new_booking.hotel_id)
        .bind(new_booking.room_id)
        .bind(new_booking.check_in)
        .bind(new_booking.check_out)
        .bind(new_booking.total_amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let booking = booking_from_row(&row)?;
        info!(
            "Room {} reserved by booking {}",
            new_booking.room_id, booking.id
        );
        Ok(ReserveOutcome::Booked(booking))
    }

    /// Cancel a CONFIRMED booking and free its room.
    ///
    /// Returns `Ok(None)` when the booking was not CONFIRMED anymore; the
    /// guarded update makes double-cancel lose the race instead of flipping
    /// the room twice. The room update is skipped silently when the room
    /// row no longer exists.
    pub async fn cancel(&self, id: Uuid) -> Result<Option<Booking>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            UPDATE bookings
            SET status = 'CANCELLED', updated_at = now()
            WHERE id = $1 AND status = 'CONFIRMED'
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        let booking = booking_from_row(&row)?;

        if let Some(room_id) = booking.room_id {
            sqlx::query(
                r#"
                UPDATE rooms
                SET availability = TRUE, updated_at = now()
                WHERE id = $1
                "#,
            )
            .bind(room_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("Booking {} cancelled", booking.id);
        Ok(Some(booking))
    }

    /// Find a booking by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(booking_from_row).transpose()
    }

    /// Find a booking by ID with its hotel and room references resolved
    pub async fn find_details(&self, id: Uuid) -> Result<Option<BookingDetails>> {
        let row = sqlx::query(&format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE b.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(|r| details_from_row(r, false)).transpose()
    }

    /// List a user's bookings with references resolved, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookingDetails>> {
        let rows = sqlx::query(&format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE b.user_id = $1 ORDER BY b.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|r| details_from_row(r, false)).collect()
    }

    /// List all bookings with references and the booking user resolved,
    /// newest first
    pub async fn list_all(&self) -> Result<Vec<BookingDetails>> {
        let rows = sqlx::query(&format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} ORDER BY b.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|r| details_from_row(r, true)).collect()
    }
}
