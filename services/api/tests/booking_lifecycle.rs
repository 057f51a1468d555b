//! Integration tests for the booking state machine
//!
//! These tests run against the PostgreSQL instance named by DATABASE_URL
//! and are skipped when it is not set. Each test seeds its own user,
//! hotel, and room, so they can run concurrently against one database.

use api::models::{
    Booking, BookingStatus, Hotel, NewBooking, NewHotel, NewRoom, NewUser, Role, Room, User,
};
use api::repositories::{
    BookingRepository, HotelRepository, ReserveOutcome, RoomRepository, UserRepository,
};
use chrono::NaiveDate;
use common::database::{DatabaseConfig, init_pool};
use sqlx::PgPool;
use uuid::Uuid;

type TestResult = Result<(), Box<dyn std::error::Error>>;

async fn test_pool() -> Result<Option<PgPool>, Box<dyn std::error::Error>> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping database test");
        return Ok(None);
    }

    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(Some(pool))
}

struct Stay {
    user: User,
    hotel: Hotel,
    room: Room,
}

async fn seed(pool: &PgPool) -> Result<Stay, Box<dyn std::error::Error>> {
    let user = UserRepository::new(pool.clone())
        .create(&NewUser {
            name: "Guest".to_string(),
            email: format!("guest-{}@example.com", Uuid::new_v4()),
            password: "pw123".to_string(),
            role: Role::User,
        })
        .await?
        .ok_or("seed email collided")?;

    let hotel = HotelRepository::new(pool.clone())
        .create(&NewHotel {
            name: "Seaview".to_string(),
            location: "Kribi".to_string(),
            description: "Beachfront".to_string(),
            amenities: vec!["wifi".to_string()],
            price_per_night: 90.0,
            image: String::new(),
        })
        .await?;

    let room = RoomRepository::new(pool.clone())
        .create(&NewRoom {
            hotel_id: hotel.id,
            room_type: "Deluxe".to_string(),
            description: "Sea-facing".to_string(),
            capacity: 2,
            price_per_night: 120.0,
            image: String::new(),
        })
        .await?;

    Ok(Stay { user, hotel, room })
}

fn booking_for(stay: &Stay) -> NewBooking {
    NewBooking {
        user_id: stay.user.id,
        hotel_id: stay.hotel.id,
        room_id: stay.room.id,
        check_in: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
        total_amount: 480.0,
    }
}

fn booked(outcome: ReserveOutcome) -> Booking {
    match outcome {
        ReserveOutcome::Booked(booking) => booking,
        other => panic!("expected a booking, got {:?}", other),
    }
}

#[tokio::test]
async fn concurrent_reservations_admit_exactly_one() -> TestResult {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let stay = seed(&pool).await?;
    let bookings = BookingRepository::new(pool.clone());

    let request = booking_for(&stay);
    let (first, second) = tokio::join!(bookings.reserve(&request), bookings.reserve(&request));

    let outcomes = [first?, second?];
    let wins = outcomes
        .iter()
        .filter(|o| matches!(o, ReserveOutcome::Booked(_)))
        .count();
    let losses = outcomes
        .iter()
        .filter(|o| matches!(o, ReserveOutcome::RoomUnavailable))
        .count();

    assert_eq!(wins, 1, "exactly one concurrent reservation must win");
    assert_eq!(losses, 1, "the other must see the room as unavailable");

    let room = RoomRepository::new(pool.clone())
        .find_by_id(stay.room.id)
        .await?
        .ok_or("room vanished")?;
    assert!(!room.availability);

    Ok(())
}

#[tokio::test]
async fn cancel_frees_the_room_exactly_once() -> TestResult {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let stay = seed(&pool).await?;
    let bookings = BookingRepository::new(pool.clone());
    let rooms = RoomRepository::new(pool.clone());

    let booking = booked(bookings.reserve(&booking_for(&stay)).await?);
    assert_eq!(booking.status, BookingStatus::Confirmed);

    let cancelled = bookings
        .cancel(booking.id)
        .await?
        .ok_or("first cancel must succeed")?;
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let room = rooms
        .find_by_id(stay.room.id)
        .await?
        .ok_or("room vanished")?;
    assert!(room.availability, "cancel must free the room");

    // The guarded transition makes a second cancel a no-op, not a second
    // availability flip.
    assert!(bookings.cancel(booking.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn reservation_rejects_unknown_hotel() -> TestResult {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let stay = seed(&pool).await?;
    let bookings = BookingRepository::new(pool.clone());

    let mut request = booking_for(&stay);
    request.hotel_id = Uuid::new_v4();

    assert!(matches!(
        bookings.reserve(&request).await?,
        ReserveOutcome::HotelMissing
    ));

    // The rejected attempt must not leak a reserved room.
    let room = RoomRepository::new(pool.clone())
        .find_by_id(stay.room.id)
        .await?
        .ok_or("room vanished")?;
    assert!(room.availability);

    Ok(())
}

#[tokio::test]
async fn room_delete_blocked_by_confirmed_booking() -> TestResult {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let stay = seed(&pool).await?;
    let bookings = BookingRepository::new(pool.clone());
    let rooms = RoomRepository::new(pool.clone());

    let booking = booked(bookings.reserve(&booking_for(&stay)).await?);

    assert!(!rooms.delete_if_unbooked(stay.room.id).await?);
    assert!(rooms.find_by_id(stay.room.id).await?.is_some());

    bookings
        .cancel(booking.id)
        .await?
        .ok_or("cancel must succeed")?;

    assert!(rooms.delete_if_unbooked(stay.room.id).await?);
    assert!(rooms.find_by_id(stay.room.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn duplicate_email_loses_to_unique_constraint() -> TestResult {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let users = UserRepository::new(pool.clone());

    let new_user = NewUser {
        name: "Guest".to_string(),
        email: format!("guest-{}@example.com", Uuid::new_v4()),
        password: "pw123".to_string(),
        role: Role::User,
    };

    assert!(users.create(&new_user).await?.is_some());
    assert!(
        users.create(&new_user).await?.is_none(),
        "the second insert must report the taken email, not error"
    );

    Ok(())
}

#[tokio::test]
async fn booking_reads_resolve_references() -> TestResult {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let stay = seed(&pool).await?;
    let bookings = BookingRepository::new(pool.clone());

    let booking = booked(bookings.reserve(&booking_for(&stay)).await?);

    let mine = bookings.list_for_user(stay.user.id).await?;
    let listed = mine
        .iter()
        .find(|d| d.booking.id == booking.id)
        .ok_or("booking missing from the user listing")?;

    let hotel = listed.hotel.as_ref().ok_or("hotel not resolved")?;
    assert_eq!(hotel.name, "Seaview");
    let room = listed.room.as_ref().ok_or("room not resolved")?;
    assert_eq!(room.room_type, "Deluxe");
    assert!(listed.user.is_none(), "user view is admin-listing only");

    let all = bookings.list_all().await?;
    let listed = all
        .iter()
        .find(|d| d.booking.id == booking.id)
        .ok_or("booking missing from the admin listing")?;
    let user = listed.user.as_ref().ok_or("user not resolved")?;
    assert_eq!(user.email, stay.user.email);

    Ok(())
}
