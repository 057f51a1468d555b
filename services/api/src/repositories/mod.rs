//! Repositories for database operations
//!
//! All persistence goes through these types; handlers never touch SQL. Each
//! repository owns a cloned handle to the shared pool injected at startup.

pub mod booking;
pub mod hotel;
pub mod room;
pub mod trip;
pub mod user;

pub use booking::{BookingRepository, ReserveOutcome};
pub use hotel::HotelRepository;
pub use room::RoomRepository;
pub use trip::TripRepository;
pub use user::UserRepository;
