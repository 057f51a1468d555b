//! Domain models for the booking backend

pub mod booking;
pub mod hotel;
pub mod room;
pub mod trip;
pub mod user;

// Re-export for convenience
pub use booking::{Booking, BookingDetails, BookingStatus, NewBooking};
pub use hotel::{Hotel, HotelSummary, NewHotel, UpdateHotel};
pub use room::{NewRoom, Room, RoomSummary, RoomWithHotel, UpdateRoom};
pub use trip::{NewTripPlan, TripPlan, UpdateTripPlan};
pub use user::{NewUser, Role, User, UserSummary};
