//! Booking model and status type

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{hotel::HotelSummary, room::RoomSummary, user::UserSummary};

/// Booking lifecycle status. CONFIRMED is the only entry point and the
/// transition to CANCELLED is one-way and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking entity. Hotel and room references are nullable because those
/// rows may be deleted while the booking record is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking with its references resolved, as returned by the read endpoints.
/// The user view is only populated on the admin listing.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub hotel: Option<HotelSummary>,
    pub room: Option<RoomSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

/// New booking payload, inserted as CONFIRMED
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!(
            "CONFIRMED".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
        assert_eq!(
            "CANCELLED".parse::<BookingStatus>().unwrap(),
            BookingStatus::Cancelled
        );
        assert!("PENDING".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn details_flatten_and_omit_absent_user() {
        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            hotel_id: None,
            room_id: None,
            check_in: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            total_amount: 480.0,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let details = BookingDetails {
            booking: booking.clone(),
            hotel: Some(HotelSummary {
                id: Uuid::new_v4(),
                name: "Seaview".to_string(),
                location: "Kribi".to_string(),
                image: String::new(),
            }),
            room: None,
            user: None,
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], booking.id.to_string());
        assert_eq!(json["status"], "CONFIRMED");
        assert_eq!(json["hotel"]["name"], "Seaview");
        assert!(json["room"].is_null());
        assert!(json.get("user").is_none());
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            "\"CONFIRMED\""
        );
        assert_eq!(
            serde_json::from_str::<BookingStatus>("\"CANCELLED\"").unwrap(),
            BookingStatus::Cancelled
        );
    }
}
