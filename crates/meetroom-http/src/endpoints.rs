//! Reservation API endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

use meetroom_core::TimeSlot;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Exchange username and password for a credential pair.
pub const LOGIN: &str = "/api/auth/login/";

/// All meeting rooms.
pub const ROOM_LIST: &str = "/api/rooms/list/";

/// Rooms free for a time slot and head count.
pub const RESERVATION_CHECK: &str = "/api/reservations/check/";

/// Submit a reservation for approval.
pub const RESERVATION_CREATE: &str = "/api/reservations/create/";

/// The caller's reservations, newest first.
pub const MY_RESERVATIONS: &str = "/api/reservations/my/";

/// Cancel a pending or approved reservation.
pub fn cancel_reservation(id: i64) -> String {
    format!("/api/reservations/{}/cancel", id)
}

/// Confirm that an approved reservation is being used.
pub fn confirm_use(id: i64) -> String {
    format!("/api/reservations/{}/confirm", id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `data` of a successful login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct CheckRequest<'a> {
    #[serde(flatten)]
    pub slot: &'a TimeSlot,
    pub people: u32,
}

#[derive(Debug, Serialize)]
pub struct CreateRequest<'a> {
    pub room_id: i64,
    #[serde(flatten)]
    pub slot: &'a TimeSlot,
    pub topic: &'a str,
    pub people: u32,
}
