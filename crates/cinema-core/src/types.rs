//! # Domain Types
//!
//! Core domain types for the cinema scheduling system.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Venue       │   │    Showtime     │   │     Ticket      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  movie_title    │   │  showtime_id    │       │
//! │  │  total_screens  │   │  screen_number  │   │  seat_id        │       │
//! │  │  address fields │   │  [start, end)   │   │  price_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Seat       │   │   SeatStatus    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  venue+screen   │   │  Free           │                             │
//! │  │  row_label      │   │  Booked         │                             │
//! │  │  seat_number    │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity uses a UUID v4 `id` generated at creation time; business
//! uniqueness lives in dedicated constraints (seat position per screen,
//! one ticket per seat per showtime).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Venue
// =============================================================================

/// A venue containing one or more screens.
///
/// The scheduling core only reads venue existence and screen count; the
/// record itself is managed by the venue CRUD collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Venue {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to customers.
    pub name: String,

    /// Street address.
    pub address_line: String,

    /// City the venue is located in.
    pub city: String,

    pub state_or_province: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,

    /// Number of screens (auditoriums) in this venue, 1..=50.
    pub total_screens: i64,

    pub phone: Option<String>,
    pub email: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a venue. Identity and timestamps are assigned by
/// the repository at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVenue {
    pub name: String,
    pub address_line: String,
    pub city: String,
    pub state_or_province: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub total_screens: i64,
    pub phone: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Showtime
// =============================================================================

/// A scheduled screening: movie, screen, time interval, price, format.
///
/// Invariant: for any two showtimes sharing `venue_id` and
/// `screen_number`, the half-open `[start_time, end_time)` intervals do
/// not intersect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Showtime {
    pub id: String,
    pub movie_title: String,
    /// Screen (auditorium) number within the venue, positive.
    pub screen_number: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Ticket price in cents (smallest currency unit).
    pub ticket_price_cents: i64,
    pub language: Option<String>,
    /// Presentation format, e.g. "2D", "3D", "IMAX".
    pub format: Option<String>,
    pub venue_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a showtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShowtime {
    pub movie_title: String,
    pub screen_number: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub ticket_price_cents: i64,
    pub language: Option<String>,
    pub format: Option<String>,
    pub venue_id: String,
}

/// Partial update for a showtime.
///
/// `None` means "leave the existing value alone". Explicit presence
/// markers make a supplied zero distinguishable from an absent field,
/// so a price of 0 cents can still be set via partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowtimeUpdate {
    pub movie_title: Option<String>,
    pub screen_number: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub ticket_price_cents: Option<i64>,
    pub language: Option<String>,
    pub format: Option<String>,
    pub venue_id: Option<String>,
}

/// Filter for the combined showtime query. Every supplied predicate is
/// applied conjunctively; an absent predicate imposes no restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowtimeFilter {
    /// Case-insensitive substring match on the movie title.
    pub title: Option<String>,
    pub venue_id: Option<String>,
    /// Window start; a showtime qualifies if it ends after this.
    pub from: Option<DateTime<Utc>>,
    /// Window end; a showtime qualifies if it starts before this.
    pub to: Option<DateTime<Utc>>,
}

// =============================================================================
// Seat
// =============================================================================

/// One bookable seat position inside a screen.
///
/// The tuple (venue_id, screen_number, row_label, seat_number) is unique.
/// Seats are created lazily by the seat inventory and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Seat {
    pub id: String,
    pub venue_id: String,
    pub screen_number: i64,
    /// Row letter, e.g. "A".
    pub row_label: String,
    /// Seat position within the row, positive.
    pub seat_number: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Seat Status
// =============================================================================

/// Booking state of one seat for one showtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    /// No ticket exists for this seat and showtime.
    Free,
    /// A ticket already references this seat for the showtime.
    Booked,
}

/// One entry of a seat map projection for a showtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatStatusEntry {
    pub seat_id: String,
    pub row_label: String,
    pub seat_number: i64,
    pub status: SeatStatus,
}

// =============================================================================
// Ticket
// =============================================================================

/// A booking record binding one seat to one showtime.
///
/// `price_cents` is copied from the showtime's ticket price at booking
/// time and never re-derived. The tuple (showtime_id, seat_id) is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ticket {
    pub id: String,
    pub showtime_id: String,
    pub seat_id: String,
    pub price_cents: i64,
    pub booked_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
