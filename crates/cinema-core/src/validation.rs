//! # Validation Module
//!
//! Business rule validation for scheduling and booking input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Transport adapter (external)                                 │
//! │  ├── Shape checks (deserialization)                                    │
//! │  └── Immediate caller feedback                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Non-empty title, positive screen, ordered interval                │
//! │  └── Runs before any storage access                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (seat position, ticket per seat)               │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::{ValidationError, ValidationResult};
use crate::types::{NewShowtime, NewVenue};
use crate::MAX_SCREENS_PER_VENUE;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a movie title.
///
/// ## Rules
/// - Must not be blank
/// - Must be at most 150 characters
///
/// ## Example
/// ```rust
/// use cinema_core::validation::validate_movie_title;
///
/// assert!(validate_movie_title("The Batman").is_ok());
/// assert!(validate_movie_title("   ").is_err());
/// ```
pub fn validate_movie_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "movie_title".to_string(),
        });
    }

    if title.len() > 150 {
        return Err(ValidationError::TooLong {
            field: "movie_title".to_string(),
            max: 150,
        });
    }

    Ok(())
}

/// Validates a screen number.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// The upper bound against the venue's `total_screens` is deliberately
/// not checked here, so venues can renumber or extend screens without
/// orphaning existing showtimes.
pub fn validate_screen_number(screen: i64) -> ValidationResult<()> {
    if screen <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "screen_number".to_string(),
        });
    }

    Ok(())
}

/// Validates a showtime interval: end must come strictly after start.
pub fn validate_time_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ValidationResult<()> {
    if end <= start {
        return Err(ValidationError::InvertedTimeRange);
    }

    Ok(())
}

/// Validates a ticket price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free screenings)
///
/// ## Example
/// ```rust
/// use cinema_core::validation::validate_ticket_price_cents;
///
/// assert!(validate_ticket_price_cents(1250).is_ok()); // 12.50
/// assert!(validate_ticket_price_cents(0).is_ok());    // Free screening
/// assert!(validate_ticket_price_cents(-100).is_err());
/// ```
pub fn validate_ticket_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "ticket_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a venue reference on a showtime.
pub fn validate_venue_reference(venue_id: &str) -> ValidationResult<()> {
    if venue_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "venue_id".to_string(),
        });
    }

    Ok(())
}

/// Validates a UUID string format.
///
/// Transport adapters call this on path/query ids before hitting the
/// services; the services themselves treat unknown ids as `NotFound`
/// rather than rejecting their shape.
///
/// ## Example
/// ```rust
/// use cinema_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Runs full field validation on a showtime candidate.
///
/// Both `create` and `update` call this before any storage access; for
/// updates the candidate is the merged record.
pub fn validate_showtime(candidate: &NewShowtime) -> ValidationResult<()> {
    validate_movie_title(&candidate.movie_title)?;
    validate_time_range(candidate.start_time, candidate.end_time)?;
    validate_screen_number(candidate.screen_number)?;
    validate_ticket_price_cents(candidate.ticket_price_cents)?;
    validate_venue_reference(&candidate.venue_id)?;

    Ok(())
}

/// Validates a seat selection for a booking request.
///
/// ## Rules
/// - Must not be empty
pub fn validate_seat_selection(seat_ids: &[String]) -> ValidationResult<()> {
    if seat_ids.is_empty() {
        return Err(ValidationError::Required {
            field: "seat_ids".to_string(),
        });
    }

    Ok(())
}

/// Validates a venue record before insert.
///
/// ## Rules
/// - Name and address line must not be blank
/// - `total_screens` must be between 1 and 50
pub fn validate_venue(venue: &NewVenue) -> ValidationResult<()> {
    if venue.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if venue.address_line.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "address_line".to_string(),
        });
    }

    if venue.total_screens < 1 || venue.total_screens > MAX_SCREENS_PER_VENUE {
        return Err(ValidationError::OutOfRange {
            field: "total_screens".to_string(),
            min: 1,
            max: MAX_SCREENS_PER_VENUE,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, hour, 0, 0).unwrap()
    }

    fn candidate() -> NewShowtime {
        NewShowtime {
            movie_title: "The Batman".to_string(),
            screen_number: 1,
            start_time: at(19),
            end_time: at(21),
            ticket_price_cents: 1250,
            language: Some("English".to_string()),
            format: Some("2D".to_string()),
            venue_id: "venue-1".to_string(),
        }
    }

    #[test]
    fn test_validate_movie_title() {
        assert!(validate_movie_title("The Batman").is_ok());
        assert!(validate_movie_title("").is_err());
        assert!(validate_movie_title("   ").is_err());
        assert!(validate_movie_title(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_screen_number() {
        assert!(validate_screen_number(1).is_ok());
        assert!(validate_screen_number(50).is_ok());
        assert!(validate_screen_number(0).is_err());
        assert!(validate_screen_number(-3).is_err());
    }

    #[test]
    fn test_validate_time_range() {
        assert!(validate_time_range(at(19), at(21)).is_ok());
        assert!(validate_time_range(at(21), at(19)).is_err());
        // Zero-length interval is also invalid
        assert!(validate_time_range(at(19), at(19)).is_err());
    }

    #[test]
    fn test_validate_ticket_price_cents() {
        assert!(validate_ticket_price_cents(0).is_ok());
        assert!(validate_ticket_price_cents(1250).is_ok());
        assert!(validate_ticket_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_showtime_accepts_valid_candidate() {
        assert!(validate_showtime(&candidate()).is_ok());
    }

    #[test]
    fn test_validate_showtime_rejects_each_violation() {
        let mut c = candidate();
        c.movie_title = " ".to_string();
        assert!(validate_showtime(&c).is_err());

        let mut c = candidate();
        c.end_time = c.start_time;
        assert!(matches!(
            validate_showtime(&c),
            Err(ValidationError::InvertedTimeRange)
        ));

        let mut c = candidate();
        c.screen_number = 0;
        assert!(validate_showtime(&c).is_err());

        let mut c = candidate();
        c.ticket_price_cents = -500;
        assert!(validate_showtime(&c).is_err());

        let mut c = candidate();
        c.venue_id = String::new();
        assert!(validate_showtime(&c).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }

    #[test]
    fn test_validate_seat_selection() {
        assert!(validate_seat_selection(&["seat-1".to_string()]).is_ok());
        assert!(validate_seat_selection(&[]).is_err());
    }

    #[test]
    fn test_validate_venue_screen_bounds() {
        let mut v = NewVenue {
            name: "Odeon Leicester Square".to_string(),
            address_line: "24-26 Leicester Square".to_string(),
            city: "London".to_string(),
            state_or_province: None,
            postcode: Some("WC2H 7JY".to_string()),
            country: Some("UK".to_string()),
            total_screens: 10,
            phone: None,
            email: None,
        };
        assert!(validate_venue(&v).is_ok());

        v.total_screens = 0;
        assert!(validate_venue(&v).is_err());

        v.total_screens = 51;
        assert!(validate_venue(&v).is_err());

        v.total_screens = 50;
        assert!(validate_venue(&v).is_ok());
    }
}
