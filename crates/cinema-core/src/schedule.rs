//! # Scheduling Rules
//!
//! The pure scheduling logic: the half-open interval overlap rule, the
//! partial update merge, and the default seat grid layout.
//!
//! ## The Overlap Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Half-Open Interval Intersection                            │
//! │                                                                         │
//! │  Existing:      19:30 ──────────── 21:00                               │
//! │                                                                         │
//! │  Candidate A:           20:00 ──────────── 22:00   → CLASH             │
//! │  Candidate B:                      21:00 ── 23:00  → OK (touching)     │
//! │  Candidate C:   17:00 ── 19:30                     → OK (touching)     │
//! │                                                                         │
//! │  Rule: existing.start < candidate.end                                  │
//! │    AND existing.end   > candidate.start                                │
//! │                                                                         │
//! │  Intervals are [start, end) - endpoints that merely touch do not       │
//! │  intersect, so back-to-back screenings on one screen are legal.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::types::{NewShowtime, Showtime, ShowtimeUpdate};
use crate::{DEFAULT_ROW_LABELS, DEFAULT_SEATS_PER_ROW};

// =============================================================================
// Overlap Rule
// =============================================================================

/// Returns true when two half-open `[start, end)` intervals intersect.
///
/// This is the single source of truth for overlap detection; the
/// scheduler's SQL clash query encodes the same comparison.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use cinema_core::schedule::intervals_overlap;
///
/// let s1 = Utc.with_ymd_and_hms(2030, 1, 1, 19, 30, 0).unwrap();
/// let e1 = Utc.with_ymd_and_hms(2030, 1, 1, 21, 0, 0).unwrap();
/// let s2 = Utc.with_ymd_and_hms(2030, 1, 1, 21, 0, 0).unwrap();
/// let e2 = Utc.with_ymd_and_hms(2030, 1, 1, 23, 0, 0).unwrap();
///
/// // Touching at 21:00 is not an overlap
/// assert!(!intervals_overlap(s1, e1, s2, e2));
/// ```
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

// =============================================================================
// Partial Update Merge
// =============================================================================

impl ShowtimeUpdate {
    /// Merges this partial update onto an existing showtime, producing
    /// the candidate record to re-validate and clash-check.
    ///
    /// Fields left as `None` keep the existing value. The result carries
    /// no identity or timestamps; the scheduler owns those.
    pub fn apply_to(&self, existing: &Showtime) -> NewShowtime {
        NewShowtime {
            movie_title: self
                .movie_title
                .clone()
                .unwrap_or_else(|| existing.movie_title.clone()),
            screen_number: self.screen_number.unwrap_or(existing.screen_number),
            start_time: self.start_time.unwrap_or(existing.start_time),
            end_time: self.end_time.unwrap_or(existing.end_time),
            ticket_price_cents: self
                .ticket_price_cents
                .unwrap_or(existing.ticket_price_cents),
            language: self.language.clone().or_else(|| existing.language.clone()),
            format: self.format.clone().or_else(|| existing.format.clone()),
            venue_id: self
                .venue_id
                .clone()
                .unwrap_or_else(|| existing.venue_id.clone()),
        }
    }

    /// Returns true when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.movie_title.is_none()
            && self.screen_number.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.ticket_price_cents.is_none()
            && self.language.is_none()
            && self.format.is_none()
            && self.venue_id.is_none()
    }
}

// =============================================================================
// Default Seat Grid
// =============================================================================

/// Yields the seat positions of the default grid in row-major order:
/// rows A-E ascending, seats 1-10 ascending within each row.
///
/// The seat inventory materializes exactly these positions the first
/// time a seat map is requested for a screen that has none.
pub fn default_grid_positions() -> impl Iterator<Item = (String, i64)> {
    DEFAULT_ROW_LABELS.iter().flat_map(|row| {
        (1..=DEFAULT_SEATS_PER_ROW).map(move |seat| (row.to_string(), seat))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, hour, minute, 0).unwrap()
    }

    fn showtime(screen: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Showtime {
        Showtime {
            id: "st-1".to_string(),
            movie_title: "The Batman".to_string(),
            screen_number: screen,
            start_time: start,
            end_time: end,
            ticket_price_cents: 1250,
            language: Some("English".to_string()),
            format: Some("2D".to_string()),
            venue_id: "venue-1".to_string(),
            created_at: at(0, 0),
            updated_at: at(0, 0),
        }
    }

    #[test]
    fn test_overlap_contained_interval() {
        assert!(intervals_overlap(at(19, 30), at(21, 0), at(20, 0), at(20, 30)));
    }

    #[test]
    fn test_overlap_partial_intersection() {
        assert!(intervals_overlap(at(19, 30), at(21, 0), at(20, 0), at(22, 0)));
        assert!(intervals_overlap(at(20, 0), at(22, 0), at(19, 30), at(21, 0)));
    }

    #[test]
    fn test_overlap_identical_intervals() {
        assert!(intervals_overlap(at(19, 30), at(21, 0), at(19, 30), at(21, 0)));
    }

    #[test]
    fn test_touching_boundaries_do_not_overlap() {
        // Back-to-back screenings share an endpoint but not screen time
        assert!(!intervals_overlap(at(19, 30), at(21, 0), at(21, 0), at(23, 0)));
        assert!(!intervals_overlap(at(21, 0), at(23, 0), at(19, 30), at(21, 0)));
    }

    #[test]
    fn test_disjoint_intervals_do_not_overlap() {
        assert!(!intervals_overlap(at(10, 0), at(12, 0), at(14, 0), at(16, 0)));
    }

    #[test]
    fn test_update_merge_keeps_unsupplied_fields() {
        let existing = showtime(1, at(19, 30), at(21, 0));
        let update = ShowtimeUpdate {
            movie_title: Some("Dune: Part Two".to_string()),
            ..Default::default()
        };

        let merged = update.apply_to(&existing);
        assert_eq!(merged.movie_title, "Dune: Part Two");
        assert_eq!(merged.screen_number, 1);
        assert_eq!(merged.start_time, at(19, 30));
        assert_eq!(merged.ticket_price_cents, 1250);
        assert_eq!(merged.venue_id, "venue-1");
    }

    #[test]
    fn test_update_merge_can_set_zero_price() {
        // Presence markers make an explicit zero distinguishable from
        // "not supplied" - a free screening is representable.
        let existing = showtime(1, at(19, 30), at(21, 0));
        let update = ShowtimeUpdate {
            ticket_price_cents: Some(0),
            ..Default::default()
        };

        let merged = update.apply_to(&existing);
        assert_eq!(merged.ticket_price_cents, 0);
    }

    #[test]
    fn test_empty_update_detection() {
        assert!(ShowtimeUpdate::default().is_empty());
        assert!(!ShowtimeUpdate {
            screen_number: Some(2),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_default_grid_positions_row_major() {
        let positions: Vec<(String, i64)> = default_grid_positions().collect();
        assert_eq!(positions.len(), 50);
        assert_eq!(positions[0], ("A".to_string(), 1));
        assert_eq!(positions[9], ("A".to_string(), 10));
        assert_eq!(positions[10], ("B".to_string(), 1));
        assert_eq!(positions[49], ("E".to_string(), 10));
    }
}
