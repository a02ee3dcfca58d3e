//! # Booking Ledger
//!
//! Owns ticket records: atomically converts a seat-selection request
//! into tickets for a showtime, rejecting the whole batch if any seat
//! is invalid or already taken.
//!
//! ## Booking Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  book_seats(showtime, [seats])                          │
//! │                                                                         │
//! │  1. seat list non-empty?        → Validation if empty                  │
//! │  2. BEGIN TRANSACTION                                                  │
//! │     ├── showtime exists?        → NotFound                             │
//! │     ├── every seat resolves?    → NotFound                             │
//! │     ├── seats on this screen?   → Validation                           │
//! │     ├── none already ticketed?  → Conflict (fast path)                 │
//! │     └── INSERT one ticket per seat, price copied from showtime         │
//! │         └── UNIQUE (showtime, seat) violation → Conflict (lost race)   │
//! │  3. COMMIT - all-or-nothing: a failure at any step books nothing       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The in-process "already ticketed" check is only the fast-path
//! rejection; the UNIQUE constraint is the correctness guarantee, and
//! its violation is translated back into the same conflict the check
//! would have produced.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ConflictError, DbError, ServiceError, ServiceResult};
use crate::inventory::SeatInventory;
use crate::repository::seat::SeatRepository;
use crate::repository::showtime::ShowtimeRepository;
use crate::repository::ticket::TicketRepository;
use cinema_core::validation::validate_seat_selection;
use cinema_core::{SeatStatus, SeatStatusEntry, Ticket, ValidationError};

/// Transactional booking service for tickets.
#[derive(Debug, Clone)]
pub struct BookingLedger {
    pool: SqlitePool,
}

impl BookingLedger {
    /// Creates a new BookingLedger.
    pub fn new(pool: SqlitePool) -> Self {
        BookingLedger { pool }
    }

    /// Books the given seats for a showtime, creating one ticket per
    /// seat with the price copied from the showtime's current ticket
    /// price. All-or-nothing: if any seat is invalid or taken, no
    /// ticket is created.
    pub async fn book_seats(
        &self,
        showtime_id: &str,
        seat_ids: &[String],
    ) -> ServiceResult<Vec<Ticket>> {
        validate_seat_selection(seat_ids)?;

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let showtime = ShowtimeRepository::fetch_by_id(&mut tx, showtime_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Showtime", showtime_id))?;

        // Resolve every requested seat; a short list is a NotFound for
        // the whole request
        let mut seats = Vec::with_capacity(seat_ids.len());
        for seat_id in seat_ids {
            let seat = SeatRepository::fetch_by_id(&mut tx, seat_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Seat", seat_id))?;
            seats.push(seat);
        }

        // Every seat must sit on the showtime's venue and screen
        for seat in &seats {
            if seat.venue_id != showtime.venue_id
                || seat.screen_number != showtime.screen_number
            {
                return Err(ValidationError::SeatScreenMismatch {
                    seat_id: seat.id.clone(),
                }
                .into());
            }
        }

        // Fast-path rejection before any insert
        for seat in &seats {
            if TicketRepository::exists_for_seat(&mut tx, showtime_id, &seat.id).await? {
                return Err(ConflictError::SeatsAlreadyBooked {
                    showtime_id: showtime_id.to_string(),
                }
                .into());
            }
        }

        let now = Utc::now();
        let mut tickets = Vec::with_capacity(seats.len());
        for seat in &seats {
            let ticket = Ticket {
                id: Uuid::new_v4().to_string(),
                showtime_id: showtime_id.to_string(),
                seat_id: seat.id.clone(),
                price_cents: showtime.ticket_price_cents,
                booked_at: now,
            };

            match TicketRepository::insert(&mut tx, &ticket).await {
                Ok(()) => tickets.push(ticket),
                // Another booking won the race between our check and
                // this insert; same outward conflict as the fast path
                Err(err) if err.is_unique_violation() => {
                    return Err(ConflictError::SeatsAlreadyBooked {
                        showtime_id: showtime_id.to_string(),
                    }
                    .into());
                }
                Err(err) => return Err(err.into()),
            }
        }

        tx.commit().await.map_err(DbError::from)?;

        debug!(
            showtime_id = %showtime_id,
            count = tickets.len(),
            "Seats booked"
        );
        Ok(tickets)
    }

    /// Returns the seat map for a showtime: every seat of the
    /// showtime's screen, labeled `Booked` when a ticket references it
    /// and `Free` otherwise.
    ///
    /// Read-only apart from the lazy grid materialization it may
    /// trigger on a screen's first read.
    pub async fn seat_map(&self, showtime_id: &str) -> ServiceResult<Vec<SeatStatusEntry>> {
        let showtime = ShowtimeRepository::new(self.pool.clone())
            .get_by_id(showtime_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Showtime", showtime_id))?;

        let seats = SeatInventory::new(self.pool.clone())
            .resolve_seat_grid(&showtime.venue_id, showtime.screen_number)
            .await?;

        let tickets = TicketRepository::new(self.pool.clone())
            .list_for_showtime(showtime_id)
            .await?;
        let booked: HashSet<&str> = tickets.iter().map(|t| t.seat_id.as_str()).collect();

        let entries = seats
            .into_iter()
            .map(|seat| {
                let status = if booked.contains(seat.id.as_str()) {
                    SeatStatus::Booked
                } else {
                    SeatStatus::Free
                };
                SeatStatusEntry {
                    seat_id: seat.id,
                    row_label: seat.row_label,
                    seat_number: seat.seat_number,
                    status,
                }
            })
            .collect();

        Ok(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{DateTime, TimeZone};
    use cinema_core::{NewShowtime, NewVenue};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, hour, minute, 0).unwrap()
    }

    /// Venue + showtime on screen 1 with a materialized grid.
    async fn booking_fixture() -> (Database, String, Vec<String>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let venue = db
            .venues()
            .create(NewVenue {
                name: "Odeon Leicester Square".to_string(),
                address_line: "24-26 Leicester Square".to_string(),
                city: "London".to_string(),
                state_or_province: None,
                postcode: Some("WC2H 7JY".to_string()),
                country: Some("UK".to_string()),
                total_screens: 10,
                phone: None,
                email: None,
            })
            .await
            .unwrap();

        let showtime = db
            .scheduler()
            .create(NewShowtime {
                movie_title: "The Batman".to_string(),
                screen_number: 1,
                start_time: at(19, 30),
                end_time: at(21, 0),
                ticket_price_cents: 1250,
                language: Some("English".to_string()),
                format: Some("2D".to_string()),
                venue_id: venue.id.clone(),
            })
            .await
            .unwrap();

        let seats = db.inventory().resolve_seat_grid(&venue.id, 1).await.unwrap();
        let seat_ids = seats.into_iter().map(|s| s.id).collect();

        (db, showtime.id, seat_ids)
    }

    #[tokio::test]
    async fn test_booking_creates_one_ticket_per_seat_with_copied_price() {
        let (db, showtime_id, seat_ids) = booking_fixture().await;

        let tickets = db
            .bookings()
            .book_seats(&showtime_id, &seat_ids[0..2])
            .await
            .unwrap();

        assert_eq!(tickets.len(), 2);
        assert!(tickets.iter().all(|t| t.price_cents == 1250));
        assert_eq!(
            db.tickets().count_for_showtime(&showtime_id).await.unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_empty_seat_list_is_validation_error() {
        let (db, showtime_id, _) = booking_fixture().await;

        let result = db.bookings().book_seats(&showtime_id, &[]).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_showtime_is_not_found() {
        let (db, _, seat_ids) = booking_fixture().await;

        let result = db
            .bookings()
            .book_seats("no-such-showtime", &seat_ids[0..1])
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_unknown_seat_is_not_found_and_books_nothing() {
        let (db, showtime_id, seat_ids) = booking_fixture().await;

        let request = vec![seat_ids[0].clone(), "no-such-seat".to_string()];
        let result = db.bookings().book_seats(&showtime_id, &request).await;

        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
        assert_eq!(
            db.tickets().count_for_showtime(&showtime_id).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_seat_from_other_screen_is_validation_error() {
        let (db, showtime_id, _) = booking_fixture().await;

        // Materialize screen 2 and try its seats against the screen 1
        // showtime
        let venue_id = db
            .scheduler()
            .get(&showtime_id)
            .await
            .unwrap()
            .venue_id;
        let other_screen = db.inventory().resolve_seat_grid(&venue_id, 2).await.unwrap();

        let result = db
            .bookings()
            .book_seats(&showtime_id, &[other_screen[0].id.clone()])
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::Validation(
                ValidationError::SeatScreenMismatch { .. }
            ))
        ));
        assert_eq!(
            db.tickets().count_for_showtime(&showtime_id).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_repeat_booking_is_conflict_and_count_unchanged() {
        let (db, showtime_id, seat_ids) = booking_fixture().await;
        let ledger = db.bookings();

        // A1 + A2 succeed once
        ledger
            .book_seats(&showtime_id, &seat_ids[0..2])
            .await
            .unwrap();

        // The identical call conflicts and adds nothing
        let result = ledger.book_seats(&showtime_id, &seat_ids[0..2]).await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert_eq!(
            db.tickets().count_for_showtime(&showtime_id).await.unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_booking_is_all_or_nothing() {
        let (db, showtime_id, seat_ids) = booking_fixture().await;
        let ledger = db.bookings();

        // A1 is taken by an earlier booking
        let prior = ledger
            .book_seats(&showtime_id, &seat_ids[0..1])
            .await
            .unwrap();

        // Requesting {A1, A2} fails outright: A2 gains no ticket and
        // A1's prior ticket is unchanged
        let result = ledger.book_seats(&showtime_id, &seat_ids[0..2]).await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));

        let tickets = db.tickets().list_for_showtime(&showtime_id).await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].id, prior[0].id);
        assert_eq!(tickets[0].seat_id, seat_ids[0]);
    }

    #[tokio::test]
    async fn test_seat_map_partition_matches_ticket_table() {
        let (db, showtime_id, seat_ids) = booking_fixture().await;

        db.bookings()
            .book_seats(&showtime_id, &seat_ids[0..3])
            .await
            .unwrap();

        let map = db.bookings().seat_map(&showtime_id).await.unwrap();
        assert_eq!(map.len(), 50);

        let booked: Vec<&SeatStatusEntry> = map
            .iter()
            .filter(|e| e.status == SeatStatus::Booked)
            .collect();
        assert_eq!(booked.len(), 3);
        // Booked iff a ticket exists for (showtime, seat)
        for entry in &map {
            let has_ticket = seat_ids[0..3].contains(&entry.seat_id);
            assert_eq!(entry.status == SeatStatus::Booked, has_ticket);
        }
    }

    #[tokio::test]
    async fn test_seat_map_triggers_lazy_grid() {
        let (db, showtime_id, _) = booking_fixture().await;

        // A second showtime on a screen nobody has looked at yet
        let venue_id = db.scheduler().get(&showtime_id).await.unwrap().venue_id;
        let fresh = db
            .scheduler()
            .create(NewShowtime {
                movie_title: "Inside Out 2".to_string(),
                screen_number: 3,
                start_time: at(14, 0),
                end_time: at(16, 0),
                ticket_price_cents: 999,
                language: Some("English".to_string()),
                format: Some("2D".to_string()),
                venue_id,
            })
            .await
            .unwrap();

        let map = db.bookings().seat_map(&fresh.id).await.unwrap();
        assert_eq!(map.len(), 50);
        assert!(map.iter().all(|e| e.status == SeatStatus::Free));
    }

    #[tokio::test]
    async fn test_seat_map_missing_showtime_is_not_found() {
        let (db, _, _) = booking_fixture().await;

        let result = db.bookings().seat_map("no-such-showtime").await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_deleting_showtime_cascades_tickets() {
        let (db, showtime_id, seat_ids) = booking_fixture().await;

        db.bookings()
            .book_seats(&showtime_id, &seat_ids[0..2])
            .await
            .unwrap();
        assert!(db.scheduler().delete(&showtime_id).await.unwrap());

        assert_eq!(
            db.tickets().count_for_showtime(&showtime_id).await.unwrap(),
            0
        );
    }
}
