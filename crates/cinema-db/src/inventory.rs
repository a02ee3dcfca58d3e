//! # Seat Inventory
//!
//! Owns the mapping from (venue, screen) to the set of bookable seat
//! identities. A screen with no seat map yet gets a deterministic
//! default grid (rows A-E, seats 1-10) materialized on first read.
//!
//! ## Lazy Materialization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              resolve_seat_grid(venue, screen)                           │
//! │                                                                         │
//! │  SELECT seats ORDER BY row_label, seat_number                          │
//! │       │                                                                 │
//! │       ├── rows found → return them (no writes)                         │
//! │       │                                                                 │
//! │       └── empty → INSERT OR IGNORE the 50 default positions            │
//! │                   └── re-SELECT and return                             │
//! │                                                                         │
//! │  The UNIQUE (venue, screen, row, seat) constraint plus INSERT OR       │
//! │  IGNORE make this an idempotent "ensure exists": concurrent first      │
//! │  reads of the same screen cannot create duplicate grids.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, ServiceResult};
use crate::repository::seat::SeatRepository;
use cinema_core::schedule::default_grid_positions;
use cinema_core::Seat;

/// Seat inventory service: resolves (and lazily materializes) seat grids.
#[derive(Debug, Clone)]
pub struct SeatInventory {
    pool: SqlitePool,
}

impl SeatInventory {
    /// Creates a new SeatInventory.
    pub fn new(pool: SqlitePool) -> Self {
        SeatInventory { pool }
    }

    /// Returns the seat grid for a (venue, screen) in row-major order,
    /// materializing the default 5x10 grid first if none exists.
    ///
    /// Materialization happens at most once per screen; subsequent
    /// calls are pure reads.
    pub async fn resolve_seat_grid(
        &self,
        venue_id: &str,
        screen_number: i64,
    ) -> ServiceResult<Vec<Seat>> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let seats = SeatRepository::fetch_grid(&mut tx, venue_id, screen_number).await?;
        if !seats.is_empty() {
            tx.commit().await.map_err(DbError::from)?;
            return Ok(seats);
        }

        debug!(
            venue_id = %venue_id,
            screen = screen_number,
            "Materializing default seat grid"
        );

        let now = Utc::now();
        for (row_label, seat_number) in default_grid_positions() {
            let seat = Seat {
                id: Uuid::new_v4().to_string(),
                venue_id: venue_id.to_string(),
                screen_number,
                row_label,
                seat_number,
                created_at: now,
            };
            SeatRepository::insert_ignore(&mut tx, &seat).await?;
        }

        let seats = SeatRepository::fetch_grid(&mut tx, venue_id, screen_number).await?;
        tx.commit().await.map_err(DbError::from)?;

        Ok(seats)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use cinema_core::NewVenue;

    async fn db_with_venue() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let venue = db
            .venues()
            .create(NewVenue {
                name: "BFI IMAX Waterloo".to_string(),
                address_line: "1 Charlie Chaplin Walk".to_string(),
                city: "London".to_string(),
                state_or_province: None,
                postcode: Some("SE1 8XR".to_string()),
                country: Some("UK".to_string()),
                total_screens: 5,
                phone: None,
                email: None,
            })
            .await
            .unwrap();
        (db, venue.id)
    }

    #[tokio::test]
    async fn test_first_read_materializes_default_grid() {
        let (db, venue_id) = db_with_venue().await;

        let seats = db.inventory().resolve_seat_grid(&venue_id, 1).await.unwrap();

        assert_eq!(seats.len(), 50);
        // Row-major order: A1..A10, then B1..
        assert_eq!(seats[0].row_label, "A");
        assert_eq!(seats[0].seat_number, 1);
        assert_eq!(seats[9].row_label, "A");
        assert_eq!(seats[9].seat_number, 10);
        assert_eq!(seats[10].row_label, "B");
        assert_eq!(seats[49].row_label, "E");
        assert_eq!(seats[49].seat_number, 10);
    }

    #[tokio::test]
    async fn test_repeat_reads_do_not_regenerate() {
        let (db, venue_id) = db_with_venue().await;
        let inventory = db.inventory();

        let first = inventory.resolve_seat_grid(&venue_id, 2).await.unwrap();
        let second = inventory.resolve_seat_grid(&venue_id, 2).await.unwrap();

        assert_eq!(first.len(), 50);
        assert_eq!(second.len(), 50);
        // Same identities on every read - the grid was persisted once
        let first_ids: Vec<&str> = first.iter().map(|s| s.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);

        assert_eq!(db.seats().count_for_screen(&venue_id, 2).await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_screens_have_independent_grids() {
        let (db, venue_id) = db_with_venue().await;
        let inventory = db.inventory();

        let screen1 = inventory.resolve_seat_grid(&venue_id, 1).await.unwrap();
        let screen2 = inventory.resolve_seat_grid(&venue_id, 2).await.unwrap();

        assert_eq!(screen1.len(), 50);
        assert_eq!(screen2.len(), 50);
        assert!(screen1.iter().all(|s| s.screen_number == 1));
        assert!(screen2.iter().all(|s| s.screen_number == 2));
    }
}
