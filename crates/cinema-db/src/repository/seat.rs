//! # Seat Repository
//!
//! Database operations for seat rows.
//!
//! Seats are append-only: the inventory materializes a grid once per
//! (venue, screen) and the core never mutates or deletes seats. The
//! UNIQUE constraint on (venue_id, screen_number, row_label, seat_number)
//! makes `INSERT OR IGNORE` an idempotent "ensure exists" operation.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use cinema_core::Seat;

/// Column list shared by every seat SELECT.
const SEAT_COLUMNS: &str = "id, venue_id, screen_number, row_label, seat_number, created_at";

/// Repository for seat database operations.
#[derive(Debug, Clone)]
pub struct SeatRepository {
    pool: SqlitePool,
}

impl SeatRepository {
    /// Creates a new SeatRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SeatRepository { pool }
    }

    // =========================================================================
    // Transaction-scoped operations
    // =========================================================================

    /// Fetches a seat by ID on the given connection.
    pub async fn fetch_by_id(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(seat)
    }

    /// All seats for a (venue, screen), ordered row-major for a stable,
    /// human-readable seat map: row letter ascending, seat number
    /// ascending.
    pub async fn fetch_grid(
        conn: &mut SqliteConnection,
        venue_id: &str,
        screen_number: i64,
    ) -> DbResult<Vec<Seat>> {
        let seats = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats \
             WHERE venue_id = ?1 AND screen_number = ?2 \
             ORDER BY row_label ASC, seat_number ASC"
        ))
        .bind(venue_id)
        .bind(screen_number)
        .fetch_all(conn)
        .await?;

        Ok(seats)
    }

    /// Inserts a seat, silently skipping rows that would violate the
    /// position uniqueness constraint. Concurrent first-reads of the
    /// same screen race to materialize the grid; whoever loses each row
    /// simply keeps the winner's.
    pub async fn insert_ignore(conn: &mut SqliteConnection, seat: &Seat) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO seats (
                id, venue_id, screen_number, row_label, seat_number, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&seat.id)
        .bind(&seat.venue_id)
        .bind(seat.screen_number)
        .bind(&seat.row_label)
        .bind(seat.seat_number)
        .bind(seat.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Pool-backed reads
    // =========================================================================

    /// Gets a seat by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Seat>> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch_by_id(&mut conn, id).await
    }

    /// Counts seats for a (venue, screen).
    pub async fn count_for_screen(&self, venue_id: &str, screen_number: i64) -> DbResult<i64> {
        debug!(venue_id = %venue_id, screen = screen_number, "Counting seats");

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM seats WHERE venue_id = ?1 AND screen_number = ?2",
        )
        .bind(venue_id)
        .bind(screen_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
