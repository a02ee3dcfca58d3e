//! # Showtime Repository
//!
//! Database operations for showtime rows, including the overlap clash
//! query and the read-side filters.
//!
//! ## The Clash Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Overlap Detection in SQL                                   │
//! │                                                                         │
//! │  Candidate: (venue, screen, [start, end))                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT EXISTS (... WHERE venue_id = ? AND screen_number = ?           │
//! │                       AND start_time < candidate.end                   │
//! │                       AND end_time   > candidate.start                 │
//! │                       AND id <> exclude_id)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  true  → ConflictError at the service layer                            │
//! │  false → safe to persist (within the same write transaction)           │
//! │                                                                         │
//! │  Same comparison as cinema_core::intervals_overlap - touching          │
//! │  boundaries do not clash.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use cinema_core::{Showtime, ShowtimeFilter};

/// Column list shared by every showtime SELECT.
const SHOWTIME_COLUMNS: &str = "id, movie_title, screen_number, start_time, end_time, \
     ticket_price_cents, language, format, venue_id, created_at, updated_at";

/// Repository for showtime database operations.
#[derive(Debug, Clone)]
pub struct ShowtimeRepository {
    pool: SqlitePool,
}

impl ShowtimeRepository {
    /// Creates a new ShowtimeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShowtimeRepository { pool }
    }

    // =========================================================================
    // Transaction-scoped operations
    // =========================================================================
    // These take a connection so the scheduler can keep its
    // check-then-write sequence inside one write transaction.

    /// Fetches a showtime by ID on the given connection.
    pub async fn fetch_by_id(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> DbResult<Option<Showtime>> {
        let showtime = sqlx::query_as::<_, Showtime>(&format!(
            "SELECT {SHOWTIME_COLUMNS} FROM showtimes WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(showtime)
    }

    /// Returns true when any persisted showtime on the same venue and
    /// screen intersects the half-open candidate interval.
    ///
    /// `exclude_id` removes the record's own row from the search so an
    /// update never clashes with itself.
    pub async fn exists_overlapping(
        conn: &mut SqliteConnection,
        venue_id: &str,
        screen_number: i64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        exclude_id: Option<&str>,
    ) -> DbResult<bool> {
        let clash: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM showtimes
                WHERE venue_id = ?1
                  AND screen_number = ?2
                  AND start_time < ?3
                  AND end_time > ?4
                  AND (?5 IS NULL OR id <> ?5)
            )
            "#,
        )
        .bind(venue_id)
        .bind(screen_number)
        .bind(end_time)
        .bind(start_time)
        .bind(exclude_id)
        .fetch_one(conn)
        .await?;

        Ok(clash)
    }

    /// Inserts a complete showtime row on the given connection.
    pub async fn insert(conn: &mut SqliteConnection, showtime: &Showtime) -> DbResult<()> {
        debug!(id = %showtime.id, title = %showtime.movie_title, "Inserting showtime");

        sqlx::query(
            r#"
            INSERT INTO showtimes (
                id, movie_title, screen_number, start_time, end_time,
                ticket_price_cents, language, format, venue_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&showtime.id)
        .bind(&showtime.movie_title)
        .bind(showtime.screen_number)
        .bind(showtime.start_time)
        .bind(showtime.end_time)
        .bind(showtime.ticket_price_cents)
        .bind(&showtime.language)
        .bind(&showtime.format)
        .bind(&showtime.venue_id)
        .bind(showtime.created_at)
        .bind(showtime.updated_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Replaces the mutable fields of a showtime row on the given
    /// connection. `created_at` is never touched.
    pub async fn update_row(conn: &mut SqliteConnection, showtime: &Showtime) -> DbResult<()> {
        debug!(id = %showtime.id, "Updating showtime");

        sqlx::query(
            r#"
            UPDATE showtimes SET
                movie_title = ?2,
                screen_number = ?3,
                start_time = ?4,
                end_time = ?5,
                ticket_price_cents = ?6,
                language = ?7,
                format = ?8,
                venue_id = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&showtime.id)
        .bind(&showtime.movie_title)
        .bind(showtime.screen_number)
        .bind(showtime.start_time)
        .bind(showtime.end_time)
        .bind(showtime.ticket_price_cents)
        .bind(&showtime.language)
        .bind(&showtime.format)
        .bind(&showtime.venue_id)
        .bind(showtime.updated_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Pool-backed reads
    // =========================================================================

    /// Gets a showtime by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Showtime>> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch_by_id(&mut conn, id).await
    }

    /// Lists all showtimes for a venue, earliest first.
    pub async fn list_by_venue(&self, venue_id: &str) -> DbResult<Vec<Showtime>> {
        let showtimes = sqlx::query_as::<_, Showtime>(&format!(
            "SELECT {SHOWTIME_COLUMNS} FROM showtimes \
             WHERE venue_id = ?1 ORDER BY start_time"
        ))
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(showtimes)
    }

    /// Case-insensitive substring search on the movie title.
    pub async fn search_by_title(&self, query: &str) -> DbResult<Vec<Showtime>> {
        debug!(query = %query, "Searching showtimes by title");

        let pattern = format!("%{}%", query.trim().to_lowercase());

        let showtimes = sqlx::query_as::<_, Showtime>(&format!(
            "SELECT {SHOWTIME_COLUMNS} FROM showtimes \
             WHERE LOWER(movie_title) LIKE ?1 ORDER BY start_time"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(showtimes)
    }

    /// Lists showtimes for a venue intersecting the half-open window
    /// `[from, to)` - the same comparison as the overlap rule.
    pub async fn list_in_window(
        &self,
        venue_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<Vec<Showtime>> {
        let showtimes = sqlx::query_as::<_, Showtime>(&format!(
            "SELECT {SHOWTIME_COLUMNS} FROM showtimes \
             WHERE venue_id = ?1 AND start_time < ?3 AND end_time > ?2 \
             ORDER BY start_time"
        ))
        .bind(venue_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(showtimes)
    }

    /// Combined filter: every supplied predicate is applied
    /// conjunctively; absent predicates impose no restriction.
    pub async fn filter(&self, filter: &ShowtimeFilter) -> DbResult<Vec<Showtime>> {
        let mut qb: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(format!(
            "SELECT {SHOWTIME_COLUMNS} FROM showtimes WHERE 1 = 1"
        ));

        if let Some(title) = &filter.title {
            qb.push(" AND LOWER(movie_title) LIKE ");
            qb.push_bind(format!("%{}%", title.trim().to_lowercase()));
        }
        if let Some(venue_id) = &filter.venue_id {
            qb.push(" AND venue_id = ");
            qb.push_bind(venue_id);
        }
        if let Some(from) = filter.from {
            qb.push(" AND end_time > ");
            qb.push_bind(from);
        }
        if let Some(to) = filter.to {
            qb.push(" AND start_time < ");
            qb.push_bind(to);
        }

        qb.push(" ORDER BY start_time");

        let showtimes = qb
            .build_query_as::<Showtime>()
            .fetch_all(&self.pool)
            .await?;

        Ok(showtimes)
    }

    /// Deletes a showtime (cascading its tickets).
    ///
    /// Returns true when a row was removed; absent ids are not an error.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting showtime");

        let result = sqlx::query("DELETE FROM showtimes WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts showtimes.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM showtimes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
