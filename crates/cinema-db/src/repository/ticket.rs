//! # Ticket Repository
//!
//! Database operations for ticket rows.
//!
//! Tickets are created only by the booking ledger, never updated, and
//! removed only by the showtime delete cascade. The UNIQUE constraint on
//! (showtime_id, seat_id) is the authoritative double-booking guard; the
//! ledger's in-process check is just the fast path.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use cinema_core::Ticket;

/// Column list shared by every ticket SELECT.
const TICKET_COLUMNS: &str = "id, showtime_id, seat_id, price_cents, booked_at";

/// Repository for ticket database operations.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: SqlitePool,
}

impl TicketRepository {
    /// Creates a new TicketRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TicketRepository { pool }
    }

    // =========================================================================
    // Transaction-scoped operations
    // =========================================================================

    /// Inserts a ticket on the given connection.
    ///
    /// A UNIQUE violation here means another booking won the race for
    /// the seat; the ledger translates it into a conflict.
    pub async fn insert(conn: &mut SqliteConnection, ticket: &Ticket) -> DbResult<()> {
        debug!(
            showtime_id = %ticket.showtime_id,
            seat_id = %ticket.seat_id,
            "Inserting ticket"
        );

        sqlx::query(
            r#"
            INSERT INTO tickets (id, showtime_id, seat_id, price_cents, booked_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&ticket.id)
        .bind(&ticket.showtime_id)
        .bind(&ticket.seat_id)
        .bind(ticket.price_cents)
        .bind(ticket.booked_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Returns true when a ticket already exists for (showtime, seat).
    pub async fn exists_for_seat(
        conn: &mut SqliteConnection,
        showtime_id: &str,
        seat_id: &str,
    ) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM tickets WHERE showtime_id = ?1 AND seat_id = ?2)",
        )
        .bind(showtime_id)
        .bind(seat_id)
        .fetch_one(conn)
        .await?;

        Ok(exists)
    }

    // =========================================================================
    // Pool-backed reads
    // =========================================================================

    /// Lists all tickets for a showtime, booking order.
    pub async fn list_for_showtime(&self, showtime_id: &str) -> DbResult<Vec<Ticket>> {
        let tickets = sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets \
             WHERE showtime_id = ?1 ORDER BY booked_at"
        ))
        .bind(showtime_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tickets)
    }

    /// Counts tickets for a showtime.
    pub async fn count_for_showtime(&self, showtime_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE showtime_id = ?1")
                .bind(showtime_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
