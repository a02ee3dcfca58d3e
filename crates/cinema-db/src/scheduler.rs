//! # Showtime Scheduler
//!
//! Owns showtime records and enforces the per-screen non-overlap
//! invariant on create/update/delete. Also carries the read-only query
//! surface layered over showtime storage.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Scheduler Create                                  │
//! │                                                                         │
//! │  1. VALIDATE FIELDS (pure, before any storage access)                  │
//! │     └── title non-empty, end > start, screen > 0, price >= 0           │
//! │                                                                         │
//! │  2. BEGIN TRANSACTION                                                  │
//! │     ├── venue exists?           → NotFound if absent                   │
//! │     ├── overlapping showtime?   → Conflict if clash                    │
//! │     └── INSERT with generated id + timestamps                          │
//! │                                                                         │
//! │  3. COMMIT (failure at any step leaves no partial state)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The clash check and the insert run inside one write transaction.
//! SQLite holds a single write lock, so two concurrent creates for the
//! same screen cannot both observe "no clash" and both commit; the
//! loser either waits for the winner's commit (and then sees the clash)
//! or fails its commit and surfaces a storage error.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ConflictError, ServiceError, ServiceResult};
use crate::repository::showtime::ShowtimeRepository;
use crate::repository::venue::VenueRepository;
use cinema_core::validation::validate_showtime;
use cinema_core::{NewShowtime, Showtime, ShowtimeFilter, ShowtimeUpdate};

/// Transactional scheduling service for showtimes.
#[derive(Debug, Clone)]
pub struct ShowtimeScheduler {
    pool: SqlitePool,
}

impl ShowtimeScheduler {
    /// Creates a new ShowtimeScheduler.
    pub fn new(pool: SqlitePool) -> Self {
        ShowtimeScheduler { pool }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Creates a showtime.
    ///
    /// ## Failure Order
    /// 1. `Validation` - field violations, checked before storage
    /// 2. `NotFound`   - referenced venue absent
    /// 3. `Conflict`   - overlapping showtime on the same screen
    pub async fn create(&self, input: NewShowtime) -> ServiceResult<Showtime> {
        validate_showtime(&input)?;

        let mut tx = self.pool.begin().await.map_err(crate::error::DbError::from)?;

        if !VenueRepository::exists(&mut tx, &input.venue_id).await? {
            return Err(ServiceError::not_found("Venue", &input.venue_id));
        }

        if ShowtimeRepository::exists_overlapping(
            &mut tx,
            &input.venue_id,
            input.screen_number,
            input.start_time,
            input.end_time,
            None,
        )
        .await?
        {
            return Err(ConflictError::OverlappingShowtime {
                venue_id: input.venue_id.clone(),
                screen_number: input.screen_number,
            }
            .into());
        }

        let now = Utc::now();
        let showtime = Showtime {
            id: Uuid::new_v4().to_string(),
            movie_title: input.movie_title,
            screen_number: input.screen_number,
            start_time: input.start_time,
            end_time: input.end_time,
            ticket_price_cents: input.ticket_price_cents,
            language: input.language,
            format: input.format,
            venue_id: input.venue_id,
            created_at: now,
            updated_at: now,
        };

        ShowtimeRepository::insert(&mut tx, &showtime).await?;
        tx.commit().await.map_err(crate::error::DbError::from)?;

        debug!(id = %showtime.id, title = %showtime.movie_title, "Showtime created");
        Ok(showtime)
    }

    /// Applies a partial update to a showtime.
    ///
    /// Fields left as `None` keep their current value. The merged record
    /// is fully re-validated and clash-checked, excluding the record's
    /// own id, so an update without time changes never conflicts with
    /// itself. An update with no fields at all is a no-op that returns
    /// the stored record without touching `updated_at`.
    pub async fn update(&self, id: &str, update: ShowtimeUpdate) -> ServiceResult<Showtime> {
        let mut tx = self.pool.begin().await.map_err(crate::error::DbError::from)?;

        let existing = ShowtimeRepository::fetch_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Showtime", id))?;

        if update.is_empty() {
            return Ok(existing);
        }

        let merged = update.apply_to(&existing);
        validate_showtime(&merged)?;

        if !VenueRepository::exists(&mut tx, &merged.venue_id).await? {
            return Err(ServiceError::not_found("Venue", &merged.venue_id));
        }

        if ShowtimeRepository::exists_overlapping(
            &mut tx,
            &merged.venue_id,
            merged.screen_number,
            merged.start_time,
            merged.end_time,
            Some(id),
        )
        .await?
        {
            return Err(ConflictError::OverlappingShowtime {
                venue_id: merged.venue_id.clone(),
                screen_number: merged.screen_number,
            }
            .into());
        }

        let showtime = Showtime {
            id: existing.id,
            movie_title: merged.movie_title,
            screen_number: merged.screen_number,
            start_time: merged.start_time,
            end_time: merged.end_time,
            ticket_price_cents: merged.ticket_price_cents,
            language: merged.language,
            format: merged.format,
            venue_id: merged.venue_id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        ShowtimeRepository::update_row(&mut tx, &showtime).await?;
        tx.commit().await.map_err(crate::error::DbError::from)?;

        debug!(id = %showtime.id, "Showtime updated");
        Ok(showtime)
    }

    /// Deletes a showtime, cascading its tickets.
    ///
    /// Returns true when the record existed. A missing id is NOT an
    /// error here - a deliberate soft contract, distinct from reads.
    pub async fn delete(&self, id: &str) -> ServiceResult<bool> {
        let deleted = self.repo().delete(id).await?;
        Ok(deleted)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a showtime by ID, failing with `NotFound` when absent.
    pub async fn get(&self, id: &str) -> ServiceResult<Showtime> {
        self.repo()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Showtime", id))
    }

    /// Lists all showtimes for a venue.
    pub async fn list_by_venue(&self, venue_id: &str) -> ServiceResult<Vec<Showtime>> {
        Ok(self.repo().list_by_venue(venue_id).await?)
    }

    /// Case-insensitive substring search on movie titles.
    pub async fn search_by_title(&self, query: &str) -> ServiceResult<Vec<Showtime>> {
        Ok(self.repo().search_by_title(query).await?)
    }

    /// Lists showtimes for a venue intersecting the window `[from, to)`.
    pub async fn list_in_window(
        &self,
        venue_id: &str,
        from: chrono::DateTime<Utc>,
        to: chrono::DateTime<Utc>,
    ) -> ServiceResult<Vec<Showtime>> {
        Ok(self.repo().list_in_window(venue_id, from, to).await?)
    }

    /// Combined filter over title substring, venue, and time window.
    pub async fn filter(&self, filter: &ShowtimeFilter) -> ServiceResult<Vec<Showtime>> {
        Ok(self.repo().filter(filter).await?)
    }

    fn repo(&self) -> ShowtimeRepository {
        ShowtimeRepository::new(self.pool.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
