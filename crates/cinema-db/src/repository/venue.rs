//! # Venue Repository
//!
//! Database operations for venues.
//!
//! The scheduling core only needs venue existence; the rest of the CRUD
//! surface backs the venue-management collaborator, the seed binary, and
//! tests.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult, ServiceResult};
use cinema_core::validation::validate_venue;
use cinema_core::{NewVenue, Venue};

/// Repository for venue database operations.
#[derive(Debug, Clone)]
pub struct VenueRepository {
    pool: SqlitePool,
}

impl VenueRepository {
    /// Creates a new VenueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VenueRepository { pool }
    }

    /// Creates a venue with a generated ID and timestamps.
    ///
    /// Field rules (non-blank name and address, screen count 1..=50)
    /// are checked before the insert; the schema CHECK on
    /// `total_screens` is the backstop for writes that bypass this
    /// path.
    pub async fn create(&self, input: NewVenue) -> ServiceResult<Venue> {
        validate_venue(&input)?;

        let now = Utc::now();
        let venue = Venue {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            address_line: input.address_line,
            city: input.city,
            state_or_province: input.state_or_province,
            postcode: input.postcode,
            country: input.country,
            total_screens: input.total_screens,
            phone: input.phone,
            email: input.email,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %venue.id, name = %venue.name, "Inserting venue");

        sqlx::query(
            r#"
            INSERT INTO venues (
                id, name, address_line, city, state_or_province,
                postcode, country, total_screens, phone, email,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&venue.id)
        .bind(&venue.name)
        .bind(&venue.address_line)
        .bind(&venue.city)
        .bind(&venue.state_or_province)
        .bind(&venue.postcode)
        .bind(&venue.country)
        .bind(venue.total_screens)
        .bind(&venue.phone)
        .bind(&venue.email)
        .bind(venue.created_at)
        .bind(venue.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        Ok(venue)
    }

    /// Gets a venue by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Venue>> {
        let venue = sqlx::query_as::<_, Venue>(
            r#"
            SELECT id, name, address_line, city, state_or_province,
                   postcode, country, total_screens, phone, email,
                   created_at, updated_at
            FROM venues
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(venue)
    }

    /// Checks whether a venue exists, using the given connection so the
    /// check can participate in a service transaction.
    pub async fn exists(conn: &mut SqliteConnection, id: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM venues WHERE id = ?1)")
                .bind(id)
                .fetch_one(conn)
                .await?;

        Ok(exists)
    }

    /// Lists all venues, newest first.
    pub async fn list(&self) -> DbResult<Vec<Venue>> {
        let venues = sqlx::query_as::<_, Venue>(
            r#"
            SELECT id, name, address_line, city, state_or_province,
                   postcode, country, total_screens, phone, email,
                   created_at, updated_at
            FROM venues
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }

    /// Lists venues in a city (case-insensitive).
    pub async fn list_by_city(&self, city: &str) -> DbResult<Vec<Venue>> {
        let venues = sqlx::query_as::<_, Venue>(
            r#"
            SELECT id, name, address_line, city, state_or_province,
                   postcode, country, total_screens, phone, email,
                   created_at, updated_at
            FROM venues
            WHERE LOWER(city) = LOWER(?1)
            ORDER BY name
            "#,
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }

    /// Deletes a venue, cascading its showtimes (and their tickets).
    ///
    /// Returns true when a row was removed.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting venue");

        let result = sqlx::query("DELETE FROM venues WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts venues.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
