//! # Database and Service Error Types
//!
//! Error types for storage operations and the service-level taxonomy.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (this module) ← Validation / NotFound / Conflict         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Transport adapter maps each kind to a distinct outward signal         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A UNIQUE violation on `tickets (showtime_id, seat_id)` reaching the
//! booking service is translated into the same `Conflict` the in-process
//! check would have produced, so callers never see a lost race as an
//! internal fault.

use thiserror::Error;

use cinema_core::ValidationError;

// =============================================================================
// Database Error
// =============================================================================

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and service-level translation.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Duplicate seat position for a screen
    /// - Second ticket for the same (showtime, seat)
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Referencing non-existent venue_id / showtime_id / seat_id
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True when this error is a UNIQUE constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // UNIQUE: "UNIQUE constraint failed: <table>.<column>, ..."
                // FK:     "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let constraint = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation { constraint }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Conflict Error
// =============================================================================

/// Scheduling and booking conflicts: the requested slot or seat is taken.
///
/// Callers should retry with a different time slot or seat selection.
#[derive(Debug, Error)]
pub enum ConflictError {
    /// Another showtime occupies overlapping time on the same screen.
    #[error("Overlapping showtime for venue={venue_id}, screen={screen_number}")]
    OverlappingShowtime {
        venue_id: String,
        screen_number: i64,
    },

    /// At least one requested seat already holds a ticket for the showtime.
    #[error("one or more seats are already booked for showtime {showtime_id}")]
    SeatsAlreadyBooked { showtime_id: String },
}

// =============================================================================
// Service Error
// =============================================================================

/// Service-level error taxonomy for scheduling and booking operations.
///
/// Each kind maps to a distinct outward signal so callers can tell
/// "fix your input" (`Validation`) from "resource missing" (`NotFound`)
/// from "try a different slot/seat" (`Conflict`) without parsing
/// message text. `Db` carries infrastructure faults.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or semantically invalid input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced venue, showtime, or seat does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Overlapping showtime or seat already booked.
    #[error("{0}")]
    Conflict(#[from] ConflictError),

    /// Storage-layer failure unrelated to the request semantics.
    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

impl ServiceError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================
