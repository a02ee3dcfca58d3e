//! # Error Types
//!
//! Domain-specific error types for cinema-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cinema-core errors (this file)                                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cinema-db errors (separate crate)                                     │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── ServiceError     - Validation / NotFound / Conflict taxonomy      │
//! │                                                                         │
//! │  Flow: ValidationError → ServiceError → transport adapter → caller     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, ID, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet business rules.
/// Every mutating operation validates fully before any write.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be non-negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// A time interval whose end does not come strictly after its start.
    #[error("endTime must be after startTime")]
    InvertedTimeRange,

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A seat in a booking request sits on a different venue or screen
    /// than the showtime being booked.
    #[error("seat {seat_id} does not belong to this showtime's screen")]
    SeatScreenMismatch { seat_id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "movie_title".to_string(),
        };
        assert_eq!(err.to_string(), "movie_title is required");

        let err = ValidationError::InvertedTimeRange;
        assert_eq!(err.to_string(), "endTime must be after startTime");

        let err = ValidationError::SeatScreenMismatch {
            seat_id: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "seat abc does not belong to this showtime's screen"
        );
    }
}
