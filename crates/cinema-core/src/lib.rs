//! # cinema-core: Pure Business Logic for Cinema Scheduling
//!
//! This crate is the **heart** of the scheduling and booking system. It
//! contains all business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cinema Scheduling Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Transport Layer (external)                      │   │
//! │  │    create_showtime, book_seats, get_seat_map, ...              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cinema-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ schedule  │  │ validation│  │   error   │  │   │
//! │  │   │ Showtime  │  │  overlap  │  │   rules   │  │  typed    │  │   │
//! │  │   │  Ticket   │  │   merge   │  │  checks   │  │  errors   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 cinema-db (Database Layer)                      │   │
//! │  │        SQLite queries, migrations, transactional services       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Venue, Showtime, Seat, Ticket)
//! - [`schedule`] - The half-open interval overlap rule and partial update merge
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod schedule;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cinema_core::Showtime` instead of
// `use cinema_core::types::Showtime`

pub use error::ValidationError;
pub use schedule::intervals_overlap;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Row labels for the default seat grid (rows A through E).
///
/// ## Business Reason
/// When a screen has no seat map yet, a deterministic 5x10 grid is
/// materialized on first read. Custom layouts are out of scope.
pub const DEFAULT_ROW_LABELS: &[char] = &['A', 'B', 'C', 'D', 'E'];

/// Seats per row in the default seat grid.
pub const DEFAULT_SEATS_PER_ROW: i64 = 10;

/// Maximum number of screens a single venue can declare.
///
/// ## Business Reason
/// Guards against typo capacities (500 screens) on venue records.
pub const MAX_SCREENS_PER_VENUE: i64 = 50;
