//! # cinema-db: Storage and Services for the Cinema Scheduling Core
//!
//! This crate provides database access and the transactional services
//! built on top of it. It uses SQLite for local storage with sqlx for
//! async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cinema Scheduling Data Flow                         │
//! │                                                                         │
//! │  Caller (create_showtime / book_seats / seat_map)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     cinema-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────┐        ┌──────────────────────────┐    │   │
//! │  │   │     Services      │        │      Repositories        │    │   │
//! │  │   │                   │        │                          │    │   │
//! │  │   │ ShowtimeScheduler │───────►│ VenueRepository          │    │   │
//! │  │   │ SeatInventory     │        │ ShowtimeRepository       │    │   │
//! │  │   │ BookingLedger     │        │ SeatRepository           │    │   │
//! │  │   └───────────────────┘        │ TicketRepository         │    │   │
//! │  │            │                   └──────────────────────────┘    │   │
//! │  │            │                              │                    │   │
//! │  │            ▼                              ▼                    │   │
//! │  │   ┌───────────────┐              ┌──────────────┐             │   │
//! │  │   │   Database    │              │  Migrations  │             │   │
//! │  │   │   (pool.rs)   │              │  (embedded)  │             │   │
//! │  │   └───────────────┘              └──────────────┘             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  │      venues │ showtimes │ seats │ tickets                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database, conflict, and service error types
//! - [`repository`] - Row-level database operations (venue, showtime, seat, ticket)
//! - [`scheduler`] - Showtime lifecycle with overlap enforcement
//! - [`inventory`] - Lazy seat grid materialization
//! - [`booking`] - Atomic seat booking and seat maps
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cinema_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let db = Database::new(DbConfig::new("path/to/cinema.db")).await?;
//!
//! // Schedule a showtime, then book two seats for it
//! let showtime = db.scheduler().create(new_showtime).await?;
//! let seats = db.inventory().resolve_seat_grid(&showtime.venue_id, 1).await?;
//! let tickets = db
//!     .bookings()
//!     .book_seats(&showtime.id, &[seats[0].id.clone(), seats[1].id.clone()])
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod error;
pub mod inventory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod scheduler;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConflictError, DbError, ServiceError, ServiceResult};
pub use pool::{Database, DbConfig};

// Service re-exports for convenience
pub use booking::BookingLedger;
pub use inventory::SeatInventory;
pub use scheduler::ShowtimeScheduler;

// Repository re-exports for convenience
pub use repository::seat::SeatRepository;
pub use repository::showtime::ShowtimeRepository;
pub use repository::ticket::TicketRepository;
pub use repository::venue::VenueRepository;
