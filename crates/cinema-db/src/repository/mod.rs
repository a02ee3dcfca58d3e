//! # Repository Module
//!
//! Database repository implementations for the cinema schema.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service (ShowtimeScheduler, BookingLedger)                            │
//! │       │                                                                 │
//! │       │  ShowtimeRepository::fetch_by_id(&mut tx, id)                  │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  Repository                                                            │
//! │  ├── pool-backed reads:   &self methods                                │
//! │  ├── transaction-scoped:  associated fns taking &mut SqliteConnection  │
//! │  │   (so multi-step mutations stay one atomic unit)                    │
//! │  └── SQL is isolated in one place                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`venue::VenueRepository`] - Venue lookups and CRUD
//! - [`showtime::ShowtimeRepository`] - Showtime rows, overlap query, filters
//! - [`seat::SeatRepository`] - Seat grids per (venue, screen)
//! - [`ticket::TicketRepository`] - Ticket rows per showtime

pub mod seat;
pub mod showtime;
pub mod ticket;
pub mod venue;
