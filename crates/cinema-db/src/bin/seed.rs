//! # Seed Data Generator
//!
//! Populates the database with a small realistic fixture for
//! development: two London venues and three scheduled showtimes.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p cinema-db --bin seed
//!
//! # Specify database path
//! cargo run -p cinema-db --bin seed -- --db ./data/cinema.db
//! ```
//!
//! Seeding is idempotent at the database level: if any venue already
//! exists the generator exits without writing, so it can be wired into
//! a dev startup script safely.

use std::env;

use cinema_core::{NewShowtime, NewVenue};
use cinema_db::{Database, DbConfig};
use chrono::{Duration, Utc};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./cinema_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cinema Scheduling Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./cinema_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Cinema Scheduling Seed Data Generator");
    println!("========================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Never seed on top of existing data
    let existing = db.venues().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} venues", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating venues...");

    let odeon = db
        .venues()
        .create(NewVenue {
            name: "Odeon Leicester Square".to_string(),
            address_line: "24-26 Leicester Square".to_string(),
            city: "London".to_string(),
            state_or_province: None,
            postcode: Some("WC2H 7JY".to_string()),
            country: Some("United Kingdom".to_string()),
            total_screens: 5,
            phone: Some("+44 333 006 7777".to_string()),
            email: Some("boxoffice@odeon-ls.example".to_string()),
        })
        .await?;
    println!("  ✓ {} ({})", odeon.name, odeon.id);

    let imax = db
        .venues()
        .create(NewVenue {
            name: "BFI IMAX Waterloo".to_string(),
            address_line: "1 Charlie Chaplin Walk".to_string(),
            city: "London".to_string(),
            state_or_province: None,
            postcode: Some("SE1 8XR".to_string()),
            country: Some("United Kingdom".to_string()),
            total_screens: 1,
            phone: Some("+44 330 333 7878".to_string()),
            email: Some("imax@bfi.example".to_string()),
        })
        .await?;
    println!("  ✓ {} ({})", imax.name, imax.id);

    println!();
    println!("Scheduling showtimes...");

    // Evening slots starting tomorrow so the fixture is always in the
    // future relative to the seeding run
    let tomorrow = (Utc::now() + Duration::days(1))
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();

    let showtimes = [
        NewShowtime {
            movie_title: "The Batman".to_string(),
            screen_number: 1,
            start_time: tomorrow + Duration::hours(19) + Duration::minutes(30),
            end_time: tomorrow + Duration::hours(22) + Duration::minutes(30),
            ticket_price_cents: 1450,
            language: Some("English".to_string()),
            format: Some("2D".to_string()),
            venue_id: odeon.id.clone(),
        },
        NewShowtime {
            movie_title: "Inside Out 2".to_string(),
            screen_number: 2,
            start_time: tomorrow + Duration::hours(17),
            end_time: tomorrow + Duration::hours(18) + Duration::minutes(40),
            ticket_price_cents: 1100,
            language: Some("English".to_string()),
            format: Some("3D".to_string()),
            venue_id: odeon.id.clone(),
        },
        NewShowtime {
            movie_title: "Dune: Part Two".to_string(),
            screen_number: 1,
            start_time: tomorrow + Duration::hours(20),
            end_time: tomorrow + Duration::hours(23),
            ticket_price_cents: 1950,
            language: Some("English".to_string()),
            format: Some("IMAX".to_string()),
            venue_id: imax.id.clone(),
        },
    ];

    for new_showtime in showtimes {
        let showtime = db.scheduler().create(new_showtime).await?;
        println!(
            "  ✓ {} @ {} screen {} ({} - {})",
            showtime.movie_title,
            if showtime.venue_id == odeon.id {
                &odeon.name
            } else {
                &imax.name
            },
            showtime.screen_number,
            showtime.start_time.format("%H:%M"),
            showtime.end_time.format("%H:%M"),
        );
    }

    println!();
    println!("Materializing seat grids...");

    // Touch each scheduled screen so a fresh dev database already has
    // its seat maps on disk
    for (venue_id, screen) in [(&odeon.id, 1), (&odeon.id, 2), (&imax.id, 1)] {
        let seats = db.inventory().resolve_seat_grid(venue_id, screen).await?;
        println!("  ✓ screen {}: {} seats", screen, seats.len());
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cinema_db=trace` - Show trace for the db crate only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cinema_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
