//! Table definitions, created at startup.
//!
//! Timestamps are stored as unix milliseconds (`INTEGER`) because the `Any`
//! driver cannot decode chrono types.

use crate::client::DbClient;
use crate::error::DbError;
use tracing::{debug, info};

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS booking_settings (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        document TEXT NOT NULL,
        updated_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        meeting_type TEXT NOT NULL,
        start_at INTEGER NOT NULL,
        end_at INTEGER NOT NULL,
        status TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_bookings_start_at ON bookings (start_at)",
    r#"
    CREATE TABLE IF NOT EXISTS subscribers (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS analytics_events (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        path TEXT,
        slug TEXT,
        platform TEXT,
        created_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contact_messages (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS job_applications (
        id TEXT PRIMARY KEY,
        company TEXT NOT NULL,
        role TEXT NOT NULL,
        url TEXT,
        status TEXT NOT NULL,
        notes TEXT,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )
    "#,
];

pub async fn init_schema(db_client: &DbClient) -> Result<(), DbError> {
    debug!("Initializing database schema");
    for statement in STATEMENTS {
        db_client.execute(statement).await?;
    }
    info!("Database schema initialized successfully");
    Ok(())
}
