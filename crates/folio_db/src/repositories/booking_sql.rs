//! SQL implementation of the booking repository

use crate::error::DbError;
use crate::repositories::{from_millis, to_millis};
use crate::repository::BookingRepository;
use crate::DbClient;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_common::models::{Booking, BookingSettings, BookingStatus};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

const BOOKING_COLUMNS: &str =
    "id, name, email, meeting_type, start_at, end_at, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    db_client: DbClient,
}

impl SqlBookingRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    let status: String = row.try_get("status")?;
    Ok(Booking {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        meeting_type: row.try_get("meeting_type")?,
        start_at: from_millis(row.try_get("start_at")?)?,
        end_at: from_millis(row.try_get("end_at")?)?,
        status: status.parse().map_err(DbError::DecodeError)?,
        created_at: from_millis(row.try_get("created_at")?)?,
        updated_at: from_millis(row.try_get("updated_at")?)?,
    })
}

#[async_trait]
impl BookingRepository for SqlBookingRepository {
    async fn get_settings(&self) -> Result<Option<BookingSettings>, DbError> {
        let row = sqlx::query("SELECT document FROM booking_settings WHERE id = 1")
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to read booking settings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        match row {
            Some(row) => {
                let document: String = row.try_get("document")?;
                let settings = serde_json::from_str(&document)
                    .map_err(|e| DbError::DecodeError(e.to_string()))?;
                Ok(Some(settings))
            }
            None => Ok(None),
        }
    }

    async fn put_settings(&self, settings: &BookingSettings) -> Result<(), DbError> {
        let document =
            serde_json::to_string(settings).map_err(|e| DbError::QueryError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO booking_settings (id, document, updated_at)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(document)
        .bind(to_millis(Utc::now()))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to store booking settings: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        info!("Booking settings updated");
        Ok(())
    }

    async fn list_bookings_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> Result<Vec<Booking>, DbError> {
        debug!("Listing bookings between {} and {}", from, to);

        let query = format!(
            "SELECT {} FROM bookings \
             WHERE start_at < $1 AND end_at > $2 AND ($3 OR status <> 'cancelled') \
             ORDER BY start_at, end_at, id",
            BOOKING_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(to_millis(to))
            .bind(to_millis(from))
            .bind(include_cancelled)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list bookings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn create_booking_if_no_overlap(&self, booking: Booking) -> Result<Booking, DbError> {
        debug!(
            "Creating booking {} for {} - {}",
            booking.id, booking.start_at, booking.end_at
        );

        // One statement under SQLite's single-writer lock, so the overlap check
        // and the insert cannot interleave with another writer. DbClient only
        // accepts sqlite: URLs.
        let result = sqlx::query(
            r#"
            INSERT INTO bookings
                (id, name, email, meeting_type, start_at, end_at, status, created_at, updated_at)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9
            WHERE NOT EXISTS (
                SELECT 1 FROM bookings
                WHERE status <> 'cancelled' AND start_at < $6 AND end_at > $5
            )
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.meeting_type)
        .bind(to_millis(booking.start_at))
        .bind(to_millis(booking.end_at))
        .bind(booking.status.as_str())
        .bind(to_millis(booking.created_at))
        .bind(to_millis(booking.updated_at))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert booking: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            info!("Booking rejected, {} overlaps an existing booking", booking.start_at);
            return Err(DbError::Conflict);
        }

        info!("Booking {} created", booking.id);
        Ok(booking)
    }

    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, DbError> {
        let query = format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Booking, DbError> {
        let result = sqlx::query("UPDATE bookings SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status.as_str())
            .bind(to_millis(updated_at))
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update booking {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("booking {}", id)));
        }

        debug!("Booking {} is now {}", id, status);
        self.get_booking(id)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("booking {}", id)))
    }
}
