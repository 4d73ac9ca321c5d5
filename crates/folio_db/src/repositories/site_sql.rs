//! SQL storage for the public site funnels: newsletter, analytics, contact

use crate::error::DbError;
use crate::repositories::{from_millis, to_millis};
use crate::repository::{AnalyticsRepository, ContactRepository, SubscriberRepository};
use crate::DbClient;
use async_trait::async_trait;
use folio_common::models::{AnalyticsEvent, ContactMessage, Subscriber};
use sqlx::Row;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct SqlSiteRepository {
    db_client: DbClient,
}

impl SqlSiteRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

#[async_trait]
impl SubscriberRepository for SqlSiteRepository {
    async fn upsert_subscriber(&self, subscriber: Subscriber) -> Result<Subscriber, DbError> {
        sqlx::query(
            r#"
            INSERT INTO subscribers (id, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET updated_at = excluded.updated_at
            "#,
        )
        .bind(&subscriber.id)
        .bind(&subscriber.email)
        .bind(to_millis(subscriber.created_at))
        .bind(to_millis(subscriber.updated_at))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to upsert subscriber: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        self.get_subscriber(&subscriber.id)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("subscriber {}", subscriber.id)))
    }

    async fn get_subscriber(&self, id: &str) -> Result<Option<Subscriber>, DbError> {
        let row = sqlx::query(
            "SELECT id, email, created_at, updated_at FROM subscribers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(Subscriber {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                created_at: from_millis(row.try_get("created_at")?)?,
                updated_at: from_millis(row.try_get("updated_at")?)?,
            })),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AnalyticsRepository for SqlSiteRepository {
    async fn append_event(&self, event: AnalyticsEvent) -> Result<(), DbError> {
        debug!("Recording analytics event {}", event.name.as_str());
        sqlx::query(
            r#"
            INSERT INTO analytics_events (id, name, path, slug, platform, created_at)
            VALUES ($1, $2, NULLIF($3, ''), NULLIF($4, ''), NULLIF($5, ''), $6)
            "#,
        )
        .bind(&event.id)
        .bind(event.name.as_str())
        // optional columns travel as "" so the Any driver never sees a typed NULL
        .bind(event.path.unwrap_or_default())
        .bind(event.slug.unwrap_or_default())
        .bind(event.platform.unwrap_or_default())
        .bind(to_millis(event.created_at))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to store analytics event: {}", e);
            DbError::QueryError(e.to_string())
        })?;
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for SqlSiteRepository {
    async fn save_message(&self, message: ContactMessage) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (id, name, email, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(to_millis(message.created_at))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to store contact message: {}", e);
            DbError::QueryError(e.to_string())
        })?;
        Ok(())
    }
}
