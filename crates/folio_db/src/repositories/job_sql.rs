//! SQL implementation of the job tracker repository

use crate::error::DbError;
use crate::repositories::{from_millis, to_millis};
use crate::repository::JobRepository;
use crate::DbClient;
use async_trait::async_trait;
use folio_common::models::JobApplication;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{error, info};

const JOB_COLUMNS: &str = "id, company, role, url, status, notes, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct SqlJobRepository {
    db_client: DbClient,
}

impl SqlJobRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn job_from_row(row: &AnyRow) -> Result<JobApplication, DbError> {
    let status: String = row.try_get("status")?;
    Ok(JobApplication {
        id: row.try_get("id")?,
        company: row.try_get("company")?,
        role: row.try_get("role")?,
        url: row.try_get("url")?,
        status: status.parse().map_err(DbError::DecodeError)?,
        notes: row.try_get("notes")?,
        created_at: from_millis(row.try_get("created_at")?)?,
        updated_at: from_millis(row.try_get("updated_at")?)?,
    })
}

#[async_trait]
impl JobRepository for SqlJobRepository {
    async fn list_jobs(&self) -> Result<Vec<JobApplication>, DbError> {
        let query = format!(
            "SELECT {} FROM job_applications ORDER BY created_at DESC, id",
            JOB_COLUMNS
        );
        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(job_from_row).collect()
    }

    async fn create_job(&self, job: JobApplication) -> Result<JobApplication, DbError> {
        sqlx::query(
            r#"
            INSERT INTO job_applications
                (id, company, role, url, status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, NULLIF($4, ''), $5, NULLIF($6, ''), $7, $8)
            "#,
        )
        .bind(&job.id)
        .bind(&job.company)
        .bind(&job.role)
        .bind(job.url.clone().unwrap_or_default())
        .bind(job.status.as_str())
        .bind(job.notes.clone().unwrap_or_default())
        .bind(to_millis(job.created_at))
        .bind(to_millis(job.updated_at))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert job application: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        info!("Job application {} created", job.id);
        Ok(job)
    }

    async fn get_job(&self, id: &str) -> Result<Option<JobApplication>, DbError> {
        let query = format!("SELECT {} FROM job_applications WHERE id = $1", JOB_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(job_from_row).transpose()
    }

    async fn update_job(&self, job: JobApplication) -> Result<JobApplication, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE job_applications
            SET company = $1, role = $2, url = NULLIF($3, ''), status = $4,
                notes = NULLIF($5, ''), updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(&job.company)
        .bind(&job.role)
        .bind(job.url.clone().unwrap_or_default())
        .bind(job.status.as_str())
        .bind(job.notes.clone().unwrap_or_default())
        .bind(to_millis(job.updated_at))
        .bind(&job.id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to update job application {}: {}", job.id, e);
            DbError::QueryError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("job {}", job.id)));
        }
        Ok(job)
    }

    async fn delete_job(&self, id: &str) -> Result<bool, DbError> {
        let affected = sqlx::query("DELETE FROM job_applications WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?
            .rows_affected();

        Ok(affected > 0)
    }
}
