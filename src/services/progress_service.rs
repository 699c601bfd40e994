use sqlx::PgPool;
use validator::Validate;

use crate::auth::{ensure, Action, Caller, Identity, IdentityResolver};
use crate::errors::AppError;
use crate::models::{CreateProgressLogRequest, ProgressLogResponse};

#[derive(Debug, Clone)]
pub struct ProgressService {
    db: PgPool,
    identity: IdentityResolver,
}

impl ProgressService {
    pub fn new(db: PgPool) -> Self {
        Self {
            identity: IdentityResolver::new(db.clone()),
            db,
        }
    }

    pub async fn create(
        &self,
        caller: &Caller,
        request: CreateProgressLogRequest,
    ) -> Result<ProgressLogResponse, AppError> {
        request.validate()?;

        let client = self.identity.resolve(Identity::Id(request.client_id)).await?;
        ensure(caller, Action::ModifyOwn, Some(client.id))?;

        let log = sqlx::query_as::<_, ProgressLogResponse>(
            "INSERT INTO progress_logs (client_id, date, weight, calories, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, client_id, date, weight, calories, notes",
        )
        .bind(client.id)
        .bind(request.date)
        .bind(request.weight)
        .bind(request.calories)
        .bind(&request.notes)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(log_id = log.id, client_id = client.id, "created progress log");

        Ok(log)
    }

    /// Most recent first; same-day entries keep insertion order.
    pub async fn list(&self, client_id: Option<i64>) -> Result<Vec<ProgressLogResponse>, AppError> {
        let logs = sqlx::query_as::<_, ProgressLogResponse>(
            "SELECT id, client_id, date, weight, calories, notes
             FROM progress_logs
             WHERE ($1::BIGINT IS NULL OR client_id = $1)
             ORDER BY date DESC, id ASC",
        )
        .bind(client_id)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    pub async fn get(&self, log_id: i64, caller: &Caller) -> Result<ProgressLogResponse, AppError> {
        let log = self.find(log_id).await?;
        ensure(caller, Action::ReadOwn, Some(log.client_id))?;
        Ok(log)
    }

    pub async fn delete(&self, log_id: i64, caller: &Caller) -> Result<(), AppError> {
        let log = self.find(log_id).await?;
        ensure(caller, Action::ModifyOwn, Some(log.client_id))?;

        sqlx::query("DELETE FROM progress_logs WHERE id = $1")
            .bind(log.id)
            .execute(&self.db)
            .await?;

        tracing::info!(log_id = log.id, deleted_by = caller.id, "deleted progress log");

        Ok(())
    }

    async fn find(&self, log_id: i64) -> Result<ProgressLogResponse, AppError> {
        sqlx::query_as::<_, ProgressLogResponse>(
            "SELECT id, client_id, date, weight, calories, notes FROM progress_logs WHERE id = $1",
        )
        .bind(log_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Progress log not found"))
    }
}
