use sqlx::PgPool;
use validator::Validate;

use crate::auth::{ensure, Action, Caller};
use crate::errors::AppError;
use crate::models::{CreateHealthTipRequest, HealthTipResponse};

#[derive(Debug, Clone)]
pub struct HealthTipService {
    db: PgPool,
}

impl HealthTipService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<HealthTipResponse>, AppError> {
        let tips = sqlx::query_as::<_, HealthTipResponse>(
            "SELECT id, title, content FROM health_tips ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(tips)
    }

    pub async fn create(
        &self,
        caller: &Caller,
        request: CreateHealthTipRequest,
    ) -> Result<HealthTipResponse, AppError> {
        ensure(caller, Action::CreateHealthTip, None)?;
        request.validate()?;

        let tip = sqlx::query_as::<_, HealthTipResponse>(
            "INSERT INTO health_tips (title, content)
             VALUES ($1, $2)
             RETURNING id, title, content",
        )
        .bind(&request.title)
        .bind(&request.content)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(tip_id = tip.id, created_by = caller.id, "created health tip");

        Ok(tip)
    }

    pub async fn get(&self, tip_id: i64) -> Result<HealthTipResponse, AppError> {
        sqlx::query_as::<_, HealthTipResponse>(
            "SELECT id, title, content FROM health_tips WHERE id = $1",
        )
        .bind(tip_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Health tip not found"))
    }
}
