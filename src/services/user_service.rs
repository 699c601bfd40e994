use sqlx::PgPool;

use crate::auth::{ensure, Action, Caller, Identity, IdentityResolver};
use crate::errors::AppError;
use crate::models::UserResponse;

#[derive(Debug, Clone)]
pub struct UserService {
    db: PgPool,
    identity: IdentityResolver,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self {
            identity: IdentityResolver::new(db.clone()),
            db,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = sqlx::query_as::<_, UserResponse>(
            "SELECT id, name, email, role FROM users ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    pub async fn list_clients(&self) -> Result<Vec<UserResponse>, AppError> {
        let clients = sqlx::query_as::<_, UserResponse>(
            "SELECT id, name, email, role FROM users WHERE role = 'client' ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(clients)
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserResponse, AppError> {
        let user = self.identity.resolve(Identity::Id(user_id)).await?;
        Ok(user.into())
    }

    /// Delete a user account; owned workouts, assignments and progress logs
    /// go with it through the store's cascades.
    pub async fn delete_user(&self, user_id: i64, caller: &Caller) -> Result<(), AppError> {
        let user = self.identity.resolve(Identity::Id(user_id)).await?;
        ensure(caller, Action::ModifyOwn, Some(user.id))?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&self.db)
            .await?;

        tracing::info!(user_id = user.id, deleted_by = caller.id, "deleted user");

        Ok(())
    }
}
