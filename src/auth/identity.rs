use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::User;

/// Checked against when no account matches, so unknown emails cost a bcrypt verification too.
const UNKNOWN_ACCOUNT_SECRET: &str = "fitsphere-unknown-account";

/// How a caller identifies itself.
#[derive(Debug, Clone, Copy)]
pub enum Identity<'a> {
    Id(i64),
    Credential { email: &'a str, secret: &'a str },
}

/// Resolves a user id or a login credential to the stored user and its role.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    db: PgPool,
    bcrypt_cost: u32,
    unknown_account_hash: Arc<OnceCell<String>>,
}

impl IdentityResolver {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            unknown_account_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Cost used for the unknown-account hash; should match the cost stored hashes use.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub async fn resolve(&self, identity: Identity<'_>) -> Result<User, AppError> {
        match identity {
            Identity::Id(user_id) => self
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| AppError::not_found("User not found")),
            Identity::Credential { email, secret } => {
                let user = self.find_by_email(email).await?;
                let password_hash = match &user {
                    Some(user) => user.password_hash.clone(),
                    None => self.unknown_account_hash().await?,
                };

                let secret = secret.to_string();
                let matches = tokio::task::spawn_blocking(move || verify_password(&secret, &password_hash))
                    .await
                    .map_err(|err| AppError::Internal(err.into()))??;

                match user {
                    Some(user) if matches => Ok(user),
                    _ => Err(AppError::unauthenticated("Incorrect email or password")),
                }
            }
        }
    }

    async fn unknown_account_hash(&self) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;
        let hash = self
            .unknown_account_hash
            .get_or_try_init(|| async move {
                tokio::task::spawn_blocking(move || hash_password(UNKNOWN_ACCOUNT_SECRET, cost))
                    .await
                    .map_err(|err| AppError::Internal(err.into()))?
                    .map_err(AppError::from)
            })
            .await?;

        Ok(hash.clone())
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, role FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, role FROM users WHERE email = $1",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }
}

/// Emails are stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
