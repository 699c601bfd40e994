use sqlx::PgPool;
use validator::Validate;

use crate::auth::identity::normalize_email;
use crate::auth::password::hash_password;
use crate::auth::{
    AuthResponse, Caller, Identity, IdentityResolver, JwtService, LoginRequest, RegisterRequest,
    UserRole,
};
use crate::config::AppConfig;
use crate::errors::{is_unique_violation, AppError};
use crate::models::{User, UserResponse};

#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    identity: IdentityResolver,
    db: PgPool,
    bcrypt_cost: u32,
    allow_admin_registration: bool,
}

impl AuthService {
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        Self {
            jwt_service: JwtService::new(
                &config.jwt_secret,
                config.jwt_algorithm,
                config.access_token_expire_minutes,
            ),
            identity: IdentityResolver::new(db.clone()).with_bcrypt_cost(config.bcrypt_cost),
            db,
            bcrypt_cost: config.bcrypt_cost,
            allow_admin_registration: config.allow_admin_registration,
        }
    }

    /// Register a new user
    pub async fn register(&self, mut request: RegisterRequest) -> Result<UserResponse, AppError> {
        request.name = request.name.trim().to_string();
        request.validate()?;

        let role = request.role.unwrap_or(UserRole::Client);
        if role == UserRole::Admin && !self.allow_admin_registration {
            return Err(AppError::forbidden("admin accounts cannot be self-registered"));
        }

        let password = request.password;
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|err| AppError::Internal(err.into()))??;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, password_hash, role",
        )
        .bind(&request.name)
        .bind(normalize_email(&request.email))
        .bind(&password_hash)
        .bind(role)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::conflict("Email already registered")
            } else {
                AppError::Database(err)
            }
        })?;

        tracing::info!(user_id = user.id, role = %user.role, "registered user");

        Ok(user.into())
    }

    /// Login user and issue an access token
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request
            .validate()
            .map_err(|_| AppError::unauthenticated("Incorrect email or password"))?;

        let user = self
            .identity
            .resolve(Identity::Credential {
                email: &request.email,
                secret: &request.password,
            })
            .await?;

        let access_token = self.jwt_service.create_access_token(&user)?;

        tracing::info!(user_id = user.id, "user logged in");

        Ok(AuthResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
            user: user.into(),
        })
    }

    /// Validate a bearer token and re-resolve its user so role changes and
    /// deletions take effect immediately.
    pub async fn authenticate(&self, token: &str) -> Result<Caller, AppError> {
        let user_id = self.jwt_service.extract_user_id(token)?;

        let user = self
            .identity
            .resolve(Identity::Id(user_id))
            .await
            .map_err(|err| match err {
                AppError::NotFound(_) => AppError::unauthenticated("Could not validate credentials"),
                other => other,
            })?;

        Ok(Caller::from(&user))
    }

    /// Current user profile
    pub async fn current_user(&self, caller: &Caller) -> Result<UserResponse, AppError> {
        let user = self.identity.resolve(Identity::Id(caller.id)).await?;
        Ok(user.into())
    }
}
