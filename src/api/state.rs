use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::services::*;

/// Shared router state. Handlers extract the one service they need.
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
    pub workouts: WorkoutService,
    pub assignments: AssignmentService,
    pub progress: ProgressService,
    pub health_tips: HealthTipService,
}

impl AppState {
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        Self {
            auth: AuthService::new(db.clone(), config),
            users: UserService::new(db.clone()),
            workouts: WorkoutService::new(db.clone()),
            assignments: AssignmentService::new(db.clone()),
            progress: ProgressService::new(db.clone()),
            health_tips: HealthTipService::new(db),
        }
    }
}

macro_rules! impl_from_state {
    ($($field:ident: $service:ty),* $(,)?) => {
        $(
            impl FromRef<AppState> for $service {
                fn from_ref(state: &AppState) -> Self {
                    state.$field.clone()
                }
            }
        )*
    };
}

impl_from_state!(
    auth: AuthService,
    users: UserService,
    workouts: WorkoutService,
    assignments: AssignmentService,
    progress: ProgressService,
    health_tips: HealthTipService,
);
