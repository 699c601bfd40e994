use sqlx::PgPool;
use validator::Validate;

use crate::auth::{ensure, Action, Caller, Identity, IdentityResolver, UserRole};
use crate::errors::AppError;
use crate::models::{CreateWorkoutRequest, UpdateWorkoutRequest, Workout, WorkoutResponse};

const WORKOUT_COLUMNS: &str = "w.id, w.trainer_id, w.title, w.description, u.name AS trainer_name";

#[derive(Debug, Clone)]
pub struct WorkoutService {
    db: PgPool,
    identity: IdentityResolver,
}

impl WorkoutService {
    pub fn new(db: PgPool) -> Self {
        Self {
            identity: IdentityResolver::new(db.clone()),
            db,
        }
    }

    /// List workouts visible to `caller`.
    ///
    /// Without a caller, or for an admin, every workout is returned. Trainers
    /// get the workouts they own; clients get the workouts assigned to them.
    pub async fn list(&self, caller: Option<&Caller>) -> Result<Vec<WorkoutResponse>, AppError> {
        match caller {
            None
            | Some(Caller {
                role: UserRole::Admin,
                ..
            }) => {
                let workouts = sqlx::query_as::<_, WorkoutResponse>(&format!(
                    "SELECT {WORKOUT_COLUMNS} FROM workouts w
                     LEFT JOIN users u ON u.id = w.trainer_id
                     ORDER BY w.id"
                ))
                .fetch_all(&self.db)
                .await?;

                Ok(workouts)
            }
            Some(caller) if caller.role == UserRole::Trainer => {
                let workouts = sqlx::query_as::<_, WorkoutResponse>(&format!(
                    "SELECT {WORKOUT_COLUMNS} FROM workouts w
                     LEFT JOIN users u ON u.id = w.trainer_id
                     WHERE w.trainer_id = $1
                     ORDER BY w.id"
                ))
                .bind(caller.id)
                .fetch_all(&self.db)
                .await?;

                Ok(workouts)
            }
            Some(caller) => self.assigned_to(caller.id).await,
        }
    }

    /// Resolve `user_id` to a caller and list what that user may see.
    pub async fn list_for_user(&self, user_id: Option<i64>) -> Result<Vec<WorkoutResponse>, AppError> {
        match user_id {
            Some(user_id) => {
                let user = self.identity.resolve(Identity::Id(user_id)).await?;
                self.list(Some(&Caller::from(&user))).await
            }
            None => self.list(None).await,
        }
    }

    /// Workouts assigned to the calling client.
    pub async fn list_assigned(&self, caller: &Caller) -> Result<Vec<WorkoutResponse>, AppError> {
        ensure(caller, Action::ClientOnlyView, None)?;
        self.assigned_to(caller.id).await
    }

    pub async fn get(&self, workout_id: i64) -> Result<WorkoutResponse, AppError> {
        sqlx::query_as::<_, WorkoutResponse>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts w
             LEFT JOIN users u ON u.id = w.trainer_id
             WHERE w.id = $1"
        ))
        .bind(workout_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Workout not found"))
    }

    pub async fn create(
        &self,
        caller: &Caller,
        request: CreateWorkoutRequest,
    ) -> Result<WorkoutResponse, AppError> {
        ensure(caller, Action::CreateWorkout, None)?;
        request.validate()?;

        let workout = sqlx::query_as::<_, WorkoutResponse>(&format!(
            "WITH w AS (
                 INSERT INTO workouts (trainer_id, title, description)
                 VALUES ($1, $2, $3)
                 RETURNING id, trainer_id, title, description
             )
             SELECT {WORKOUT_COLUMNS} FROM w
             LEFT JOIN users u ON u.id = w.trainer_id"
        ))
        .bind(caller.id)
        .bind(&request.title)
        .bind(&request.description)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(workout_id = workout.id, trainer_id = caller.id, "created workout");

        Ok(workout)
    }

    /// Apply a partial update; fields absent from `patch` keep their value.
    pub async fn update(
        &self,
        workout_id: i64,
        caller: &Caller,
        patch: UpdateWorkoutRequest,
    ) -> Result<WorkoutResponse, AppError> {
        let workout = self.find(workout_id).await?;
        ensure(caller, Action::UpdateWorkout, Some(workout.trainer_id))?;
        patch.validate()?;

        sqlx::query(
            "UPDATE workouts
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description)
             WHERE id = $1",
        )
        .bind(workout.id)
        .bind(&patch.title)
        .bind(&patch.description)
        .execute(&self.db)
        .await?;

        tracing::info!(workout_id = workout.id, updated_by = caller.id, "updated workout");

        self.get(workout.id).await
    }

    /// Delete a workout; its assignments are removed by the store's cascade.
    pub async fn delete(&self, workout_id: i64, caller: &Caller) -> Result<(), AppError> {
        let workout = self.find(workout_id).await?;
        ensure(caller, Action::DeleteWorkout, Some(workout.trainer_id))?;

        sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(workout.id)
            .execute(&self.db)
            .await?;

        tracing::info!(workout_id = workout.id, deleted_by = caller.id, "deleted workout");

        Ok(())
    }

    async fn find(&self, workout_id: i64) -> Result<Workout, AppError> {
        sqlx::query_as::<_, Workout>(
            "SELECT id, trainer_id, title, description FROM workouts WHERE id = $1",
        )
        .bind(workout_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Workout not found"))
    }

    async fn assigned_to(&self, client_id: i64) -> Result<Vec<WorkoutResponse>, AppError> {
        let workout_ids: Vec<i64> = sqlx::query_scalar(
            "SELECT workout_id FROM assignments WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_all(&self.db)
        .await?;

        if workout_ids.is_empty() {
            return Ok(Vec::new());
        }

        let workouts = sqlx::query_as::<_, WorkoutResponse>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts w
             LEFT JOIN users u ON u.id = w.trainer_id
             WHERE w.id = ANY($1)
             ORDER BY w.id"
        ))
        .bind(workout_ids)
        .fetch_all(&self.db)
        .await?;

        Ok(workouts)
    }
}
