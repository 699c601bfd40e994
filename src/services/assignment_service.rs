use sqlx::{FromRow, PgPool};

use crate::auth::{authorize, ensure, Action, Caller, Identity, IdentityResolver, UserRole};
use crate::errors::{is_foreign_key_violation, is_unique_violation, AppError};
use crate::models::{Assignment, AssignmentResponse, CreateAssignmentRequest, Workout};

/// Assignment together with the trainer who owns its workout.
#[derive(Debug, FromRow)]
struct AssignmentOwnership {
    id: i64,
    client_id: i64,
    trainer_id: i64,
}

#[derive(Debug, Clone)]
pub struct AssignmentService {
    db: PgPool,
    identity: IdentityResolver,
}

impl AssignmentService {
    pub fn new(db: PgPool) -> Self {
        Self {
            identity: IdentityResolver::new(db.clone()),
            db,
        }
    }

    /// Assign a workout to a client. The pair is unique; a duplicate is
    /// rejected by the store and reported as a conflict.
    pub async fn create(
        &self,
        caller: &Caller,
        request: CreateAssignmentRequest,
    ) -> Result<AssignmentResponse, AppError> {
        ensure(caller, Action::AssignWorkout, None)?;

        let client = self.identity.resolve(Identity::Id(request.client_id)).await?;
        if client.role != UserRole::Client {
            return Err(AppError::validation("client_id", "User is not a client"));
        }

        let workout = sqlx::query_as::<_, Workout>(
            "SELECT id, trainer_id, title, description FROM workouts WHERE id = $1",
        )
        .bind(request.workout_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Workout not found"))?;

        let assignment = sqlx::query_as::<_, Assignment>(
            "INSERT INTO assignments (client_id, workout_id)
             VALUES ($1, $2)
             RETURNING id, client_id, workout_id",
        )
        .bind(client.id)
        .bind(workout.id)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::conflict("Workout already assigned to this client")
            } else if is_foreign_key_violation(&err) {
                AppError::not_found("Client or workout no longer exists")
            } else {
                AppError::Database(err)
            }
        })?;

        tracing::info!(
            assignment_id = assignment.id,
            client_id = client.id,
            workout_id = workout.id,
            "created assignment"
        );

        Ok(AssignmentResponse {
            id: assignment.id,
            client_id: assignment.client_id,
            workout_id: assignment.workout_id,
            client_name: Some(client.name),
            workout_title: Some(workout.title),
        })
    }

    /// List assignments. Without a user every assignment is returned;
    /// trainers and admins see all, clients only their own.
    pub async fn list(&self, user_id: Option<i64>) -> Result<Vec<AssignmentResponse>, AppError> {
        let client_filter = match user_id {
            Some(user_id) => {
                let user = self.identity.resolve(Identity::Id(user_id)).await?;
                if user.role.is_staff() {
                    None
                } else {
                    Some(user.id)
                }
            }
            None => None,
        };

        let assignments = sqlx::query_as::<_, AssignmentResponse>(
            "SELECT a.id, a.client_id, a.workout_id,
                    u.name AS client_name, w.title AS workout_title
             FROM assignments a
             LEFT JOIN users u ON u.id = a.client_id
             LEFT JOIN workouts w ON w.id = a.workout_id
             WHERE ($1::BIGINT IS NULL OR a.client_id = $1)
             ORDER BY a.id",
        )
        .bind(client_filter)
        .fetch_all(&self.db)
        .await?;

        Ok(assignments)
    }

    /// Remove an assignment. Allowed for the assigned client, the trainer
    /// owning the workout, or an admin.
    pub async fn delete(&self, assignment_id: i64, caller: &Caller) -> Result<(), AppError> {
        let assignment = sqlx::query_as::<_, AssignmentOwnership>(
            "SELECT a.id, a.client_id, w.trainer_id
             FROM assignments a
             JOIN workouts w ON w.id = a.workout_id
             WHERE a.id = $1",
        )
        .bind(assignment_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::not_found("Assignment not found"))?;

        if !authorize(caller, Action::ModifyOwn, Some(assignment.client_id)).is_allowed() {
            ensure(caller, Action::ModifyOwn, Some(assignment.trainer_id))?;
        }

        sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(assignment.id)
            .execute(&self.db)
            .await?;

        tracing::info!(assignment_id = assignment.id, deleted_by = caller.id, "deleted assignment");

        Ok(())
    }
}
