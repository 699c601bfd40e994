//! Role-scoped access decisions.
//!
//! `authorize` is a pure function of the caller, the requested action and the
//! owner of the resource being touched. Services call it before any store
//! write; a denial becomes [`AppError::Forbidden`].

use crate::auth::{Caller, UserRole};
use crate::errors::AppError;

/// Operations guarded by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// List or read a resource scoped to its owner.
    ReadOwn,
    /// Mutate or delete a resource scoped to its owner.
    ModifyOwn,
    CreateWorkout,
    UpdateWorkout,
    DeleteWorkout,
    /// Assign an existing workout to a client.
    AssignWorkout,
    ClientOnlyView,
    CreateHealthTip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(AppError::Forbidden(reason)),
        }
    }
}

/// Decide whether `caller` may perform `action` on a resource owned by `owner_id`.
///
/// Rules are evaluated in order and the first match wins.
pub fn authorize(caller: &Caller, action: Action, owner_id: Option<i64>) -> Decision {
    if caller.role == UserRole::Admin {
        return Decision::Allow;
    }

    let owns = owner_id == Some(caller.id);

    match action {
        Action::ReadOwn | Action::ModifyOwn => {
            if owns {
                Decision::Allow
            } else {
                Decision::Deny("resource belongs to another user".to_string())
            }
        }
        Action::CreateWorkout | Action::AssignWorkout => {
            if caller.role == UserRole::Trainer {
                Decision::Allow
            } else {
                Decision::Deny("only trainers can manage workouts".to_string())
            }
        }
        Action::UpdateWorkout | Action::DeleteWorkout => {
            if caller.role != UserRole::Trainer {
                Decision::Deny("only trainers can manage workouts".to_string())
            } else if !owns {
                Decision::Deny("workout belongs to another trainer".to_string())
            } else {
                Decision::Allow
            }
        }
        Action::ClientOnlyView => {
            if caller.role == UserRole::Client {
                Decision::Allow
            } else {
                Decision::Deny("only clients can view this resource".to_string())
            }
        }
        Action::CreateHealthTip => Decision::Deny("insufficient role".to_string()),
    }
}

/// Authorize and log denials; the error is ready to propagate with `?`.
pub fn ensure(caller: &Caller, action: Action, owner_id: Option<i64>) -> Result<(), AppError> {
    let decision = authorize(caller, action, owner_id);
    if let Decision::Deny(reason) = &decision {
        tracing::warn!(
            caller_id = caller.id,
            role = %caller.role,
            ?action,
            ?owner_id,
            reason = %reason,
            "access denied"
        );
    }
    decision.into_result()
}
