use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: i64,
    pub client_id: i64,
    pub workout_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentRequest {
    pub client_id: i64,
    pub workout_id: i64,
}

/// Assignment joined with the client's name and the workout's title.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct AssignmentResponse {
    pub id: i64,
    pub client_id: i64,
    pub workout_id: i64,
    pub client_name: Option<String>,
    pub workout_title: Option<String>,
}
