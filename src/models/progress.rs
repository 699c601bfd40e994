use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProgressLogRequest {
    pub client_id: i64,
    pub date: NaiveDate,
    #[validate(range(min = 0.0, message = "weight cannot be negative"))]
    pub weight: Option<f64>,
    #[validate(range(min = 0, message = "calories cannot be negative"))]
    pub calories: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ProgressLogResponse {
    pub id: i64,
    pub client_id: i64,
    pub date: NaiveDate,
    pub weight: Option<f64>,
    pub calories: Option<i32>,
    pub notes: Option<String>,
}
