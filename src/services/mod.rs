// Domain services: access checks, existence checks and response shaping

pub mod user_service;
pub mod workout_service;
pub mod assignment_service;
pub mod progress_service;
pub mod health_tip_service;

pub use user_service::UserService;
pub use workout_service::WorkoutService;
pub use assignment_service::AssignmentService;
pub use progress_service::ProgressService;
pub use health_tip_service::HealthTipService;
