// Persisted rows, request payloads and response projections

pub mod user;
pub mod workout;
pub mod assignment;
pub mod progress;
pub mod health_tip;

pub use user::*;
pub use workout::*;
pub use assignment::*;
pub use progress::*;
pub use health_tip::*;
