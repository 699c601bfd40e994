// HTTP surface: routers, extractors and handlers

pub mod assignments;
pub mod auth;
pub mod health;
pub mod health_tips;
pub mod progress;
pub mod routes;
pub mod state;
pub mod users;
pub mod workouts;

pub use routes::create_routes;
pub use state::AppState;
