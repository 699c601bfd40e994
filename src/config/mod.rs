// Process-wide configuration, loaded once at startup

pub mod app;
pub mod database;
pub mod seeding;

pub use app::*;
pub use database::*;
pub use seeding::DatabaseSeeder;
