// Authentication, identity resolution and access policy

pub mod identity;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod policy;
pub mod service;

pub use identity::{Identity, IdentityResolver};
pub use jwt::*;
pub use middleware::*;
pub use models::*;
pub use policy::{authorize, ensure, Action, Decision};
pub use service::*;
