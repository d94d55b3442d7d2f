// External service clients
pub mod user_api;

pub use user_api::*;
