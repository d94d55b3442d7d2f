// Auth repositories
pub mod store;
pub mod refresh_token_repository;
pub mod memory_refresh_token_store;

pub use store::*;
pub use refresh_token_repository::*;
pub use memory_refresh_token_store::*;
