// Shared errors
pub mod auth_error;
pub mod bridge_error;
pub mod store_error;

pub use auth_error::*;
pub use bridge_error::*;
pub use store_error::*;
