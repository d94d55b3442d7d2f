// Request extractors
pub mod auth;
pub mod client_context;
pub mod internal_auth;

pub use auth::*;
pub use client_context::*;
pub use internal_auth::*;
