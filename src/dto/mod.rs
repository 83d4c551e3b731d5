pub mod auth;
pub mod interests;
pub mod listings;
