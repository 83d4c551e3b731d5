pub mod auth_service;
pub mod interest_service;
pub mod listing_service;
