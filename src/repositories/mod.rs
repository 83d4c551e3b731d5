//! Query and mutation access to the relational store.
//!
//! Repositories borrow the connection handle held in [`crate::state::AppState`]
//! and are built per request, so each unit of work owns its own view of the
//! persistence context.

pub mod interest_repository;
pub mod listing_repository;

pub use interest_repository::{InterestRepository, NewInterest};
pub use listing_repository::{ListingRepository, NewEquipment, NewListing};
