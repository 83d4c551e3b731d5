//! Classifieds backend: listing search and management, user interest in
//! listings, and image uploads, served over axum with sea-orm persistence.

pub mod app;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod upload;
