//! Shared types and models for the Agrimarket platform
//!
//! This crate contains the domain entities, insert shapes and request
//! validation used by the backend and any future components.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
