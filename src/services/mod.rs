//! Services Layer
//!
//! Persistence glue extracted from HTTP handlers, so the game core stays
//! framework-free and handlers stay thin.

pub mod game_service;

pub use game_service::ServiceError;
