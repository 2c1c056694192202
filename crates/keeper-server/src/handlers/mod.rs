//! HTTP handlers

pub mod error;
pub mod health;
pub mod todos;

pub use error::ApiError;
pub use health::health;
