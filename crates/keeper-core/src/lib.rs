//! Keeper Core Library
//!
//! Error type, deadline handling and the storage port for the Keeper todo
//! service.

// Re-export pure types from keeper-types
pub use keeper_types::*;

pub mod deadline;
pub mod error;
pub mod ports;

pub use deadline::{deadline_after, with_deadline};
pub use error::{KeeperError, Result};
pub use ports::TodoStore;
