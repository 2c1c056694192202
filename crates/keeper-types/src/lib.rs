//! Keeper Types - Pure type definitions
//!
//! Plain data carried between the store, the request service and the wire.
//! No async runtime or database dependencies live here.

pub mod health;
pub mod todo;

pub use health::*;
pub use todo::*;
