//! Storage layer
//!
//! A single SQLite file holding the `todos` table.

pub mod db;

pub use db::Database;
