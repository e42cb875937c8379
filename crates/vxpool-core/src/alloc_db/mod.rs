//! Persistent VNI allocation table (SQLite via sqlx).
//!
//! One row per known VNI with its `allocated` flag. This table is the single
//! source of truth shared by every process that allocates from the pool.

pub mod db;
pub(crate) mod records;
pub mod types;

pub use db::*;
pub use types::*;

#[cfg(test)]
mod tests;
