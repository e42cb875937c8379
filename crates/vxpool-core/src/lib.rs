pub mod config;
pub mod logging;

pub mod alloc_db;
pub mod allocator;
pub mod driver;
pub mod error;
pub mod ranges;
pub mod reconcile;
