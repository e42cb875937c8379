//! Row-level CRUD on `vni_allocations`.
//!
//! Functions taking `&mut SqliteConnection` run inside a caller's transaction
//! (pass `&mut *tx`); `AllocDb` methods are standalone reads on the pool.

mod read;
mod write;

pub(crate) use read::{fetch_all_ordered, fetch_one};
pub(crate) use write::{delete_chunk, delete_one, insert_free_chunk, set_allocated};
