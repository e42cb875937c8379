//! CLI command handlers. Each command is in its own file.

mod allocate;
mod completions;
mod list;
mod release;
mod status;
mod sync;

pub use allocate::run_allocate;
pub use completions::run_completions;
pub use list::run_list;
pub use release::run_release;
pub use status::run_status;
pub use sync::run_sync;
