//! Installer compilation and final artifact placement.

mod compile;
mod finalize;

pub use compile::compile_installer;
pub use finalize::{atomic_move, backup_name, place_artifact};
