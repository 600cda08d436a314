//! Staging stages: cleanup, config placement, and platform pruning.
//!
//! Each stage acts on the filesystem and then re-checks the state it was
//! supposed to produce, failing with a message if the post-condition does
//! not hold.

mod clean;
mod config_files;
mod prune;

pub use clean::clean_staging;
pub use config_files::stage_config;
pub use prune::{prune_patterns, prune_platform_files};
