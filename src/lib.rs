//! Relay Windows installer builder library.
//!
//! Assembles the NSIS installer package for the Relay agent: verifies the
//! pre-populated build environment, stages configuration, downloads
//! prerequisite binaries, prunes platform-inapplicable files, invokes the
//! NSIS compiler, and places the artifact with backup-on-conflict.

pub mod config;
pub mod defaults;
pub mod download;
pub mod installer;
pub mod pipeline;
pub mod preflight;
pub mod process;
pub mod stage;
pub mod version;

use std::time::Instant;

/// Wall-clock timer for a named build stage.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Start timing a stage.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Print the elapsed time for the stage.
    pub fn finish(self) {
        let secs = self.start.elapsed().as_secs_f64();
        if secs >= 60.0 {
            println!("  [{}] {:.1}m", self.label, secs / 60.0);
        } else {
            println!("  [{}] {:.1}s", self.label, secs);
        }
    }
}
