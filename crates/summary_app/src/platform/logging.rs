//! Platform logging initialization for the summary app.
//!
//! File output goes to `./bili_summary.log` in the current working directory.

use std::path::Path;

use engine_logging::LogDestination;
use log::LevelFilter;

use crate::config::{LogTarget, LOG_FILE};

/// Initialize the logger for the configured target.
///
/// The terminal UI owns the screen, so `Terminal` output is only useful when
/// stderr is redirected.
pub fn initialize(target: LogTarget) {
    let path = Path::new(LOG_FILE);
    let destination = match target {
        LogTarget::File => LogDestination::File(path),
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::Both => LogDestination::Both(path),
        LogTarget::Off => LogDestination::Off,
    };
    engine_logging::initialize(destination, LevelFilter::Info);
}
