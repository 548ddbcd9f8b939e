//! Logger initialization for entryflow_app.
//!
//! The default destination is `./entryflow.log`, keeping log lines out of
//! the rendered view on stdout.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_PATH: &str = "./entryflow.log";

/// Destination for log output.
#[allow(dead_code)]
pub enum LogDestination {
    /// Write to ./entryflow.log in the current directory.
    File,
    /// Write to terminal (stderr/stdout mixed).
    Terminal,
}

/// Initialize the global logger; a failure to open the log file is reported
/// on stderr and logging stays disabled.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let logger: Box<dyn SharedLogger> = match destination {
        LogDestination::Terminal => {
            TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
        }
        LogDestination::File => match File::create(Path::new(LOG_PATH)) {
            Ok(file) => WriteLogger::new(level, config, file),
            Err(err) => {
                eprintln!("Warning: could not create log file at {LOG_PATH}: {err}");
                return;
            }
        },
    };

    let _ = CombinedLogger::init(vec![logger]);
}
