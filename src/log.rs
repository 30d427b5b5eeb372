//! Logging module for terminal based output control.
//!
//! Contains a custom logging implementation to disable/redirect output
//! based on command line switches baked into the application level.
//! Responses from the remote services are written through `info!`, so
//! the `--quiet` switch reduces a run to failures only.
use clap::ArgMatches;
use logger::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Basic logger instance to allow quiet-aware logging.
struct BasicLogger {
    quiet: bool,
}

// Basic logging implementation.
impl Log for BasicLogger {
    /// Returns enabled only for silo modules.
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("silo")
    }

    /// Logs out a `Record` when logging is enabled.
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if record.metadata().level() == Level::Error {
                eprintln!("{}", record.args());
            } else if !self.quiet {
                println!("{}", record.args());
            }
        }
    }

    /// Flushes this logger.
    fn flush(&self) {}
}

/// Initializes the logger based on the provided arguments.
///
/// If the `-q` flag was provided, this short circuits to cull all logging
/// except errors.
pub fn init(args: &ArgMatches) -> Result<(), SetLoggerError> {
    let logger = Box::new(BasicLogger {
        quiet: args.is_present("quiet"),
    });
    logger::set_boxed_logger(logger).map(|_| logger::set_max_level(LevelFilter::Info))
}

#[cfg(test)]
mod tests {
    use super::BasicLogger;
    use logger::{Level, Log, Metadata};

    #[test]
    fn filtering_foreign_targets() {
        let logger = BasicLogger { quiet: false };

        let ours = Metadata::builder()
            .level(Level::Info)
            .target("silo::glacier")
            .build();
        let theirs = Metadata::builder()
            .level(Level::Info)
            .target("rusoto_core::request")
            .build();

        assert!(logger.enabled(&ours));
        assert!(!logger.enabled(&theirs));
    }
}
