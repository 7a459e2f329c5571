use env_logger::Env;
use log::{debug, Level};

pub mod tabular;

/// Initialises `env_logger` for the whole process.
///
/// `RUST_LOG` takes precedence; `log_level` is only the fallback filter.
/// Calling this more than once is harmless, which lets every test set up logging.
pub fn configure_logging(log_level: Level) {
    let default_filter = match log_level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warn => "warn",
        Level::Error => "error",
        Level::Trace => "trace",
    };

    if env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .try_init()
        .is_ok()
    {
        debug!("Logging started");
    }
}
