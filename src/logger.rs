//!
//! omrun's logger
//!

use env_logger::Builder;
use log::Log;

/// Thin [log::Log] wrapper around [env_logger]
///
/// Diagnostics go to stderr, so stdout only ever carries the tensor dump.
#[derive(Debug)]
pub struct Logger {
    logger: Option<env_logger::Logger>,
}
impl Logger {
    pub fn new() -> Self {
        Self { logger: None }
    }

    /// Configures the [`Logger`] to filter events.
    ///
    /// This uses the familiar [env_logger syntax].
    ///
    /// If you don't call this, the [`Logger`] will parse the `RUST_LOG` environment variable
    /// instead when you [`Logger::init`] it.
    ///
    /// [env_logger syntax]: https://docs.rs/env_logger/latest/env_logger/index.html#enabling-logging
    #[inline]
    pub fn with_filter(mut self, filter: impl AsRef<str>) -> Self {
        self.logger = Some(Builder::new().parse_filters(filter.as_ref()).build());
        self
    }

    /// Sets the [`Logger`] as global logger.
    ///
    /// All calls to [`log`] macros will go through this [`Logger`] from this point on.
    pub fn init(mut self) -> Result<(), log::SetLoggerError> {
        let logger = self
            .logger
            .take()
            .unwrap_or_else(|| Builder::new().parse_default_env().build());

        log::set_max_level(logger.filter());
        self.logger = Some(logger);
        log::set_boxed_logger(Box::new(self))
    }
}
impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
impl Log for Logger {
    #[inline]
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger
            .as_ref()
            .is_some_and(|logger| logger.enabled(metadata))
    }

    #[inline]
    fn log(&self, record: &log::Record<'_>) {
        if let Some(logger) = &self.logger {
            if logger.matches(record) {
                logger.log(record);
            }
        }
    }

    #[inline]
    fn flush(&self) {
        if let Some(logger) = &self.logger {
            logger.flush();
        }
    }
}
impl Drop for Logger {
    fn drop(&mut self) {
        self.flush();
    }
}
