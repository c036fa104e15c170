use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snafu::{ensure, ResultExt};

use crate::error::{FailedToReadConfigSnafu, InvalidConfigSnafu, ZeroDynamicDimSnafu};
use crate::Error;

/// Run settings
///
/// Everything here can come from a TOML file, and everything can be overridden on the command
/// line. A missing key keeps its default.
///
/// ```toml
/// model = "mnist.so"
/// dynamic_dim = 1
/// seed = 4533
/// log = "omrun=debug"
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Compiled model library to open; the linked-in model if unset
    pub model: Option<PathBuf>,
    /// Size used for an input's dynamic (`-1`) dimension
    pub dynamic_dim: u32,
    /// Seed for the input generator; random if unset
    pub seed: Option<u64>,
    /// Log filter, in env_logger syntax
    pub log: Option<String>,
}

impl Config {
    /// Load the configuration from the specified path
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let buf = fs::read_to_string(path).context(FailedToReadConfigSnafu { path })?;
        let cfg: Self = toml::from_str(&buf).context(InvalidConfigSnafu { path })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Error> {
        ensure!(self.dynamic_dim > 0, ZeroDynamicDimSnafu);
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: None,
            dynamic_dim: 1,
            seed: None,
            log: None,
        }
    }
}
