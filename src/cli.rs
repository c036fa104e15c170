use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::Error;

#[derive(Parser, Debug)]
#[command(
    name = "omrun",
    version,
    about = "Run a compiled ONNX model on random inputs and print its outputs"
)]
pub struct Cli {
    /// Compiled model library (.so) to run
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Size used for an input's dynamic (-1) dimension
    #[arg(long)]
    pub dynamic_dim: Option<u32>,

    /// Seed for the input generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter (falls back to RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    /// Merge the config file (if any) with the flags; flags win
    pub fn resolve(&self) -> Result<Config, Error> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(model) = &self.model {
            cfg.model = Some(model.clone());
        }
        if let Some(dim) = self.dynamic_dim {
            cfg.dynamic_dim = dim;
        }
        if let Some(seed) = self.seed {
            cfg.seed = Some(seed);
        }
        if let Some(log) = &self.log {
            cfg.log = Some(log.clone());
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
