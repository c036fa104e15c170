use std::path::PathBuf;

use snafu::prelude::*;

/// omrun's error type
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Malformed signature at byte {offset}: expected {expected}"))]
    Syntax {
        offset: usize,
        expected: &'static str,
    },
    #[snafu(display("Signature entry {index} has no \"{field}\" field"))]
    MissingField { index: usize, field: &'static str },

    #[snafu(display(
        "Example client only supports a single dynamic dimension (-1). However multiple dynamic dimensions were found for input {name} with shape {dims:?}"
    ))]
    MultipleDynamicDims { name: String, dims: Vec<i64> },
    #[snafu(display(
        "Example client only supports signature type: f32 but got type {tag} for input {name}"
    ))]
    UnsupportedType { name: String, tag: String },
    #[snafu(display("Input {name} has invalid dimension {dim}"))]
    InvalidDimension { name: String, dim: i64 },
    #[snafu(display("Input {name} with shape {dims:?} is too large to allocate"))]
    TooManyElements { name: String, dims: Vec<i64> },

    #[snafu(display("{source}"))]
    Model { source: omtensor::Error },

    #[snafu(display("Failed to read config {}: {source}", path.display()))]
    FailedToReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Invalid config {}: {source}", path.display()))]
    InvalidConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[snafu(display("Dynamic dimension size must be at least 1"))]
    ZeroDynamicDim,

    #[snafu(display("No model to run: pass --model <path> or set `model` in the config file"))]
    NoModel,

    #[snafu(display("Failed to write results: {source}"))]
    Output { source: std::io::Error },
    #[snafu(display("Failed to install logger: {source}"))]
    Logger { source: log::SetLoggerError },
}

impl From<omtensor::Error> for Error {
    fn from(source: omtensor::Error) -> Self {
        Self::Model { source }
    }
}
