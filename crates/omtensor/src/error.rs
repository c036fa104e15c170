use std::path::PathBuf;

use snafu::prelude::*;

use crate::ElementType;

/// omtensor's error type
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Shape {shape:?} holds {expected} elements but the buffer has {actual}"))]
    ShapeMismatch {
        shape: Vec<i64>,
        expected: usize,
        actual: usize,
    },
    #[snafu(display("Invalid dimension {dim} in shape {shape:?}"))]
    InvalidDimension { shape: Vec<i64>, dim: i64 },

    #[snafu(display("No {kind} signature for entry point {entry_point}"))]
    SignatureUnavailable {
        kind: &'static str,
        entry_point: String,
    },
    #[snafu(display("{entry_point} encountered an error: {source}"))]
    InferenceFailed {
        entry_point: String,
        source: std::io::Error,
    },
    #[snafu(display("Can't pass a tensor of OM type {onnx_type} across the runtime boundary"))]
    UnsupportedInput { onnx_type: i32 },
    #[snafu(display("Runtime refused to create a tensor of type {ty}"))]
    FailedToCreateTensor { ty: ElementType },

    #[snafu(display("The compiled model was not found at {}", path.display()))]
    ModelNotFound { path: PathBuf },
    #[snafu(display("Failed to load model library {}: {source}", path.display()))]
    FailedToLoadModel {
        path: PathBuf,
        source: libloading::Error,
    },
    #[snafu(display("Model library doesn't export {symbol}: {source}"))]
    MissingSymbol {
        symbol: &'static str,
        source: libloading::Error,
    },
}
