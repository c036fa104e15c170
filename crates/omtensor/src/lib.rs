//!
//! Safe wrappers around the onnx-mlir `OMTensor` runtime ABI
//!
//! Tensors and tensor lists are plain Rust values. They only turn into `OMTensor`s for the
//! duration of a call into a model library: either one opened at runtime ([LoadedModel]) or the
//! one the binary was linked against (`CompiledModel`, which needs the `link` feature).
//!

#[macro_use]
extern crate log;

#[allow(nonstandard_style)]
pub(crate) mod ffi;

#[cfg(feature = "link")]
mod compiled;
mod dtype;
mod error;
mod list;
mod loaded;
mod model;
mod runtime;
mod tensor;

#[cfg(feature = "link")]
pub use compiled::CompiledModel;
pub use dtype::ElementType;
pub use error::Error;
pub use list::TensorList;
pub use loaded::LoadedModel;
pub use model::{Model, MAIN_GRAPH};
pub use tensor::{Tensor, TensorData, TensorElement};
