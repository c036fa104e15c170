//!
//! # omrun
//!
//! Drives a model compiled by onnx-mlir: reads its input signature, makes up random inputs that
//! fit it, runs inference and dumps every output tensor.
//!

#![deny(unused_must_use)]

#[macro_use]
extern crate log;

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod pipeline;
pub mod printer;
pub mod report;
pub mod signature;

pub use error::Error;
pub use pipeline::Pipeline;
pub use signature::TensorDescriptor;
