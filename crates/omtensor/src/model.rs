use crate::{Error, TensorList};

/// Name of the inference entry point onnx-mlir emits for the main graph
pub const MAIN_GRAPH: &str = "run_main_graph";

/// A model that can describe its inputs and run inference
///
/// [LoadedModel](crate::LoadedModel) and `CompiledModel` are the real thing, backed by a model
/// library the compiler produced. Anything else implementing this (test doubles, mostly) gets the exact
/// same treatment from callers.
pub trait Model {
    /// The entry point this model runs
    fn entry_point(&self) -> &str {
        MAIN_GRAPH
    }

    /// JSON-ish description of the inputs the entry point expects
    ///
    /// For the mnist model this looks like
    /// `[    { "type" : "f32" , "dims" : [1 , 1 , 28 , 28] , "name" : "Input3" }]`
    fn input_signature(&self) -> Result<String, Error>;

    /// Same as [Model::input_signature], for the outputs
    fn output_signature(&self) -> Result<String, Error>;

    /// Run inference
    ///
    /// Blocks until the model is done. The returned list owns its tensors.
    ///
    /// # Errors
    ///
    /// Returns [Error::InferenceFailed] if the entry point reports a failure.
    fn run(&mut self, inputs: &TensorList<'_>) -> Result<TensorList<'static>, Error>;
}
