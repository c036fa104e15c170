use crate::ffi::LINKED;
use crate::{runtime, Error, Model, TensorList};

/// The model library this binary was linked against
///
/// # Examples
///
/// ```no_run
/// # use omtensor::{CompiledModel, Model, Error};
/// # fn main() -> Result<(), Error> {
/// let model = CompiledModel::new();
/// println!("{}", model.input_signature()?);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct CompiledModel {
    _private: (),
}

impl CompiledModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Model for CompiledModel {
    fn input_signature(&self) -> Result<String, Error> {
        runtime::signature("input", LINKED.input_signature)
    }

    fn output_signature(&self) -> Result<String, Error> {
        runtime::signature("output", LINKED.output_signature)
    }

    fn run(&mut self, inputs: &TensorList<'_>) -> Result<TensorList<'static>, Error> {
        runtime::run(&LINKED, inputs)
    }
}
