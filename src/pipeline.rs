//!
//! The whole run, start to finish
//!
//! Fetch the input signature, parse it, generate random inputs, run the model and print what
//! comes back. Every step either succeeds or ends the run.
//!

use std::io::Write;

use omtensor::{Model, Tensor, TensorList};
use snafu::ResultExt;

use crate::config::Config;
use crate::error::OutputSnafu;
use crate::generator::Generator;
use crate::printer;
use crate::signature::{self, TensorDescriptor};
use crate::Error;

pub struct Pipeline<M: Model> {
    model: M,
    generator: Generator,
    dynamic_dim: i64,
}

impl<M: Model> Pipeline<M> {
    pub fn new(model: M, cfg: &Config) -> Self {
        let generator = match cfg.seed {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };

        Self {
            model,
            generator,
            dynamic_dim: i64::from(cfg.dynamic_dim),
        }
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Ask the model what it wants as input
    pub fn fetch_signature(&self) -> Result<String, Error> {
        let sig = self.model.input_signature()?;
        debug!("input signature: {sig}");

        // Only informational, plenty of models don't bother with it
        match self.model.output_signature() {
            Ok(out_sig) => debug!("output signature: {out_sig}"),
            Err(err) => debug!("no output signature: {err}"),
        }

        Ok(sig)
    }

    /// Parse the signature into input descriptors
    pub fn describe_inputs(&self, sig: &str) -> Result<Vec<TensorDescriptor>, Error> {
        signature::parse_with(sig, self.dynamic_dim)
    }

    /// One random tensor per descriptor
    pub fn generate_inputs(&mut self, descs: &[TensorDescriptor]) -> Result<Vec<Tensor>, Error> {
        descs
            .iter()
            .enumerate()
            .map(|(idx, desc)| -> Result<Tensor, Error> {
                let tensor = self.generator.generate(desc)?;
                info!(
                    "input_tensor[{idx}] ({}) has shape {:?}",
                    desc.name,
                    tensor.shape()
                );
                Ok(tensor)
            })
            .collect()
    }

    /// Hand the inputs to the model
    ///
    /// Blocks until inference is done. There's no retry; a failure here ends the run.
    pub fn invoke(&mut self, inputs: &TensorList<'_>) -> Result<TensorList<'static>, Error> {
        let entry = self.model.entry_point().to_owned();
        debug!("invoking {entry} with {} inputs", inputs.len());

        let outputs = self.model.run(inputs)?;
        info!("{entry} returned {} outputs", outputs.len());

        Ok(outputs)
    }

    /// Run everything, writing the output dump to `out`
    pub fn run(&mut self, out: &mut impl Write) -> Result<(), Error> {
        let sig = self.fetch_signature()?;
        let descs = self.describe_inputs(&sig)?;

        // The generated tensors stay here; the list only points at them
        let inputs = self.generate_inputs(&descs)?;
        let input_list = TensorList::borrowing(&inputs);

        let outputs = self.invoke(&input_list)?;
        printer::print_outputs(out, &outputs).context(OutputSnafu)?;

        let released = input_list.release() + outputs.release();
        drop(inputs);
        debug!("teardown done, {released} tensors released with their lists");

        Ok(())
    }
}
