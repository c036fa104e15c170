use std::path::{Path, PathBuf};

use libloading::Library;
use snafu::{ensure, ResultExt};

use crate::error::{FailedToLoadModelSnafu, MissingSymbolSnafu, ModelNotFoundSnafu};
use crate::ffi::Api;
use crate::{runtime, Error, Model, TensorList};

/// A compiled model library opened at runtime
///
/// Same behavior as `CompiledModel`, but the `.so` is picked when the
/// program starts instead of when it's built.
///
/// # Examples
///
/// ```no_run
/// # use omtensor::{LoadedModel, Model, Error};
/// # fn main() -> Result<(), Error> {
/// let model = LoadedModel::open("mnist.so")?;
/// println!("{}", model.input_signature()?);
/// # Ok(())
/// # }
/// ```
pub struct LoadedModel {
    path: PathBuf,
    api: Api,
    // Keeps every pointer in `api` valid
    _lib: Library,
}

impl LoadedModel {
    /// Open the model library at `path` and look up the runtime functions in it
    ///
    /// # Errors
    ///
    /// [Error::ModelNotFound] if there's no file at `path`, [Error::FailedToLoadModel] if it isn't
    /// a loadable library and [Error::MissingSymbol] if it doesn't export the runtime.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        ensure!(path.is_file(), ModelNotFoundSnafu { path });

        debug!("loading model library {}", path.display());
        let lib = unsafe { Library::new(path) }.context(FailedToLoadModelSnafu { path })?;

        let api = unsafe {
            Api {
                input_signature: symbol(&lib, "omInputSignature")?,
                output_signature: symbol(&lib, "omOutputSignature")?,
                tensor_create: symbol(&lib, "omTensorCreateWithOwnership")?,
                tensor_destroy: symbol(&lib, "omTensorDestroy")?,
                tensor_data_ptr: symbol(&lib, "omTensorGetDataPtr")?,
                tensor_shape: symbol(&lib, "omTensorGetShape")?,
                tensor_rank: symbol(&lib, "omTensorGetRank")?,
                tensor_data_type: symbol(&lib, "omTensorGetDataType")?,
                tensor_num_elems: symbol(&lib, "omTensorGetNumElems")?,
                list_create: symbol(&lib, "omTensorListCreateWithOwnership")?,
                list_destroy: symbol(&lib, "omTensorListDestroy")?,
                list_size: symbol(&lib, "omTensorListGetSize")?,
                list_get: symbol(&lib, "omTensorListGetOmtByIndex")?,
                run: symbol(&lib, "run_main_graph")?,
            }
        };

        Ok(Self {
            path: path.to_owned(),
            api,
            _lib: lib,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Look up a function pointer in `lib`
///
/// # Safety
///
/// `T` must match the symbol's real signature, and the pointer must not outlive `lib`.
unsafe fn symbol<T: Copy>(lib: &Library, name: &'static str) -> Result<T, Error> {
    let sym = lib
        .get::<T>(name.as_bytes())
        .context(MissingSymbolSnafu { symbol: name })?;

    Ok(*sym)
}

impl Model for LoadedModel {
    fn input_signature(&self) -> Result<String, Error> {
        runtime::signature("input", self.api.input_signature)
    }

    fn output_signature(&self) -> Result<String, Error> {
        runtime::signature("output", self.api.output_signature)
    }

    fn run(&mut self, inputs: &TensorList<'_>) -> Result<TensorList<'static>, Error> {
        runtime::run(&self.api, inputs)
    }
}
