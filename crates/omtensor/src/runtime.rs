//! Moving tensors across the runtime boundary
//!
//! Shared by `CompiledModel` and [LoadedModel](crate::LoadedModel), which
//! only differ in where their [Api] table comes from.

use core::ffi::CStr;
use core::ptr::null_mut;
use std::io;

use libc::c_void;
use snafu::{ensure, ResultExt};

use crate::error::{
    FailedToCreateTensorSnafu, InferenceFailedSnafu, SignatureUnavailableSnafu,
    UnsupportedInputSnafu,
};
use crate::ffi::{Api, OMTensor, OMTensorList, SignatureFn};
use crate::model::MAIN_GRAPH;
use crate::{ElementType, Error, Tensor, TensorData, TensorList};

const ENTRY: &CStr = c"run_main_graph";

/// Query the input or output signature of the main graph
pub(crate) fn signature(kind: &'static str, query: SignatureFn) -> Result<String, Error> {
    let ptr = unsafe { query(ENTRY.as_ptr()) };
    ensure!(
        !ptr.is_null(),
        SignatureUnavailableSnafu {
            kind,
            entry_point: MAIN_GRAPH,
        }
    );

    // The runtime keeps ownership of the string
    let sig = unsafe { CStr::from_ptr(ptr) };
    Ok(sig.to_string_lossy().into_owned())
}

/// Run the main graph on `inputs` and copy its outputs back into Rust tensors
pub(crate) fn run(api: &Api, inputs: &TensorList<'_>) -> Result<TensorList<'static>, Error> {
    let raw_inputs = inputs
        .iter()
        .map(|t| RawTensor::wrap(api, t))
        .collect::<Result<Vec<_>, _>>()?;
    let mut input_list = RawInputList::new(api, &raw_inputs);

    debug!("calling {MAIN_GRAPH} with {} inputs", raw_inputs.len());
    let ptr = unsafe { (api.run)(input_list.as_mut_ptr()) };

    // Grab errno before anything else can clobber it
    if ptr.is_null() {
        return Err(io::Error::last_os_error()).context(InferenceFailedSnafu {
            entry_point: MAIN_GRAPH,
        });
    }
    let outputs = RawOutputList { api, ptr };

    let tensors = (0..outputs.len())
        .map(|idx| unsafe { read_tensor(api, outputs.get(idx)) })
        .collect::<Result<Vec<_>, _>>()?;

    // The input list points into `raw_inputs`, so it has to go first
    drop(input_list);
    drop(raw_inputs);

    Ok(TensorList::owning(tensors))
}

/// An `OMTensor` wrapping a buffer owned by a Rust [Tensor]
struct RawTensor<'a> {
    api: &'a Api,
    ptr: *mut OMTensor,
}

impl<'a> RawTensor<'a> {
    fn wrap(api: &'a Api, tensor: &Tensor) -> Result<Self, Error> {
        let data = tensor.data();
        let Some(ty) = data.element_type() else {
            return UnsupportedInputSnafu {
                onnx_type: data.onnx_type(),
            }
            .fail();
        };

        // owning = 0: the runtime must never free Rust's buffer
        let ptr = unsafe {
            (api.tensor_create)(
                data.as_ptr() as *mut c_void,
                tensor.shape().as_ptr(),
                tensor.rank() as i64,
                ty.onnx_code(),
                0,
            )
        };
        ensure!(!ptr.is_null(), FailedToCreateTensorSnafu { ty });

        Ok(Self { api, ptr })
    }
}

impl Drop for RawTensor<'_> {
    fn drop(&mut self) {
        unsafe {
            (self.api.tensor_destroy)(self.ptr);
        }
    }
}

/// Non-owning `OMTensorList` over a set of [RawTensor]s
struct RawInputList<'a> {
    api: &'a Api,
    ptr: *mut OMTensorList,
    // The runtime keeps a pointer to this array, not a copy
    _tensors: Vec<*mut OMTensor>,
}

impl<'a> RawInputList<'a> {
    fn new(api: &'a Api, tensors: &[RawTensor<'_>]) -> Self {
        let mut ptrs: Vec<*mut OMTensor> = tensors.iter().map(|t| t.ptr).collect();
        let array = if ptrs.is_empty() {
            null_mut()
        } else {
            ptrs.as_mut_ptr()
        };

        let ptr = unsafe { (api.list_create)(array, ptrs.len() as i64, 0) };

        Self {
            api,
            ptr,
            _tensors: ptrs,
        }
    }

    fn as_mut_ptr(&mut self) -> *mut OMTensorList {
        self.ptr
    }
}

impl Drop for RawInputList<'_> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                (self.api.list_destroy)(self.ptr);
            }
        }
    }
}

/// The list `run_main_graph` hands back; we're responsible for destroying it
struct RawOutputList<'a> {
    api: &'a Api,
    ptr: *mut OMTensorList,
}

impl RawOutputList<'_> {
    fn len(&self) -> usize {
        unsafe { (self.api.list_size)(self.ptr).max(0) as usize }
    }

    fn get(&self, idx: usize) -> *mut OMTensor {
        unsafe { (self.api.list_get)(self.ptr, idx as i64) }
    }
}

impl Drop for RawOutputList<'_> {
    fn drop(&mut self) {
        unsafe {
            (self.api.list_destroy)(self.ptr);
        }
    }
}

/// Copy an output `OMTensor` into a Rust [Tensor]
///
/// # Safety
///
/// `ptr` must point to a live `OMTensor` created through `api`.
unsafe fn read_tensor(api: &Api, ptr: *mut OMTensor) -> Result<Tensor, Error> {
    let rank = (api.tensor_rank)(ptr).max(0) as usize;
    let shape = read::<i64>((api.tensor_shape)(ptr).cast(), rank);

    let n = (api.tensor_num_elems)(ptr).max(0) as usize;
    let code = (api.tensor_data_type)(ptr);
    let buf = (api.tensor_data_ptr)(ptr).cast_const();

    let Some(ty) = ElementType::from_onnx(code) else {
        warn!("output tensor has OM type {code}, not decoding its values");
        return Ok(Tensor::opaque(shape, code));
    };

    let data = match ty {
        // C's bool may hold anything non-zero, so don't read it as a Rust bool directly
        ElementType::Bool => TensorData::Bool(read::<u8>(buf, n).into_iter().map(|b| b != 0).collect()),
        ElementType::Int8 => TensorData::I8(read(buf, n)),
        ElementType::Uint8 => TensorData::U8(read(buf, n)),
        ElementType::Int16 => TensorData::I16(read(buf, n)),
        ElementType::Uint16 => TensorData::U16(read(buf, n)),
        ElementType::Int32 => TensorData::I32(read(buf, n)),
        ElementType::Uint32 => TensorData::U32(read(buf, n)),
        ElementType::Int64 => TensorData::I64(read(buf, n)),
        ElementType::Uint64 => TensorData::U64(read(buf, n)),
        ElementType::Float32 => TensorData::F32(read(buf, n)),
        ElementType::Float64 => TensorData::F64(read(buf, n)),
        ElementType::String => TensorData::Str(read(buf, n)),
    };

    Tensor::from_data(shape, data)
}

/// Copy `n` elements out of a runtime-owned buffer
///
/// # Safety
///
/// `ptr` must be null or valid for `n` reads of `T`.
unsafe fn read<T: Copy>(ptr: *const c_void, n: usize) -> Vec<T> {
    if ptr.is_null() || n == 0 {
        return Vec::new();
    }

    core::slice::from_raw_parts(ptr.cast::<T>(), n).to_vec()
}
