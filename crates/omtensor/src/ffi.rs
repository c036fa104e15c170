//! Raw declarations for the pieces of `OnnxMlirRuntime.h` we use
//!
//! These come from the compiled model library itself, which bundles the runtime. The same set of
//! functions is reachable two ways: linked in at build time (`LINKED`) or looked up in a library
//! opened at runtime. Both end up as an [Api] table.

use libc::{c_char, c_int, c_void};

#[repr(C)]
pub struct OMTensor {
    _private: [u8; 0],
}

#[repr(C)]
pub struct OMTensorList {
    _private: [u8; 0],
}

/// `OM_DATA_TYPE`
pub type OmDataType = c_int;

pub type SignatureFn = unsafe extern "C" fn(entry_point: *const c_char) -> *const c_char;
pub type TensorCreateFn = unsafe extern "C" fn(
    data_ptr: *mut c_void,
    shape: *const i64,
    rank: i64,
    dtype: OmDataType,
    owning: i64,
) -> *mut OMTensor;
pub type TensorDestroyFn = unsafe extern "C" fn(tensor: *mut OMTensor);
pub type TensorDataPtrFn = unsafe extern "C" fn(tensor: *const OMTensor) -> *mut c_void;
pub type TensorShapeFn = unsafe extern "C" fn(tensor: *const OMTensor) -> *const i64;
pub type TensorI64Fn = unsafe extern "C" fn(tensor: *const OMTensor) -> i64;
pub type TensorDataTypeFn = unsafe extern "C" fn(tensor: *const OMTensor) -> OmDataType;
pub type ListCreateFn =
    unsafe extern "C" fn(tensors: *mut *mut OMTensor, n: i64, owning: i64) -> *mut OMTensorList;
pub type ListDestroyFn = unsafe extern "C" fn(list: *mut OMTensorList);
pub type ListSizeFn = unsafe extern "C" fn(list: *mut OMTensorList) -> i64;
pub type ListGetFn = unsafe extern "C" fn(list: *mut OMTensorList, index: i64) -> *mut OMTensor;
pub type RunFn = unsafe extern "C" fn(inputs: *mut OMTensorList) -> *mut OMTensorList;

/// Every runtime function the safe wrappers call
#[derive(Clone, Copy)]
pub struct Api {
    pub input_signature: SignatureFn,
    pub output_signature: SignatureFn,
    pub tensor_create: TensorCreateFn,
    pub tensor_destroy: TensorDestroyFn,
    pub tensor_data_ptr: TensorDataPtrFn,
    pub tensor_shape: TensorShapeFn,
    pub tensor_rank: TensorI64Fn,
    pub tensor_data_type: TensorDataTypeFn,
    pub tensor_num_elems: TensorI64Fn,
    pub list_create: ListCreateFn,
    pub list_destroy: ListDestroyFn,
    pub list_size: ListSizeFn,
    pub list_get: ListGetFn,
    /// The inference entry point emitted by the compiler
    pub run: RunFn,
}

#[cfg(feature = "link")]
extern "C" {
    fn omInputSignature(entry_point: *const c_char) -> *const c_char;
    fn omOutputSignature(entry_point: *const c_char) -> *const c_char;

    fn omTensorCreateWithOwnership(
        data_ptr: *mut c_void,
        shape: *const i64,
        rank: i64,
        dtype: OmDataType,
        owning: i64,
    ) -> *mut OMTensor;
    fn omTensorDestroy(tensor: *mut OMTensor);
    fn omTensorGetDataPtr(tensor: *const OMTensor) -> *mut c_void;
    fn omTensorGetShape(tensor: *const OMTensor) -> *const i64;
    fn omTensorGetRank(tensor: *const OMTensor) -> i64;
    fn omTensorGetDataType(tensor: *const OMTensor) -> OmDataType;
    fn omTensorGetNumElems(tensor: *const OMTensor) -> i64;

    fn omTensorListCreateWithOwnership(
        tensors: *mut *mut OMTensor,
        n: i64,
        owning: i64,
    ) -> *mut OMTensorList;
    fn omTensorListDestroy(list: *mut OMTensorList);
    fn omTensorListGetSize(list: *mut OMTensorList) -> i64;
    fn omTensorListGetOmtByIndex(list: *mut OMTensorList, index: i64) -> *mut OMTensor;

    fn run_main_graph(inputs: *mut OMTensorList) -> *mut OMTensorList;
}

/// The runtime this binary was linked against
#[cfg(feature = "link")]
pub static LINKED: Api = Api {
    input_signature: omInputSignature,
    output_signature: omOutputSignature,
    tensor_create: omTensorCreateWithOwnership,
    tensor_destroy: omTensorDestroy,
    tensor_data_ptr: omTensorGetDataPtr,
    tensor_shape: omTensorGetShape,
    tensor_rank: omTensorGetRank,
    tensor_data_type: omTensorGetDataType,
    tensor_num_elems: omTensorGetNumElems,
    list_create: omTensorListCreateWithOwnership,
    list_destroy: omTensorListDestroy,
    list_size: omTensorListGetSize,
    list_get: omTensorListGetOmtByIndex,
    run: run_main_graph,
};
