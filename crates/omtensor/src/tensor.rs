use crate::error::{InvalidDimensionSnafu, ShapeMismatchSnafu};
use crate::{ElementType, Error};

use snafu::ensure;

/// Typed storage for a [Tensor]
///
/// One variant per [ElementType]. Anything the runtime hands us that we can't decode ends up in
/// [TensorData::Other] with just its raw type code.
#[derive(Clone, Debug, PartialEq)]
pub enum TensorData {
    Bool(Vec<bool>),
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    /// Raw characters
    Str(Vec<u8>),
    /// A type we don't know how to decode
    Other { onnx_type: i32 },
}

impl TensorData {
    /// Element type, or [None] for [TensorData::Other]
    pub fn element_type(&self) -> Option<ElementType> {
        Some(match self {
            Self::Bool(_) => ElementType::Bool,
            Self::I8(_) => ElementType::Int8,
            Self::U8(_) => ElementType::Uint8,
            Self::I16(_) => ElementType::Int16,
            Self::U16(_) => ElementType::Uint16,
            Self::I32(_) => ElementType::Int32,
            Self::U32(_) => ElementType::Uint32,
            Self::I64(_) => ElementType::Int64,
            Self::U64(_) => ElementType::Uint64,
            Self::F32(_) => ElementType::Float32,
            Self::F64(_) => ElementType::Float64,
            Self::Str(_) => ElementType::String,
            Self::Other { .. } => return None,
        })
    }

    /// The raw `OM_DATA_TYPE` code
    pub fn onnx_type(&self) -> i32 {
        match self {
            Self::Other { onnx_type } => *onnx_type,
            data => data.element_type().map_or(0, ElementType::onnx_code),
        }
    }

    /// Number of elements actually held
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::I8(v) => v.len(),
            Self::U8(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::U64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::Str(v) => v.len(),
            Self::Other { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pointer to the first element, null for [TensorData::Other]
    pub(crate) fn as_ptr(&self) -> *const libc::c_void {
        match self {
            Self::Bool(v) => v.as_ptr().cast(),
            Self::I8(v) => v.as_ptr().cast(),
            Self::U8(v) => v.as_ptr().cast(),
            Self::I16(v) => v.as_ptr().cast(),
            Self::U16(v) => v.as_ptr().cast(),
            Self::I32(v) => v.as_ptr().cast(),
            Self::U32(v) => v.as_ptr().cast(),
            Self::I64(v) => v.as_ptr().cast(),
            Self::U64(v) => v.as_ptr().cast(),
            Self::F32(v) => v.as_ptr().cast(),
            Self::F64(v) => v.as_ptr().cast(),
            Self::Str(v) => v.as_ptr().cast(),
            Self::Other { .. } => core::ptr::null(),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Rust types that can back a [Tensor]
///
/// Implemented for `bool`, the fixed-size integers and the floats. It's sealed: the set of
/// element types is fixed by the runtime.
///
/// # Examples
///
/// ```
/// # use omtensor::{Tensor, TensorElement, Error};
/// fn filled<T: TensorElement>(rows: i64, cols: i64, v: T) -> Result<Tensor, Error> {
///     Tensor::new([rows, cols], vec![v; (rows * cols) as usize])
/// }
///
/// # fn main() -> Result<(), Error> {
/// assert_eq!(filled(2, 3, 1.5f64)?.num_elems(), 6);
/// assert_eq!(filled(1, 4, 7u16)?.data().len(), 4);
/// # Ok(())
/// # }
/// ```
pub trait TensorElement: sealed::Sealed + Copy {
    const KIND: ElementType;

    fn wrap(data: Vec<Self>) -> TensorData;
}

macro_rules! tensor_element {
    ($($ty:ty => $kind:ident, $variant:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl TensorElement for $ty {
                const KIND: ElementType = ElementType::$kind;

                fn wrap(data: Vec<Self>) -> TensorData {
                    TensorData::$variant(data)
                }
            }
        )*
    };
}

tensor_element! {
    bool => Bool, Bool;
    i8 => Int8, I8;
    u8 => Uint8, U8;
    i16 => Int16, I16;
    u16 => Uint16, U16;
    i32 => Int32, I32;
    u32 => Uint32, U32;
    i64 => Int64, I64;
    u64 => Uint64, U64;
    f32 => Float32, F32;
    f64 => Float64, F64;
}

/// A shaped, typed, contiguous buffer
///
/// The buffer always holds exactly `product(shape)` elements, except for tensors of a type we
/// can't decode, which hold nothing.
///
/// # Examples
///
/// ```
/// # use omtensor::{ElementType, Tensor, Error};
/// # fn main() -> Result<(), Error> {
/// let t = Tensor::new([2, 3], vec![0.0f32; 6])?;
///
/// assert_eq!(t.num_elems(), 6);
/// assert_eq!(t.element_type(), Some(ElementType::Float32));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    shape: Vec<i64>,
    data: TensorData,
}

impl Tensor {
    /// Create a tensor from a shape and a typed buffer
    ///
    /// # Errors
    ///
    /// Fails if a dimension is negative or if the buffer length doesn't match the shape.
    pub fn new<T: TensorElement>(shape: impl Into<Vec<i64>>, data: Vec<T>) -> Result<Self, Error> {
        let shape: Vec<i64> = shape.into();
        trace!("new {} tensor with shape {shape:?}", T::KIND);

        Self::from_data(shape, T::wrap(data))
    }

    /// Create a string tensor holding raw characters
    pub fn string(shape: impl Into<Vec<i64>>, chars: Vec<u8>) -> Result<Self, Error> {
        Self::from_data(shape, TensorData::Str(chars))
    }

    /// Create a tensor from already-typed data
    pub fn from_data(shape: impl Into<Vec<i64>>, data: TensorData) -> Result<Self, Error> {
        let shape: Vec<i64> = shape.into();
        let expected = elem_count(&shape)?;

        if !matches!(data, TensorData::Other { .. }) {
            ensure!(
                data.len() == expected,
                ShapeMismatchSnafu {
                    shape,
                    expected,
                    actual: data.len(),
                }
            );
        }

        Ok(Self { shape, data })
    }

    /// A tensor of a type we can't decode; keeps the shape so it can still be reported
    pub fn opaque(shape: impl Into<Vec<i64>>, onnx_type: i32) -> Self {
        Self {
            shape: shape.into(),
            data: TensorData::Other { onnx_type },
        }
    }

    pub fn shape(&self) -> &[i64] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements described by the shape
    pub fn num_elems(&self) -> usize {
        self.shape.iter().map(|&d| d.max(0) as usize).product()
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.data.element_type()
    }

    pub fn data(&self) -> &TensorData {
        &self.data
    }
}

/// Number of elements in `shape`, rejecting negative dims
pub(crate) fn elem_count(shape: &[i64]) -> Result<usize, Error> {
    let mut count = 1usize;
    for &dim in shape {
        ensure!(
            dim >= 0,
            InvalidDimensionSnafu {
                shape: shape.to_vec(),
                dim,
            }
        );
        count = count.saturating_mul(dim as usize);
    }

    Ok(count)
}
