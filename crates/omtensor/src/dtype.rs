use core::fmt;

/// Element types the runtime can hand us and that we know how to decode
///
/// The discriminants are the `OM_DATA_TYPE` codes from `onnx/onnx.proto`, which is what
/// `omTensorGetDataType` returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ElementType {
    Float32 = 1,
    Uint8 = 2,
    Int8 = 3,
    Uint16 = 4,
    Int16 = 5,
    Int32 = 6,
    Int64 = 7,
    String = 8,
    Bool = 9,
    Float64 = 11,
    Uint32 = 12,
    Uint64 = 13,
}

impl ElementType {
    /// Every supported type, in no particular order
    pub const ALL: [ElementType; 12] = [
        Self::Bool,
        Self::Int8,
        Self::Uint8,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Int64,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
        Self::String,
    ];

    /// Map a raw `OM_DATA_TYPE` code
    ///
    /// Returns [None] for codes we don't decode (float16, complex, bfloat16, undefined, ...).
    pub fn from_onnx(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.onnx_code() == code)
    }

    /// The `OM_DATA_TYPE` code for this type
    pub fn onnx_code(self) -> i32 {
        self as i32
    }

    /// Map a tag from a model signature (`"f32"`, `"i64"`, `"ui8"`, ...)
    pub fn from_signature_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "i1" | "bool" => Self::Bool,
            "i8" => Self::Int8,
            "ui8" => Self::Uint8,
            "i16" => Self::Int16,
            "ui16" => Self::Uint16,
            "i32" => Self::Int32,
            "ui32" => Self::Uint32,
            "i64" => Self::Int64,
            "ui64" => Self::Uint64,
            "f32" => Self::Float32,
            "f64" => Self::Float64,
            "string" | "!krnl.string" | "!onnx.String" => Self::String,
            _ => return None,
        })
    }

    /// Short name used when printing values
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "i8",
            Self::Uint8 => "u8",
            Self::Int16 => "i16",
            Self::Uint16 => "u16",
            Self::Int32 => "i32",
            Self::Uint32 => "u32",
            Self::Int64 => "i64",
            Self::Uint64 => "u64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::String => "char",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onnx_codes() {
        assert_eq!(ElementType::from_onnx(1), Some(ElementType::Float32));
        assert_eq!(ElementType::from_onnx(9), Some(ElementType::Bool));
        assert_eq!(ElementType::from_onnx(13), Some(ElementType::Uint64));

        // float16 and undefined
        assert_eq!(ElementType::from_onnx(10), None);
        assert_eq!(ElementType::from_onnx(0), None);

        for ty in ElementType::ALL {
            assert_eq!(ElementType::from_onnx(ty.onnx_code()), Some(ty));
        }
    }

    #[test]
    fn signature_tags() {
        assert_eq!(ElementType::from_signature_tag("f32"), Some(ElementType::Float32));
        assert_eq!(ElementType::from_signature_tag("ui16"), Some(ElementType::Uint16));
        assert_eq!(ElementType::from_signature_tag("i1"), Some(ElementType::Bool));
        assert_eq!(ElementType::from_signature_tag("f16"), None);
        assert_eq!(ElementType::from_signature_tag("F32"), None);
    }
}
