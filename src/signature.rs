//!
//! Model input signature parsing
//!
//! The runtime describes a model's inputs as a small JSON array:
//!
//! ```text
//! [    { "type" : "f32" , "dims" : [1 , 1 , 28 , 28] , "name" : "Input3" }]
//! ```
//!
//! This is a recursive descent parser for exactly that shape. It doesn't try to be a general
//! JSON parser: values are strings or lists of integers, nothing nests deeper than that.
//!

use std::mem::size_of;

use omtensor::ElementType;
use snafu::{ensure, OptionExt};

use crate::error::{
    InvalidDimensionSnafu, MissingFieldSnafu, MultipleDynamicDimsSnafu, SyntaxSnafu,
    TooManyElementsSnafu, UnsupportedTypeSnafu,
};
use crate::Error;

/// Dimension value the runtime uses for "any size"
pub const DYNAMIC_DIM: i64 = -1;

/// One declared model input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TensorDescriptor {
    pub name: String,
    /// Type exactly as the signature spells it
    pub type_tag: String,
    pub element_type: Option<ElementType>,
    /// Declared dims, `-1` for dynamic
    pub dims: Vec<i64>,
    /// Dims with the dynamic one filled in
    pub shape: Vec<i64>,
    pub element_count: usize,
}

impl TensorDescriptor {
    /// Whether one of the declared dims is dynamic
    pub fn is_dynamic(&self) -> bool {
        self.dims.contains(&DYNAMIC_DIM)
    }
}

/// Parse a signature, treating dynamic dims as 1
pub fn parse(sig: &str) -> Result<Vec<TensorDescriptor>, Error> {
    parse_with(sig, 1)
}

/// Parse a signature, substituting `dynamic_dim` for the (single) dynamic dim of each input
///
/// # Errors
///
/// Besides syntax errors, every input must be `f32` and have at most one dynamic dim. Inputs are
/// checked in order and the first bad one ends parsing.
pub fn parse_with(sig: &str, dynamic_dim: i64) -> Result<Vec<TensorDescriptor>, Error> {
    let entries = Parser::new(sig).signature()?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| describe(index, entry, dynamic_dim))
        .collect()
}

/// Fields of one `{...}` group, before validation
#[derive(Default)]
struct Entry {
    name: Option<String>,
    tag: Option<String>,
    dims: Option<Vec<i64>>,
}

fn describe(index: usize, entry: Entry, dynamic_dim: i64) -> Result<TensorDescriptor, Error> {
    let name = entry.name.context(MissingFieldSnafu { index, field: "name" })?;
    let type_tag = entry.tag.context(MissingFieldSnafu { index, field: "type" })?;
    let dims = entry.dims.context(MissingFieldSnafu { index, field: "dims" })?;

    let mut shape = Vec::with_capacity(dims.len());
    let mut element_count = 1usize;
    let mut found_dynamic = false;
    for &dim in &dims {
        let dim = if dim == DYNAMIC_DIM {
            ensure!(
                !found_dynamic,
                MultipleDynamicDimsSnafu {
                    name: name.as_str(),
                    dims: dims.clone(),
                }
            );
            found_dynamic = true;
            dynamic_dim
        } else {
            ensure!(
                dim >= 0,
                InvalidDimensionSnafu {
                    name: name.as_str(),
                    dim,
                }
            );
            dim
        };

        element_count = element_count
            .checked_mul(dim as usize)
            .context(TooManyElementsSnafu {
                name: name.as_str(),
                dims: dims.clone(),
            })?;
        shape.push(dim);
    }

    let element_type = ElementType::from_signature_tag(&type_tag);
    ensure!(
        element_type == Some(ElementType::Float32),
        UnsupportedTypeSnafu {
            name: name.as_str(),
            tag: type_tag.as_str(),
        }
    );

    // The generated buffer has to fit in one allocation
    let bytes = element_count.checked_mul(size_of::<f32>());
    ensure!(
        bytes.is_some_and(|b| b <= isize::MAX as usize),
        TooManyElementsSnafu {
            name: name.as_str(),
            dims: dims.clone(),
        }
    );

    trace!("input {index} {name}: {type_tag} {dims:?} -> {shape:?}");

    Ok(TensorDescriptor {
        name,
        type_tag,
        element_type,
        dims,
        shape,
        element_count,
    })
}

struct Parser<'s> {
    src: &'s [u8],
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(src: &'s str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    fn fail<T>(&self, expected: &'static str) -> Result<T, Error> {
        SyntaxSnafu {
            offset: self.pos,
            expected,
        }
        .fail()
    }

    fn skip_ws(&mut self) {
        while self
            .src
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    /// Next non-whitespace byte, without consuming it
    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.src.get(self.pos).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8, expected: &'static str) -> Result<(), Error> {
        if self.eat(b) {
            Ok(())
        } else {
            self.fail(expected)
        }
    }

    /// `'[' (object (',' object)*)? ']'`, then nothing but whitespace
    fn signature(mut self) -> Result<Vec<Entry>, Error> {
        self.expect(b'[', "'['")?;

        let mut entries = Vec::new();
        if !self.eat(b']') {
            loop {
                entries.push(self.object()?);
                if self.eat(b']') {
                    break;
                }
                self.expect(b',', "',' or ']'")?;
            }
        }

        if self.peek().is_some() {
            return self.fail("end of signature");
        }

        Ok(entries)
    }

    /// `'{' field (',' field)* '}'`
    fn object(&mut self) -> Result<Entry, Error> {
        self.expect(b'{', "'{'")?;

        let mut entry = Entry::default();
        loop {
            let key = self.string()?;
            self.expect(b':', "':'")?;

            match key.as_str() {
                "name" => entry.name = Some(self.string()?),
                "type" => entry.tag = Some(self.string()?),
                "dims" => entry.dims = Some(self.int_list()?),
                other => {
                    debug!("ignoring signature field {other:?}");
                    self.skip_value()?;
                }
            }

            if self.eat(b'}') {
                return Ok(entry);
            }
            self.expect(b',', "',' or '}'")?;
        }
    }

    fn skip_value(&mut self) -> Result<(), Error> {
        match self.peek() {
            Some(b'"') => self.string().map(drop),
            Some(b'[') => self.int_list().map(drop),
            _ => self.int().map(drop),
        }
    }

    /// `'[' (int (',' int)*)? ']'`
    fn int_list(&mut self) -> Result<Vec<i64>, Error> {
        self.expect(b'[', "'['")?;

        let mut ints = Vec::new();
        if self.eat(b']') {
            return Ok(ints);
        }
        loop {
            ints.push(self.int()?);
            if self.eat(b']') {
                return Ok(ints);
            }
            self.expect(b',', "',' or ']'")?;
        }
    }

    fn int(&mut self) -> Result<i64, Error> {
        self.skip_ws();
        let start = self.pos;

        if self.src.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        let digits = self.pos;
        while self.src.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if self.pos == digits {
            self.pos = start;
            return self.fail("an integer");
        }

        // Only ASCII in here, so this can't fail
        let text = core::str::from_utf8(&self.src[start..self.pos]).unwrap_or_default();
        match text.parse() {
            Ok(i) => Ok(i),
            Err(_) => {
                self.pos = start;
                self.fail("an integer that fits in 64 bits")
            }
        }
    }

    fn string(&mut self) -> Result<String, Error> {
        self.expect(b'"', "'\"'")?;

        let mut buf = Vec::new();
        loop {
            let Some(&b) = self.src.get(self.pos) else {
                return self.fail("closing '\"'");
            };
            self.pos += 1;

            match b {
                b'"' => break,
                b'\\' => {
                    let escaped = match self.src.get(self.pos) {
                        Some(b'"') => b'"',
                        Some(b'\\') => b'\\',
                        Some(b'/') => b'/',
                        Some(b'n') => b'\n',
                        Some(b't') => b'\t',
                        Some(b'r') => b'\r',
                        _ => return self.fail("a simple escape"),
                    };
                    self.pos += 1;
                    buf.push(escaped);
                }
                b => buf.push(b),
            }
        }

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
