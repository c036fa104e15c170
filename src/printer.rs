//!
//! Human-readable dump of output tensors
//!

use std::fmt::Display;
use std::io::{self, Write};

use omtensor::{Tensor, TensorData, TensorList};

/// Print every tensor in `outputs`, in order
pub fn print_outputs(out: &mut impl Write, outputs: &TensorList<'_>) -> io::Result<()> {
    for (idx, tensor) in outputs.iter().enumerate() {
        print_tensor(out, idx, tensor)?;
    }

    out.flush()
}

/// Print one tensor's shape and its values, one per line
///
/// Tensors of a type we can't decode get a note instead of values.
pub fn print_tensor(out: &mut impl Write, idx: usize, tensor: &Tensor) -> io::Result<()> {
    write!(out, "output_tensor[{idx}] has shape [ ")?;
    for dim in tensor.shape() {
        write!(out, "{dim} ")?;
    }
    write!(out, "] and values ")?;

    let data = tensor.data();
    let Some(ty) = data.element_type() else {
        warn!("skipping values of output_tensor[{idx}]");
        return writeln!(out, "of unsupported type {}", data.onnx_type());
    };
    writeln!(out, "of type {ty}[]:")?;

    match data {
        TensorData::Bool(v) => values(out, v),
        TensorData::I8(v) => values(out, v),
        TensorData::U8(v) => values(out, v),
        TensorData::I16(v) => values(out, v),
        TensorData::U16(v) => values(out, v),
        TensorData::I32(v) => values(out, v),
        TensorData::U32(v) => values(out, v),
        TensorData::I64(v) => values(out, v),
        TensorData::U64(v) => values(out, v),
        TensorData::F32(v) => values(out, v),
        TensorData::F64(v) => values(out, v),
        TensorData::Str(chars) => values(out, chars.iter().map(|c| c.escape_ascii())),
        TensorData::Other { .. } => Ok(()),
    }
}

fn values<T: Display>(out: &mut impl Write, vals: impl IntoIterator<Item = T>) -> io::Result<()> {
    for v in vals {
        writeln!(out, "\t{v}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tensor: &Tensor) -> String {
        let mut buf = Vec::new();
        print_tensor(&mut buf, 0, tensor).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn floats() {
        let t = Tensor::new([1, 2, 2], vec![0.5f32, 0.25, 1.0, 0.0]).unwrap();
        assert_eq!(
            render(&t),
            "output_tensor[0] has shape [ 1 2 2 ] and values of type f32[]:\n\t0.5\n\t0.25\n\t1\n\t0\n"
        );
    }

    #[test]
    fn integers_and_bools() {
        let t = Tensor::new([3], vec![-1i8, 0, 127]).unwrap();
        assert_eq!(
            render(&t),
            "output_tensor[0] has shape [ 3 ] and values of type i8[]:\n\t-1\n\t0\n\t127\n"
        );

        let t = Tensor::new([2], vec![u64::MAX, 1]).unwrap();
        assert!(render(&t).ends_with("of type u64[]:\n\t18446744073709551615\n\t1\n"));

        let t = Tensor::new([2], vec![true, false]).unwrap();
        assert!(render(&t).ends_with("of type bool[]:\n\ttrue\n\tfalse\n"));
    }

    #[test]
    fn strings_print_every_byte() {
        let t = Tensor::string([4], vec![b'o', b'k', 0, 0xff]).unwrap();
        let text = render(&t);

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "output_tensor[0] has shape [ 4 ] and values of type char[]:");
        assert_eq!(&lines[1..], ["\to", "\tk", "\t\\x00", "\t\\xff"]);
    }

    #[test]
    fn unsupported_types_are_skipped() {
        let t = Tensor::opaque([2, 2], 10);
        assert_eq!(
            render(&t),
            "output_tensor[0] has shape [ 2 2 ] and values of unsupported type 10\n"
        );
    }

    #[test]
    fn type_names_come_from_element_type() {
        let tensors = [
            Tensor::new([1], vec![1u16]).unwrap(),
            Tensor::new([1], vec![1.0f64]).unwrap(),
            Tensor::string([1], b"x".to_vec()).unwrap(),
        ];

        for t in &tensors {
            let ty = t.element_type().unwrap();
            let header = render(t).lines().next().unwrap().to_owned();
            assert!(header.ends_with(&format!("of type {}[]:", ty.name())));
        }
    }

    #[test]
    fn whole_list_in_order() {
        let outputs = TensorList::owning(vec![
            Tensor::opaque([1], 16),
            Tensor::new([1], vec![42i32]).unwrap(),
        ]);

        let mut buf = Vec::new();
        print_outputs(&mut buf, &outputs).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let first = text.find("output_tensor[0]").unwrap();
        let second = text.find("output_tensor[1] has shape [ 1 ] and values of type i32[]:\n\t42\n").unwrap();
        assert!(first < second);
    }
}
