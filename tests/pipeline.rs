use std::io;

use omrun::config::Config;
use omrun::report::{self, EXIT_FAILURE};
use omrun::{Error, Pipeline};
use omtensor::{LoadedModel, Model, Tensor, TensorList};

/// Hands its inputs straight back
struct Identity {
    sig: String,
    runs: usize,
}

impl Identity {
    fn new(sig: &str) -> Self {
        Self {
            sig: sig.to_owned(),
            runs: 0,
        }
    }
}

impl Model for Identity {
    fn input_signature(&self) -> Result<String, omtensor::Error> {
        Ok(self.sig.clone())
    }

    fn output_signature(&self) -> Result<String, omtensor::Error> {
        Ok(self.sig.clone())
    }

    fn run(&mut self, inputs: &TensorList<'_>) -> Result<TensorList<'static>, omtensor::Error> {
        self.runs += 1;
        Ok(inputs.to_owning())
    }
}

/// Always fails, like `run_main_graph` returning NULL
struct Failing {
    runs: usize,
}

impl Model for Failing {
    fn input_signature(&self) -> Result<String, omtensor::Error> {
        Ok(String::from(r#"[{"type":"f32","dims":[2],"name":"x"}]"#))
    }

    fn output_signature(&self) -> Result<String, omtensor::Error> {
        Err(omtensor::Error::SignatureUnavailable {
            kind: "output",
            entry_point: self.entry_point().to_owned(),
        })
    }

    fn run(&mut self, _inputs: &TensorList<'_>) -> Result<TensorList<'static>, omtensor::Error> {
        self.runs += 1;
        Err(omtensor::Error::InferenceFailed {
            entry_point: self.entry_point().to_owned(),
            source: io::Error::other("out of memory"),
        })
    }
}

/// Ignores its inputs and returns a fixed set of outputs
struct Canned {
    outputs: Vec<Tensor>,
}

impl Model for Canned {
    fn input_signature(&self) -> Result<String, omtensor::Error> {
        Ok(String::from(r#"[{"type":"f32","dims":[1],"name":"x"}]"#))
    }

    fn output_signature(&self) -> Result<String, omtensor::Error> {
        Ok(String::from("[]"))
    }

    fn run(&mut self, _inputs: &TensorList<'_>) -> Result<TensorList<'static>, omtensor::Error> {
        Ok(TensorList::owning(self.outputs.clone()))
    }
}

fn run<M: Model>(model: M, cfg: &Config) -> (Result<(), Error>, String, M) {
    let mut pipeline = Pipeline::new(model, cfg);
    let mut out = Vec::new();
    let res = pipeline.run(&mut out);

    (res, String::from_utf8(out).unwrap(), pipeline.into_model())
}

#[test]
fn identity_dumps_generated_inputs() {
    let model = Identity::new(r#"{"type":"f32","dims":[1,2,2],"name":"X"}"#);
    // Not wrapped in [], so it's rejected
    let (res, out, model) = run(model, &Config::default());
    assert!(matches!(res, Err(Error::Syntax { .. })));
    assert!(out.is_empty());
    assert_eq!(model.runs, 0);

    let model = Identity::new(r#"[{"type":"f32","dims":[1,2,2],"name":"X"}]"#);
    let (res, out, model) = run(model, &Config::default());
    res.unwrap();
    assert_eq!(model.runs, 1);

    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("output_tensor[0] has shape [ 1 2 2 ] and values of type f32[]:")
    );

    let values: Vec<f32> = lines
        .map(|line| line.strip_prefix('\t').unwrap().parse().unwrap())
        .collect();
    assert_eq!(values.len(), 4);
    assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
}

#[test]
fn several_inputs_come_back_in_order() {
    let sig = r#"[ { "type" : "f32" , "dims" : [2 , 3] , "name" : "a" },
                   { "type" : "f32" , "dims" : [-1 , 5] , "name" : "b" } ]"#;
    let cfg = Config {
        dynamic_dim: 3,
        ..Default::default()
    };
    let (res, out, _) = run(Identity::new(sig), &cfg);
    res.unwrap();

    let headers: Vec<_> = out.lines().filter(|l| !l.starts_with('\t')).collect();
    assert_eq!(
        headers,
        [
            "output_tensor[0] has shape [ 2 3 ] and values of type f32[]:",
            "output_tensor[1] has shape [ 3 5 ] and values of type f32[]:",
        ]
    );
    assert_eq!(out.lines().filter(|l| l.starts_with('\t')).count(), 6 + 15);
}

#[test]
fn inference_failure_prints_nothing() {
    let (res, out, model) = run(Failing { runs: 0 }, &Config::default());

    assert_eq!(model.runs, 1);
    assert!(out.is_empty());

    let err = res.unwrap_err();
    assert!(matches!(
        err,
        Error::Model {
            source: omtensor::Error::InferenceFailed { .. }
        }
    ));
    assert_eq!(
        err.to_string(),
        "run_main_graph encountered an error: out of memory"
    );
}

#[test]
fn inference_failure_exits_nonzero() {
    let (res, out, _) = run(Failing { runs: 0 }, &Config::default());
    assert!(out.is_empty());

    let mut report_out = Vec::new();
    let code = report::finish(&mut report_out, &res);
    assert_eq!(code, EXIT_FAILURE);
    assert_eq!(
        String::from_utf8(report_out).unwrap(),
        "run_main_graph encountered an error: out of memory\n"
    );

    let (res, _, _) = run(Identity::new("[]"), &Config::default());
    assert_eq!(report::finish(&mut Vec::new(), &res), 0);
}

#[test]
fn missing_model_file_exits_nonzero() {
    let res = LoadedModel::open("/nonexistent/mnist.so")
        .map(drop)
        .map_err(Error::from);
    assert!(matches!(
        res,
        Err(Error::Model {
            source: omtensor::Error::ModelNotFound { .. }
        })
    ));

    let mut out = Vec::new();
    assert_eq!(report::finish(&mut out, &res), EXIT_FAILURE);
    assert!(String::from_utf8(out)
        .unwrap()
        .starts_with("The compiled model was not found at /nonexistent/mnist.so"));
}

#[test]
fn huge_inputs_are_rejected_without_allocating() {
    let huge = r#"[{"type":"f32","dims":[2305843009213693952],"name":"x"}]"#;
    let (res, out, model) = run(Identity::new(huge), &Config::default());
    assert!(matches!(res, Err(Error::TooManyElements { .. })));
    assert!(out.is_empty());
    assert_eq!(model.runs, 0);
}

#[test]
fn bad_signatures_stop_before_inference() {
    let two_dynamic = r#"[{"type":"f32","dims":[-1,3,-1,-1],"name":"img"}]"#;
    let (res, out, model) = run(Identity::new(two_dynamic), &Config::default());
    assert!(matches!(res, Err(Error::MultipleDynamicDims { .. })));
    assert!(out.is_empty());
    assert_eq!(model.runs, 0);

    let not_float = r#"[{"type":"f32","dims":[1],"name":"a"},{"type":"ui8","dims":[1],"name":"b"}]"#;
    let (res, out, model) = run(Identity::new(not_float), &Config::default());
    let err = res.unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { .. }));
    assert!(err.to_string().contains("f32"));
    assert!(out.is_empty());
    assert_eq!(model.runs, 0);
}

#[test]
fn seeded_runs_match() {
    let sig = r#"[{"type":"f32","dims":[4,4],"name":"x"}]"#;
    let cfg = Config {
        seed: Some(4533),
        ..Default::default()
    };

    let (a, out_a, _) = run(Identity::new(sig), &cfg);
    let (b, out_b, _) = run(Identity::new(sig), &cfg);
    a.unwrap();
    b.unwrap();
    assert_eq!(out_a, out_b);
}

#[test]
fn odd_output_types() {
    let model = Canned {
        outputs: vec![
            Tensor::string([3], b"a\nb".to_vec()).unwrap(),
            Tensor::opaque([2, 2], 10),
            Tensor::new([2], vec![true, false]).unwrap(),
        ],
    };
    let (res, out, _) = run(model, &Config::default());
    res.unwrap();

    assert_eq!(
        out,
        "output_tensor[0] has shape [ 3 ] and values of type char[]:\n\ta\n\t\\n\n\tb\n\
         output_tensor[1] has shape [ 2 2 ] and values of unsupported type 10\n\
         output_tensor[2] has shape [ 2 ] and values of type bool[]:\n\ttrue\n\tfalse\n"
    );
}

#[test]
fn empty_signature_runs_with_no_inputs() {
    let (res, out, model) = run(Identity::new("[]"), &Config::default());
    res.unwrap();
    assert_eq!(model.runs, 1);
    assert!(out.is_empty());
}
