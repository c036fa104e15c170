use fastrand::Rng;
use omtensor::Tensor;

use crate::signature::TensorDescriptor;
use crate::Error;

/// Fills input tensors with uniform random values in `[0, 1)`
///
/// Not cryptographically secure and not meant to be. Without a seed every run sees different
/// data.
pub struct Generator {
    rng: Rng,
}

impl Generator {
    /// A generator seeded from system entropy
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    /// A generator that produces the same values on every run
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    /// Make one `f32` tensor matching `desc`
    pub fn generate(&mut self, desc: &TensorDescriptor) -> Result<Tensor, Error> {
        let data: Vec<f32> = (0..desc.element_count).map(|_| self.rng.f32()).collect();

        Ok(Tensor::new(desc.shape.clone(), data)?)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
