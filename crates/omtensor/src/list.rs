use crate::Tensor;

/// An ordered list of tensors passed across the inference boundary as a unit
///
/// The variant says who owns the tensors:
///
/// - [TensorList::Owning] holds its tensors and destroys them when released.
/// - [TensorList::Borrowing] only references tensors owned somewhere else, so releasing it
///   leaves them alone.
///
/// # Examples
///
/// ```
/// # use omtensor::{Tensor, TensorList, Error};
/// # fn main() -> Result<(), Error> {
/// let inputs = vec![Tensor::new([2], vec![0.5f32, 0.25])?];
///
/// let list = TensorList::borrowing(&inputs);
/// assert_eq!(list.len(), 1);
///
/// // Nothing is destroyed, `inputs` still owns its tensors
/// assert_eq!(list.release(), 0);
/// assert_eq!(inputs.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub enum TensorList<'a> {
    Owning(Vec<Tensor>),
    Borrowing(Vec<&'a Tensor>),
}

impl<'a> TensorList<'a> {
    /// A list that owns `tensors`
    pub fn owning(tensors: Vec<Tensor>) -> TensorList<'static> {
        TensorList::Owning(tensors)
    }

    /// A list over tensors owned by someone else
    pub fn borrowing(tensors: impl IntoIterator<Item = &'a Tensor>) -> Self {
        Self::Borrowing(tensors.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Owning(v) => v.len(),
            Self::Borrowing(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_owning(&self) -> bool {
        matches!(self, Self::Owning(_))
    }

    pub fn get(&self, idx: usize) -> Option<&Tensor> {
        match self {
            Self::Owning(v) => v.get(idx),
            Self::Borrowing(v) => v.get(idx).copied(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tensor> + '_ {
        (0..self.len()).filter_map(move |idx| self.get(idx))
    }

    /// Copy every tensor into a new list that owns them
    pub fn to_owning(&self) -> TensorList<'static> {
        TensorList::Owning(self.iter().cloned().collect())
    }

    /// Tear the list down
    ///
    /// Returns the number of tensors that were destroyed along with it, which is always zero
    /// for a borrowing list.
    pub fn release(self) -> usize {
        match self {
            Self::Owning(tensors) => {
                let ct = tensors.len();
                drop(tensors);
                debug!("released owning tensor list ({ct} tensors destroyed)");
                ct
            }
            Self::Borrowing(refs) => {
                debug!("released borrowing tensor list ({} tensors left alone)", refs.len());
                0
            }
        }
    }
}
