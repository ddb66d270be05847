use num_traits::Float;
use std::fmt;
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::error::MatfreeCoreError;
use crate::traits::LinearOperator;
use crate::vector::DenseVector;

/// A matrix-free linear operator composed from a closure.
///
/// Wraps any `Fn(&DenseVector<T>) -> DenseVector<T>` together with the
/// dimension it acts on, so structured computations (convolutions, physical
/// forward models, operator chains) satisfy [`LinearOperator`] without ever
/// materializing a matrix.
pub struct FnOperator<T, F>
where
    T: Float + Debug + Default,
    F: Fn(&DenseVector<T>) -> DenseVector<T>,
{
    size: usize,
    apply: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> FnOperator<T, F>
where
    T: Float + Debug + Default,
    F: Fn(&DenseVector<T>) -> DenseVector<T>,
{
    /// Creates an operator of dimension `size` backed by `apply`.
    ///
    /// The closure must map a length-`size` vector to a length-`size` vector
    /// of the same numeric kind; `matvec` checks the output length on every
    /// application.
    pub fn new(size: usize, apply: F) -> Self {
        Self {
            size,
            apply,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Debug for FnOperator<T, F>
where
    T: Float + Debug + Default,
    F: Fn(&DenseVector<T>) -> DenseVector<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperator").field("size", &self.size).finish()
    }
}

impl<T, F> LinearOperator<T> for FnOperator<T, F>
where
    T: Float + Debug + Default,
    F: Fn(&DenseVector<T>) -> DenseVector<T>,
{
    fn size(&self) -> usize {
        self.size
    }

    fn matvec(&self, x: &DenseVector<T>) -> Result<DenseVector<T>, MatfreeCoreError> {
        if x.len() != self.size {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Operator size ({}) does not match vector length ({})",
                self.size,
                x.len()
            )));
        }
        let y = (self.apply)(x);
        if y.len() != self.size {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Operator produced a vector of length {} instead of {}",
                y.len(),
                self.size
            )));
        }
        Ok(y)
    }
}
