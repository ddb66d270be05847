use num_traits::Float;
use std::fmt::Debug;

use crate::error::MatfreeCoreError;
use crate::vector::DenseVector;

/// Generic trait representing a matrix.
/// Implementations can be real or complex valued, dense or structured.
pub trait Matrix: Debug {
    /// The underlying real scalar type of the matrix elements (e.g., f32, f64).
    type Value: Copy + Debug + Default;

    /// Returns the dimensions of the matrix as (rows, columns).
    fn dims(&self) -> (usize, usize);

    /// Returns the number of rows.
    fn rows(&self) -> usize {
        self.dims().0
    }

    /// Returns the number of columns.
    fn cols(&self) -> usize {
        self.dims().1
    }

    /// Checks if the matrix is square.
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dims();
        rows == cols
    }
}

/// Generic trait representing a vector.
pub trait Vector: Debug {
    /// The underlying real scalar type of the vector elements (e.g., f32, f64).
    type Value: Copy + Debug + Default;

    /// Returns the number of elements in the vector.
    fn len(&self) -> usize;

    /// Checks if the vector is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capability trait for a square linear operator of size N: anything that can
/// be applied to a length-N vector to produce another length-N vector.
///
/// This is the single seam the iterative solvers depend on. Explicit matrices
/// implement it directly (matrix multiplication adapted into `matvec`), and
/// matrix-free operators implement it by composing whatever computation they
/// stand for. Applying the operator never mutates it or its argument.
pub trait LinearOperator<T: Float + Debug + Default>: Debug {
    /// The operator's dimension N (domain and codomain size).
    fn size(&self) -> usize;

    /// Applies the operator: returns `A * x`.
    ///
    /// The output has the same length and numeric kind (real or complex) as
    /// `x`, except where an implementation documents otherwise.
    ///
    /// # Errors
    /// Returns `MatfreeCoreError::InvalidDimensions` if `x.len()` does not
    /// match `self.size()`, or `UnsupportedOperation` if the implementation
    /// cannot act on the numeric kind of `x`.
    fn matvec(&self, x: &DenseVector<T>) -> Result<DenseVector<T>, MatfreeCoreError>;
}
