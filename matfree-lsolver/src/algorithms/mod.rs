use matfree_core::{DenseVector, LinearOperator, MatfreeCoreError};
use num_traits::Float;
use std::fmt::Debug;

pub mod cg;

pub struct SolveResult<T: Float + Debug + Default, M> {
    pub x: DenseVector<T>, // Solution vector
    pub metadata: M,       // Metadata about the solve process
}

// --- Algorithm Trait Definition ---
/// Trait representing a specific linear system solving algorithm.
/// Generic over the scalar type and the operator it inverts.
pub trait SolveAlgorithm<T: Float + Debug + Default, A: LinearOperator<T> + ?Sized> {
    type Metadata: Debug;

    /// Solves the linear system Ax = y for x, starting from a zero initial
    /// guess.
    ///
    /// # Arguments
    ///
    /// * `a` - The operator A (explicit matrix or matrix-free).
    /// * `y` - The right-hand side vector y.
    ///
    /// # Returns
    ///
    /// A `Result` containing the solution vector x plus metadata, or a
    /// `MatfreeCoreError`.
    fn solve(
        &self,
        a: &A,
        y: &DenseVector<T>,
    ) -> Result<SolveResult<T, Self::Metadata>, MatfreeCoreError>;

    /// Like [`solve`](Self::solve), but starting from the supplied initial
    /// guess `x0` (same length and numeric kind as `y`).
    fn solve_with_guess(
        &self,
        a: &A,
        y: &DenseVector<T>,
        x0: &DenseVector<T>,
    ) -> Result<SolveResult<T, Self::Metadata>, MatfreeCoreError>;

    // Helper for input validation, can be called by implementations.
    fn validate_inputs(&self, a: &A, y: &DenseVector<T>) -> Result<(), MatfreeCoreError> {
        if a.size() != y.len() {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Operator size ({}) must match RHS vector y length ({})",
                a.size(),
                y.len()
            )));
        }
        Ok(())
    }
}

// --- Algorithm Struct Definitions ---

/// Conjugate Gradient Algorithm.
///
/// Solves Ax = y for a symmetric (Hermitian) positive-definite operator A.
/// Iteration stops once the squared residual norm drops to `tolerance` or
/// below, or after `max_iterations` steps, whichever comes first; running out
/// of iterations is a normal return, not an error.
#[derive(Debug, Clone)]
pub struct ConjugateGradient<T: Float> {
    /// Residual-energy tolerance (compared against the squared residual
    /// norm).
    pub tolerance: T,
    pub max_iterations: usize,
}

impl<T: Float> Default for ConjugateGradient<T> {
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::zero),
            max_iterations: 10,
        }
    }
}

impl<T: Float> ConjugateGradient<T> {
    /// Creates a new instance of the Conjugate Gradient algorithm with default parameters.
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates a new instance of the Conjugate Gradient algorithm with specified parameters.
    pub fn with_params(tolerance: T, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}
