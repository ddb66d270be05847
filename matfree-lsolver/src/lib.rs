//! `matfree-lsolver`: iterative linear solvers over matrix-free operators.
//!
//! This library solves square systems of linear equations of the form Ax = y,
//! where A is anything satisfying the `LinearOperator` capability: an explicit
//! dense matrix (real or complex) or a composed, matrix-free operator.

// Core modules
pub mod algorithms;
pub mod dense_matrix;

// Re-export from matfree_core
pub use matfree_core::{
    ComplexVector,
    DenseVector,
    FnOperator,
    LinearOperator,
    MatfreeCoreError,
    Matrix,
    RealVector,
    Vector,
};

pub use algorithms::cg::cg;
pub use dense_matrix::{ComplexDenseMatrix, DenseMatrix};
