//! # Solver Core Library
//!
//! Provides the core data structures for matrix-free linear solvers: real and
//! paired-storage complex vectors, the operator capability trait, and the
//! shared error type.

// Declare modules
pub mod error;
pub mod operator;
pub mod traits;
pub mod vector;

// Re-export public types
pub use error::MatfreeCoreError;
pub use operator::FnOperator;
pub use traits::{LinearOperator, Matrix, Vector};
pub use vector::{ComplexVector, DenseVector, RealVector};
