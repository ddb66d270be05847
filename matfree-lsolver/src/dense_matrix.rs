use num_complex::Complex;
use num_traits::Float;
use std::fmt::Debug;

use matfree_core::{
    ComplexVector, DenseVector, LinearOperator, MatfreeCoreError, Matrix, RealVector,
};

/// Represents a dense real matrix stored in row-major order on the CPU.
///
/// Doubles as the explicit-matrix adaptor: a square `DenseMatrix` satisfies
/// [`LinearOperator`], with matrix multiplication adapted into `matvec`.
#[derive(Debug, Clone)]
pub struct DenseMatrix<T: Float + Debug + Default> {
    rows: usize,
    cols: usize,
    data: Vec<T>, // Data stored row-major: data[row * cols + col]
}

impl<T: Float + Debug + Default> DenseMatrix<T> {
    /// Creates a new DenseMatrix from raw data and dimensions, assuming
    /// row-major order.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, MatfreeCoreError> {
        if data.len() != rows * cols {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Data length ({}) does not match dimensions ({}x{})",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a new DenseMatrix from nested row slices.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, MatfreeCoreError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(MatfreeCoreError::InvalidDimensions(format!(
                    "Ragged rows: expected {} columns, found {}",
                    ncols,
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Self::new(nrows, ncols, data)
    }

    /// Creates a new DenseMatrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Returns a slice view of the underlying data vector.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable slice view of the underlying data vector.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Gets the element at the specified row and column (immutable).
    /// Returns None if indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Gets the element at the specified row and column (mutable).
    /// Returns None if indices are out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    fn check_apply(&self, len: usize) -> Result<(), MatfreeCoreError> {
        if !self.is_square() {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Operator matrix must be square (dims: {}x{})",
                self.rows, self.cols
            )));
        }
        if self.cols != len {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Matrix columns ({}) must match vector length ({})",
                self.cols, len
            )));
        }
        Ok(())
    }

    fn apply_real(&self, x: &[T]) -> Vec<T> {
        (0..self.rows)
            .map(|i| {
                let row = &self.data[i * self.cols..(i + 1) * self.cols];
                row.iter()
                    .zip(x)
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect()
    }
}

// Implement the generic Matrix trait
impl<T: Float + Debug + Default> Matrix for DenseMatrix<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    // rows(), cols(), is_square() are provided by default impls in the trait
}

impl<T: Float + Debug + Default> LinearOperator<T> for DenseMatrix<T> {
    fn size(&self) -> usize {
        self.rows
    }

    /// Applies the matrix. A real matrix acts on a complex vector by acting
    /// on the real and imaginary parts independently.
    fn matvec(&self, x: &DenseVector<T>) -> Result<DenseVector<T>, MatfreeCoreError> {
        self.check_apply(x.len())?;
        match x {
            DenseVector::Real(v) => Ok(DenseVector::Real(RealVector::new(
                self.apply_real(v.as_slice()),
            ))),
            DenseVector::Complex(v) => {
                let re = self.apply_real(v.re());
                let im = self.apply_real(v.im());
                Ok(DenseVector::Complex(ComplexVector::new(re, im)?))
            }
        }
    }
}

/// Represents a dense complex matrix stored in row-major order on the CPU.
///
/// The explicit-matrix adaptor for complex problems; acts on vectors in
/// paired real storage.
#[derive(Debug, Clone)]
pub struct ComplexDenseMatrix<T: Float + Debug + Default> {
    rows: usize,
    cols: usize,
    data: Vec<Complex<T>>, // Row-major: data[row * cols + col]
}

impl<T: Float + Debug + Default> ComplexDenseMatrix<T> {
    /// Creates a new ComplexDenseMatrix from raw data and dimensions,
    /// assuming row-major order.
    pub fn new(rows: usize, cols: usize, data: Vec<Complex<T>>) -> Result<Self, MatfreeCoreError> {
        if data.len() != rows * cols {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Data length ({}) does not match dimensions ({}x{})",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Gets the element at the specified row and column (immutable).
    /// Returns None if indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Complex<T>> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }
}

impl<T: Float + Debug + Default> Matrix for ComplexDenseMatrix<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl<T: Float + Debug + Default> LinearOperator<T> for ComplexDenseMatrix<T> {
    fn size(&self) -> usize {
        self.rows
    }

    fn matvec(&self, x: &DenseVector<T>) -> Result<DenseVector<T>, MatfreeCoreError> {
        let v = match x {
            DenseVector::Complex(v) => v,
            DenseVector::Real(_) => {
                return Err(MatfreeCoreError::UnsupportedOperation(
                    "Complex matrix applied to a real vector; promote the vector first"
                        .to_string(),
                ))
            }
        };
        if !self.is_square() {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Operator matrix must be square (dims: {}x{})",
                self.rows, self.cols
            )));
        }
        if self.cols != x.len() {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Matrix columns ({}) must match vector length ({})",
                self.cols,
                x.len()
            )));
        }
        let xs = v.to_complex();
        let ys: Vec<Complex<T>> = (0..self.rows)
            .map(|i| {
                let row = &self.data[i * self.cols..(i + 1) * self.cols];
                row.iter()
                    .zip(&xs)
                    .fold(Complex::new(T::zero(), T::zero()), |acc, (&a, &b)| {
                        acc + a * b
                    })
            })
            .collect();
        Ok(DenseVector::Complex(ComplexVector::from_complex(&ys)))
    }
}
