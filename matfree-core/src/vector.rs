use num_complex::Complex;
use num_traits::Float;
use std::fmt::Debug;

use crate::error::MatfreeCoreError;
use crate::traits::Vector;

/// A real vector stored as a contiguous CPU buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RealVector<T: Float + Debug + Default> {
    data: Vec<T>,
}

impl<T: Float + Debug + Default> RealVector<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Creates a new RealVector of length `n` filled with zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![T::zero(); n],
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Float + Debug + Default> Vector for RealVector<T> {
    type Value = T;

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// A complex vector of logical length N in paired real storage: a single
/// buffer of length 2N holding all real parts followed by all imaginary
/// parts.
///
/// The pairing lets real elementwise arithmetic (add, subtract, scale by a
/// real factor) act on the combined buffer and still respect complex
/// semantics; only the inner product needs to know about conjugation.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexVector<T: Float + Debug + Default> {
    data: Vec<T>,
}

impl<T: Float + Debug + Default> ComplexVector<T> {
    /// Builds a complex vector from separate real and imaginary buffers.
    ///
    /// # Errors
    /// Returns `InvalidDimensions` if the two buffers differ in length.
    pub fn new(re: Vec<T>, im: Vec<T>) -> Result<Self, MatfreeCoreError> {
        if re.len() != im.len() {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Real part length ({}) does not match imaginary part length ({})",
                re.len(),
                im.len()
            )));
        }
        let mut data = re;
        data.extend(im);
        Ok(Self { data })
    }

    /// Creates a new ComplexVector of logical length `n` with zero real and
    /// imaginary parts.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![T::zero(); 2 * n],
        }
    }

    /// Builds the paired representation from a slice of complex numbers.
    pub fn from_complex(values: &[Complex<T>]) -> Self {
        let mut data = Vec::with_capacity(2 * values.len());
        data.extend(values.iter().map(|z| z.re));
        data.extend(values.iter().map(|z| z.im));
        Self { data }
    }

    /// Reads the paired representation back out as complex numbers.
    pub fn to_complex(&self) -> Vec<Complex<T>> {
        let n = self.len();
        (0..n)
            .map(|i| Complex::new(self.data[i], self.data[n + i]))
            .collect()
    }

    /// View of the real parts.
    pub fn re(&self) -> &[T] {
        &self.data[..self.len()]
    }

    /// View of the imaginary parts.
    pub fn im(&self) -> &[T] {
        &self.data[self.len()..]
    }

    /// Returns the complex conjugate (imaginary parts negated).
    pub fn conj(&self) -> Self {
        let n = self.len();
        let mut data = self.data.clone();
        for v in &mut data[n..] {
            *v = -*v;
        }
        Self { data }
    }
}

impl<T: Float + Debug + Default> Vector for ComplexVector<T> {
    type Value = T;

    fn len(&self) -> usize {
        self.data.len() / 2
    }
}

/// A dense vector tagged by numeric kind: plain real, or complex in paired
/// real storage. Solver state is carried in this type so one iteration body
/// serves both kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum DenseVector<T: Float + Debug + Default> {
    Real(RealVector<T>),
    Complex(ComplexVector<T>),
}

impl<T: Float + Debug + Default> From<RealVector<T>> for DenseVector<T> {
    fn from(v: RealVector<T>) -> Self {
        DenseVector::Real(v)
    }
}

impl<T: Float + Debug + Default> From<ComplexVector<T>> for DenseVector<T> {
    fn from(v: ComplexVector<T>) -> Self {
        DenseVector::Complex(v)
    }
}

impl<T: Float + Debug + Default> DenseVector<T> {
    /// Logical length N (number of scalar entries, complex entries counting
    /// as one).
    pub fn len(&self) -> usize {
        match self {
            DenseVector::Real(v) => v.len(),
            DenseVector::Complex(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, DenseVector::Complex(_))
    }

    /// A zero vector of the same length and numeric kind as `self`.
    pub fn zeros_like(&self) -> Self {
        match self {
            DenseVector::Real(v) => DenseVector::Real(RealVector::zeros(v.len())),
            DenseVector::Complex(v) => DenseVector::Complex(ComplexVector::zeros(v.len())),
        }
    }

    /// The underlying real storage (length N for real vectors, 2N for
    /// complex ones).
    pub fn storage(&self) -> &[T] {
        match self {
            DenseVector::Real(v) => &v.data,
            DenseVector::Complex(v) => &v.data,
        }
    }

    fn storage_mut(&mut self) -> &mut [T] {
        match self {
            DenseVector::Real(v) => &mut v.data,
            DenseVector::Complex(v) => &mut v.data,
        }
    }

    fn check_same_shape(&self, other: &Self, op: &str) -> Result<(), MatfreeCoreError> {
        if self.is_complex() != other.is_complex() {
            return Err(MatfreeCoreError::UnsupportedOperation(format!(
                "Mixed real/complex operands in {}",
                op
            )));
        }
        if self.len() != other.len() {
            return Err(MatfreeCoreError::InvalidDimensions(format!(
                "Vector lengths for {} mismatch: {} != {}",
                op,
                self.len(),
                other.len()
            )));
        }
        Ok(())
    }

    /// Conjugate inner product `Re(sum(conj(self) * other))`, reducing to the
    /// ordinary dot product for real vectors.
    ///
    /// For the paired storage, `Re(conj(u) * v) = u.re * v.re + u.im * v.im`,
    /// so the conjugate rule is exactly the plain dot product of the two
    /// stacked buffers. For a Hermitian operator every inner product the CG
    /// recurrence takes is real, so nothing is lost by returning the real
    /// part only.
    pub fn dot(&self, other: &Self) -> Result<T, MatfreeCoreError> {
        self.check_same_shape(other, "dot")?;
        let sum = self
            .storage()
            .iter()
            .zip(other.storage())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b);
        Ok(sum)
    }

    /// In-place `self += alpha * other` (real `alpha`; scales real and
    /// imaginary parts alike).
    pub fn axpy(&mut self, alpha: T, other: &Self) -> Result<(), MatfreeCoreError> {
        self.check_same_shape(other, "axpy")?;
        for (a, &b) in self.storage_mut().iter_mut().zip(other.storage()) {
            *a = *a + alpha * b;
        }
        Ok(())
    }

    /// In-place `self -= other`.
    pub fn sub_assign(&mut self, other: &Self) -> Result<(), MatfreeCoreError> {
        self.check_same_shape(other, "sub_assign")?;
        for (a, &b) in self.storage_mut().iter_mut().zip(other.storage()) {
            *a = *a - b;
        }
        Ok(())
    }

    /// In-place direction update `self = r + beta * self`.
    pub fn direction_update(&mut self, beta: T, r: &Self) -> Result<(), MatfreeCoreError> {
        self.check_same_shape(r, "direction_update")?;
        for (d, &ri) in self.storage_mut().iter_mut().zip(r.storage()) {
            *d = ri + beta * *d;
        }
        Ok(())
    }
}

impl<T: Float + Debug + Default> Vector for DenseVector<T> {
    type Value = T;

    fn len(&self) -> usize {
        DenseVector::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_new_rejects_unequal_parts() {
        let err = ComplexVector::new(vec![1.0, 2.0], vec![0.5]).unwrap_err();
        assert!(matches!(err, MatfreeCoreError::InvalidDimensions(_)));
    }

    #[test]
    fn complex_roundtrip_and_conj() {
        let z = vec![Complex::new(1.0, -2.0), Complex::new(0.5, 3.0)];
        let v = ComplexVector::from_complex(&z);
        assert_eq!(v.re(), &[1.0, 0.5]);
        assert_eq!(v.im(), &[-2.0, 3.0]);
        assert_eq!(v.to_complex(), z);
        let conj: Vec<Complex<f64>> = z.iter().map(|zi| zi.conj()).collect();
        assert_eq!(v.conj().to_complex(), conj);
    }

    #[test]
    fn dot_matches_conjugate_inner_product() {
        let u = vec![Complex::new(1.0, 2.0), Complex::new(-0.5, 0.25)];
        let v = vec![Complex::new(3.0, -1.0), Complex::new(2.0, 4.0)];
        let expected: Complex<f64> = u.iter().zip(&v).map(|(a, b)| a.conj() * b).sum();

        let du = DenseVector::from(ComplexVector::from_complex(&u));
        let dv = DenseVector::from(ComplexVector::from_complex(&v));
        let dot = du.dot(&dv).unwrap();
        assert!((dot - expected.re).abs() < 1e-12);
    }

    #[test]
    fn dot_real_is_plain_dot() {
        let u = DenseVector::from(RealVector::new(vec![1.0, 2.0, 3.0]));
        let v = DenseVector::from(RealVector::new(vec![4.0, -5.0, 6.0]));
        assert_eq!(u.dot(&v).unwrap(), 4.0 - 10.0 + 18.0);
    }

    #[test]
    fn dot_rejects_mixed_kinds() {
        let u = DenseVector::from(RealVector::new(vec![1.0, 2.0]));
        let v = DenseVector::from(ComplexVector::zeros(2));
        let err = u.dot(&v).unwrap_err();
        assert!(matches!(err, MatfreeCoreError::UnsupportedOperation(_)));
    }

    #[test]
    fn axpy_and_direction_update() {
        let mut x = DenseVector::from(RealVector::new(vec![1.0, 1.0]));
        let d = DenseVector::from(RealVector::new(vec![2.0, -4.0]));
        x.axpy(0.5, &d).unwrap();
        assert_eq!(x.storage(), &[2.0, -1.0]);

        let r = DenseVector::from(RealVector::new(vec![1.0, 1.0]));
        let mut dir = d.clone();
        dir.direction_update(0.25, &r).unwrap();
        assert_eq!(dir.storage(), &[1.5, 0.0]);
    }

    #[test]
    fn axpy_scales_both_halves_of_paired_storage() {
        let mut x = DenseVector::from(ComplexVector::from_complex(&[Complex::new(1.0, -1.0)]));
        let d = DenseVector::from(ComplexVector::from_complex(&[Complex::new(2.0, 4.0)]));
        x.axpy(0.5, &d).unwrap();
        assert_eq!(x.storage(), &[2.0, 1.0]);
    }
}
