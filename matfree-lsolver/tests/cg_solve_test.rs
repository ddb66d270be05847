use matfree_lsolver::{
    algorithms::{ConjugateGradient, SolveAlgorithm},
    cg, ComplexDenseMatrix, ComplexVector, DenseMatrix, DenseVector, FnOperator, LinearOperator,
    MatfreeCoreError, RealVector,
};
use num_complex::Complex;
use num_traits::Float;

// Helper for float comparison in tests
fn assert_approx_eq_vec(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len(), "Vector lengths differ");
    for i in 0..a.len() {
        let diff = (a[i] - b[i]).abs();
        assert!(
            diff <= tolerance,
            "Verification failed at index {}: expected {}, got {}, diff {}",
            i,
            b[i],
            a[i],
            diff
        );
    }
}

// ||A*x - y|| for verification, independent of the solver's own bookkeeping.
fn residual_norm<A: LinearOperator<f64> + ?Sized>(
    a: &A,
    x: &DenseVector<f64>,
    y: &DenseVector<f64>,
) -> Result<f64, MatfreeCoreError> {
    let mut r = a.matvec(x)?;
    r.sub_assign(y)?;
    Ok(r.dot(&r)?.sqrt())
}

fn norm(y: &DenseVector<f64>) -> f64 {
    y.dot(y).unwrap().sqrt()
}

#[test]
fn test_cg_dense_2x2_with_guess() -> Result<(), MatfreeCoreError> {
    // 4*x1 + x2 = 1, x1 + 3*x2 = 2; exact solution (1/11, 7/11).
    let a = DenseMatrix::from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]])?;
    let y = DenseVector::from(RealVector::new(vec![1.0, 2.0]));
    let x0 = DenseVector::from(RealVector::new(vec![2.0, 1.0]));

    let algorithm = ConjugateGradient::default(); // niter = 10, tol = 1e-10
    let result = algorithm.solve_with_guess(&a, &y, &x0)?;

    assert_approx_eq_vec(result.x.storage(), &[1.0 / 11.0, 7.0 / 11.0], 1e-4);
    assert!(
        result.metadata.iterations <= 2,
        "N = 2 system took {} iterations",
        result.metadata.iterations
    );
    assert!(result.metadata.residual_norm <= 1e-5);
    Ok(())
}

#[test]
fn test_cg_identity_converges_in_one_iteration() -> Result<(), MatfreeCoreError> {
    let identity = FnOperator::new(3, |x: &DenseVector<f64>| x.clone());
    let y = DenseVector::from(RealVector::new(vec![1.0, -2.0, 3.5]));

    let (x, iterations) = cg(&identity, &y, None, 10, 0.0)?;

    assert_eq!(iterations, 1);
    assert_approx_eq_vec(x.storage(), y.storage(), 1e-12);
    Ok(())
}

#[test]
fn test_cg_complex_identity_converges_in_one_iteration() -> Result<(), MatfreeCoreError> {
    let identity = FnOperator::new(2, |x: &DenseVector<f64>| x.clone());
    let y = DenseVector::from(ComplexVector::from_complex(&[
        Complex::new(1.0, -2.0),
        Complex::new(0.5, 3.0),
    ]));

    let (x, iterations) = cg(&identity, &y, None, 10, 0.0)?;

    assert_eq!(iterations, 1);
    assert_approx_eq_vec(x.storage(), y.storage(), 1e-12);
    assert!(x.is_complex());
    Ok(())
}

#[test]
fn test_cg_zero_rhs_terminates_immediately() -> Result<(), MatfreeCoreError> {
    // kold starts at exactly zero, and the stopping condition is strict,
    // so even tol = 0 runs no iterations.
    let a = DenseMatrix::from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]])?;
    let y = DenseVector::from(RealVector::new(vec![0.0, 0.0]));

    let (x, iterations) = cg(&a, &y, None, 10, 0.0)?;

    assert_eq!(iterations, 0);
    assert_eq!(x.storage(), &[0.0, 0.0]);
    Ok(())
}

#[test]
fn test_cg_niter_zero_returns_guess_unchanged() -> Result<(), MatfreeCoreError> {
    let a = DenseMatrix::from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]])?;
    let y = DenseVector::from(RealVector::new(vec![1.0, 2.0]));
    let x0 = DenseVector::from(RealVector::new(vec![0.25, -0.75]));

    let (x, iterations) = cg(&a, &y, Some(&x0), 0, 1e-10)?;

    assert_eq!(iterations, 0);
    assert_eq!(x, x0);
    Ok(())
}

#[test]
fn test_cg_budget_respected() -> Result<(), MatfreeCoreError> {
    let a = DenseMatrix::from_rows(&[
        vec![4.0, -1.0, 0.0],
        vec![-1.0, 4.0, -1.0],
        vec![0.0, -1.0, 4.0],
    ])?;
    let y = DenseVector::from(RealVector::new(vec![1.0, 2.0, 3.0]));

    let (_x, iterations) = cg(&a, &y, None, 2, 0.0)?;
    assert!(iterations <= 2);
    Ok(())
}

#[test]
fn test_cg_random_spd_full_budget() -> Result<(), MatfreeCoreError> {
    // A = M^T M + n*I is symmetric positive definite for any M.
    let n = 50;
    let mut rng = fastrand::Rng::with_seed(7);
    let m: Vec<f64> = (0..n * n).map(|_| 2.0 * rng.f64() - 1.0).collect();

    let mut data = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut s = 0.0;
            for k in 0..n {
                s += m[k * n + i] * m[k * n + j];
            }
            if i == j {
                s += n as f64;
            }
            data[i * n + j] = s;
        }
    }
    let a = DenseMatrix::new(n, n, data)?;
    let y = DenseVector::from(RealVector::new(
        (0..n).map(|_| 2.0 * rng.f64() - 1.0).collect(),
    ));

    let (x, iterations) = cg(&a, &y, None, n, 0.0)?;

    assert_eq!(iterations, n); // tol = 0 exhausts the budget
    assert!(residual_norm(&a, &x, &y)? <= 1e-7 * norm(&y));
    Ok(())
}

#[test]
fn test_cg_hermitian_complex_parity() -> Result<(), MatfreeCoreError> {
    // A = B^H B + n*I is Hermitian positive definite for any complex B.
    let n = 12;
    let mut rng = fastrand::Rng::with_seed(11);
    let mut rand_z = || Complex::new(2.0 * rng.f64() - 1.0, 2.0 * rng.f64() - 1.0);
    let b: Vec<Complex<f64>> = (0..n * n).map(|_| rand_z()).collect();

    let mut data = vec![Complex::new(0.0, 0.0); n * n];
    for i in 0..n {
        for j in 0..n {
            let mut s = Complex::new(0.0, 0.0);
            for k in 0..n {
                s += b[k * n + i].conj() * b[k * n + j];
            }
            if i == j {
                s += Complex::new(n as f64, 0.0);
            }
            data[i * n + j] = s;
        }
    }
    let a = ComplexDenseMatrix::new(n, n, data)?;
    let y_z: Vec<Complex<f64>> = (0..n).map(|_| rand_z()).collect();
    let y = DenseVector::from(ComplexVector::from_complex(&y_z));

    let (x, iterations) = cg(&a, &y, None, 2 * n, 1e-24)?;

    assert!(x.is_complex());
    assert!(iterations <= 2 * n);
    assert!(residual_norm(&a, &x, &y)? <= 1e-9 * norm(&y));
    Ok(())
}

#[test]
fn test_cg_real_operator_complex_rhs() -> Result<(), MatfreeCoreError> {
    // diag(2, 4) over a complex RHS: the solution is y scaled per entry.
    let a = DenseMatrix::from_rows(&[vec![2.0, 0.0], vec![0.0, 4.0]])?;
    let y = DenseVector::from(ComplexVector::from_complex(&[
        Complex::new(2.0, -4.0),
        Complex::new(8.0, 2.0),
    ]));

    let (x, _iterations) = cg(&a, &y, None, 10, 1e-20)?;

    match x {
        DenseVector::Complex(v) => {
            let expected = [Complex::new(1.0, -2.0), Complex::new(2.0, 0.5)];
            for (got, want) in v.to_complex().iter().zip(&expected) {
                assert!((got - want).norm() < 1e-8, "expected {}, got {}", want, got);
            }
        }
        DenseVector::Real(_) => panic!("expected complex solution"),
    }
    Ok(())
}

#[test]
fn test_cg_shape_mismatch_errors() {
    let a = DenseMatrix::from_rows(&[
        vec![4.0, -1.0, 0.0],
        vec![-1.0, 4.0, -1.0],
        vec![0.0, -1.0, 4.0],
    ])
    .unwrap();
    let y = DenseVector::from(RealVector::new(vec![1.0, 2.0]));

    let err = cg(&a, &y, None, 10, 1e-10).unwrap_err();
    assert!(matches!(err, MatfreeCoreError::InvalidDimensions(_)));
}

#[test]
fn test_cg_mismatched_guess_errors() {
    let a = DenseMatrix::from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]]).unwrap();
    let y = DenseVector::from(RealVector::new(vec![1.0, 2.0]));
    let x0 = DenseVector::from(ComplexVector::zeros(2));

    let err = cg(&a, &y, Some(&x0), 10, 1e-10).unwrap_err();
    assert!(matches!(err, MatfreeCoreError::UnsupportedOperation(_)));
}

#[test]
fn test_cg_degenerate_direction_propagates_nonfinite() -> Result<(), MatfreeCoreError> {
    // The zero operator makes dAd = 0; the step length goes non-finite and
    // carries through the returned solution instead of raising.
    let a = DenseMatrix::zeros(2, 2);
    let y = DenseVector::from(RealVector::new(vec![1.0, 1.0]));

    let (x, iterations) = cg(&a, &y, None, 10, 1e-10)?;

    assert!(iterations >= 1);
    assert!(x.storage().iter().any(|v| !v.is_finite()));
    Ok(())
}
