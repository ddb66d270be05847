use matfree_lsolver::{
    algorithms::{ConjugateGradient, SolveAlgorithm},
    DenseVector, FnOperator, RealVector,
};

/// Applies the n x n tridiagonal stencil (-1, 4, -1) without storing the
/// matrix.
fn tridiagonal_operator(n: usize) -> FnOperator<f64, impl Fn(&DenseVector<f64>) -> DenseVector<f64>> {
    FnOperator::new(n, move |x: &DenseVector<f64>| {
        let v = x.storage();
        let y: Vec<f64> = (0..n)
            .map(|i| {
                let mut s = 4.0 * v[i];
                if i > 0 {
                    s -= v[i - 1];
                }
                if i + 1 < n {
                    s -= v[i + 1];
                }
                s
            })
            .collect();
        DenseVector::from(RealVector::new(y))
    })
}

/// Creates a vector y of size n with y[i] = sin(i / n).
fn create_sin_vector(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 / n as f64).sin()).collect()
}

fn main() {
    // Initialize logging based on RUST_LOG environment variable
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let n = 500;
    log::info!("Setting up {0}x{0} matrix-free tridiagonal operator and sin vector y...", n);

    let a = tridiagonal_operator(n);
    let y = DenseVector::from(RealVector::new(create_sin_vector(n)));

    let algorithm = ConjugateGradient::with_params(1e-20, 1000);
    match algorithm.solve(&a, &y) {
        Ok(result) => {
            log::info!(
                "Solved in {} iterations, residual norm {:e}",
                result.metadata.iterations,
                result.metadata.residual_norm
            );
            log::info!("First entries of x: {:?}", &result.x.storage()[..5.min(n)]);
        }
        Err(e) => log::error!("Solve failed: {}", e),
    }
}
