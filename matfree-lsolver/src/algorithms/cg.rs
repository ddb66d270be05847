// Conjugate gradient over the LinearOperator capability, real or complex.

use log::{debug, warn};
use num_traits::Float;
use std::fmt::Debug;

use matfree_core::{DenseVector, LinearOperator, MatfreeCoreError};

use super::{ConjugateGradient, SolveAlgorithm, SolveResult};

#[derive(Debug, Clone, Copy)]
pub struct ConjugateGradientMetadata<T> {
    /// Iterations actually executed (<= the configured maximum). Compare
    /// against the budget to tell early convergence from exhaustion.
    pub iterations: usize,
    pub residual_norm: T,
}

impl<T, A> SolveAlgorithm<T, A> for ConjugateGradient<T>
where
    T: Float + Debug + Default,
    A: LinearOperator<T> + ?Sized,
{
    type Metadata = ConjugateGradientMetadata<T>;

    fn solve(
        &self,
        a: &A,
        y: &DenseVector<T>,
    ) -> Result<SolveResult<T, Self::Metadata>, MatfreeCoreError> {
        self.validate_inputs(a, y)?;
        let (x, iterations, energy) = solve_cg(a, y, None, self.max_iterations, self.tolerance)?;
        Ok(SolveResult {
            x,
            metadata: ConjugateGradientMetadata {
                iterations,
                residual_norm: energy.sqrt(),
            },
        })
    }

    fn solve_with_guess(
        &self,
        a: &A,
        y: &DenseVector<T>,
        x0: &DenseVector<T>,
    ) -> Result<SolveResult<T, Self::Metadata>, MatfreeCoreError> {
        self.validate_inputs(a, y)?;
        let (x, iterations, energy) =
            solve_cg(a, y, Some(x0), self.max_iterations, self.tolerance)?;
        Ok(SolveResult {
            x,
            metadata: ConjugateGradientMetadata {
                iterations,
                residual_norm: energy.sqrt(),
            },
        })
    }
}

/// Solves `A x = y` by conjugate gradient iterations.
///
/// `A` is any square [`LinearOperator`]; explicit matrices are adapted by
/// their own trait impl, so raw `DenseMatrix`/`ComplexDenseMatrix` values can
/// be passed directly. `y` may be real or complex (paired storage); the
/// numeric kind of `y` selects the inner-product rule for the whole run.
///
/// `x0` defaults to the zero vector. Iteration stops when the squared
/// residual norm drops to `tol` or below, or after `niter` steps. The
/// returned count is the number of iterations actually executed; reaching
/// `niter` without meeting `tol` is a normal return.
///
/// A degenerate search direction (`<d, Ad>` = 0) is not guarded against: the
/// step length goes non-finite and propagates into the returned solution.
///
/// # Errors
/// `InvalidDimensions` on any shape mismatch between `A`, `y`, and `x0`;
/// `UnsupportedOperation` if `x0` and `y` differ in numeric kind or the
/// operator rejects the kind of `y`.
pub fn cg<T, A>(
    a: &A,
    y: &DenseVector<T>,
    x0: Option<&DenseVector<T>>,
    niter: usize,
    tol: T,
) -> Result<(DenseVector<T>, usize), MatfreeCoreError>
where
    T: Float + Debug + Default,
    A: LinearOperator<T> + ?Sized,
{
    let (x, iterations, _energy) = solve_cg(a, y, x0, niter, tol)?;
    Ok((x, iterations))
}

/// Iteration body shared by [`cg`] and the [`SolveAlgorithm`] impl. Also
/// reports the final residual energy (squared norm).
fn solve_cg<T, A>(
    a: &A,
    y: &DenseVector<T>,
    x0: Option<&DenseVector<T>>,
    niter: usize,
    tol: T,
) -> Result<(DenseVector<T>, usize, T), MatfreeCoreError>
where
    T: Float + Debug + Default,
    A: LinearOperator<T> + ?Sized,
{
    let mut x = match x0 {
        Some(guess) => {
            if guess.is_complex() != y.is_complex() {
                return Err(MatfreeCoreError::UnsupportedOperation(
                    "Initial guess numeric kind does not match right-hand side".to_string(),
                ));
            }
            if guess.len() != y.len() {
                return Err(MatfreeCoreError::InvalidDimensions(format!(
                    "Initial guess length ({}) must match RHS vector y length ({})",
                    guess.len(),
                    y.len()
                )));
            }
            guess.clone()
        }
        None => y.zeros_like(),
    };

    // r = y - A*x, maintained incrementally from here on.
    let mut r = y.clone();
    r.sub_assign(&a.matvec(&x)?)?;
    let mut d = r.clone();
    let mut kold = r.dot(&r)?;
    debug!("Initial residual energy: {:?}", kold);

    let mut iiter = 0;
    while iiter < niter && kold > tol {
        let ad = a.matvec(&d)?;
        let dad = d.dot(&ad)?;
        // Degenerate direction (dAd = 0) is deliberately unguarded: the step
        // length goes non-finite and carries through x.
        let alpha = kold / dad;
        if !alpha.is_finite() {
            warn!(
                "Non-finite step length at iteration {} (dAd = {:?})",
                iiter, dad
            );
        }
        x.axpy(alpha, &d)?;
        r.axpy(-alpha, &ad)?;
        let k = r.dot(&r)?;
        // Fletcher-Reeves form; the numerator reduces to k for exact CG.
        let beta = k / kold;
        d.direction_update(beta, &r)?;
        kold = k;
        iiter += 1;
        debug!("Iteration {}: residual energy = {:?}", iiter, kold);
    }

    if !kold.is_finite() {
        warn!(
            "CG stopped after {} iteration(s) with non-finite residual energy",
            iiter
        );
    } else if kold > tol {
        warn!(
            "CG stopped after {} iteration(s) with residual energy {:?} above tolerance {:?}",
            iiter, kold, tol
        );
    } else {
        debug!("CG converged in {} iteration(s)", iiter);
    }
    Ok((x, iiter, kold))
}
