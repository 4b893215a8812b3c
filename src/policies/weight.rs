use nalgebra::RealField;
use rand_distr::num_traits::{One, Zero};

use crate::state::StateShape;
use crate::utils::gauss_pdf;

/// Scores predicted observations against the actual observation,
/// producing unnormalized weights.
pub trait WeightPolicy<W, O> {
    fn weight(&mut self, predicted: &[O], actual: &O) -> Vec<W>;
}

/// `w = 1 / sum((pred - actual)^2)` over all scalar components.
///
/// An exact match yields an infinite weight; the orchestrator lets the
/// resulting non-finite values propagate.
#[derive(Debug, Default, Clone, Copy)]
pub struct InverseSquareError;

impl<O> WeightPolicy<O::Scalar, O> for InverseSquareError
where
    O: StateShape,
{
    fn weight(&mut self, predicted: &[O], actual: &O) -> Vec<O::Scalar> {
        predicted
            .iter()
            .map(|pred| {
                let squared = pred.fold_scalars(actual, O::Scalar::zero(), &mut |acc, p, a| {
                    let d = p - a;
                    acc + d * d
                });
                O::Scalar::one() / squared
            })
            .collect()
    }
}

/// `w = sum(N(pred - actual; mu, sigma))` over all scalar components.
///
/// Per-component densities are summed rather than multiplied into a
/// joint likelihood, matching the reference estimator's behavior.
pub struct NormPdf<T: RealField + Copy> {
    mu: T,
    sigma: T,
}

impl<T: RealField + Copy> NormPdf<T> {
    pub fn new(mu: T, sigma: T) -> Self {
        NormPdf { mu, sigma }
    }

    /// Takes effect on subsequent `weight` calls.
    pub fn set_mu(&mut self, mu: T) {
        self.mu = mu;
    }

    /// Takes effect on subsequent `weight` calls.
    pub fn set_sigma(&mut self, sigma: T) {
        self.sigma = sigma;
    }

    pub fn mu(&self) -> T {
        self.mu
    }

    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: RealField + Copy> Default for NormPdf<T> {
    fn default() -> Self {
        NormPdf {
            mu: T::zero(),
            sigma: T::one(),
        }
    }
}

impl<O> WeightPolicy<O::Scalar, O> for NormPdf<O::Scalar>
where
    O: StateShape,
{
    fn weight(&mut self, predicted: &[O], actual: &O) -> Vec<O::Scalar> {
        let (mu, sigma) = (self.mu, self.sigma);
        predicted
            .iter()
            .map(|pred| {
                pred.fold_scalars(actual, O::Scalar::zero(), &mut |acc, p, a| {
                    acc + gauss_pdf(p - a, mu, sigma)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{InverseSquareError, NormPdf, WeightPolicy};

    #[test]
    fn inverse_square_error_scalar() {
        let weights = InverseSquareError.weight(&[1.0, 4.0], &2.0);
        assert_eq!(weights, vec![1.0, 0.25]);
    }

    #[test]
    fn inverse_square_error_sums_dimensions() {
        let weights: Vec<f64> = InverseSquareError.weight(&[[1.0, 2.0]], &[0.0, 0.0]);
        assert!((weights[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn exact_match_degenerates_to_infinity() {
        let weights: Vec<f64> = InverseSquareError.weight(&[2.0, 3.0, 2.5], &2.0);
        assert!(weights[0].is_infinite());
        assert!(weights[1].is_finite());
        assert!(weights[2].is_finite());
    }

    #[test]
    fn norm_pdf_peaks_at_match() {
        let mut policy = NormPdf::default();
        let weights: Vec<f64> = policy.weight(&[0.0, 1.0], &0.0);
        assert!((weights[0] - 0.3989422804014327).abs() < 1e-12);
        assert!(weights[1] < weights[0]);
    }

    #[test]
    fn norm_pdf_sums_dimension_densities() {
        let mut policy = NormPdf::default();
        let weights: Vec<f64> = policy.weight(&[[1.0, 1.0]], &[1.0, 1.0]);
        assert!((weights[0] - 2.0 * 0.3989422804014327).abs() < 1e-12);
    }

    #[test]
    fn setters_apply_to_next_call() {
        let mut policy = NormPdf::default();
        let before = policy.weight(&[1.0], &0.0)[0];

        policy.set_mu(1.0);
        let centered = policy.weight(&[1.0], &0.0)[0];
        assert!(centered > before);

        policy.set_sigma(10.0);
        let flattened = policy.weight(&[1.0], &0.0)[0];
        assert!(flattened < centered);
    }
}
