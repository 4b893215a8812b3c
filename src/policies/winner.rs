use nalgebra::RealField;

use crate::state::StateShape;

/// Reduces the weighted particle set to one point estimate.
pub trait WinnerPolicy<S, W> {
    /// The particle set must be non-empty.
    fn winner(&mut self, particles: &[S], weights: &[W]) -> S;
}

/// `sum(particles[i] * weights[i])`, element-wise for aggregate states.
///
/// Performs no normalization; the caller supplies weights that already
/// sum to one, which holds right after resampling.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedMean;

impl<S> WinnerPolicy<S, S::Scalar> for WeightedMean
where
    S: StateShape,
{
    fn winner(&mut self, particles: &[S], weights: &[S::Scalar]) -> S {
        let mut estimate = particles[0].zeroed();
        for (particle, weight) in particles.iter().zip(weights.iter()) {
            estimate.scaled_add(particle, *weight);
        }
        estimate
    }
}

/// The single particle carrying the most weight.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighestWeight;

impl<S, W> WinnerPolicy<S, W> for HighestWeight
where
    S: Clone,
    W: RealField + Copy,
{
    fn winner(&mut self, particles: &[S], weights: &[W]) -> S {
        let mut best = 0;
        for i in 1..weights.len() {
            if weights[i] > weights[best] {
                best = i;
            }
        }
        particles[best].clone()
    }
}
