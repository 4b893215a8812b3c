use std::cmp::Ordering;
use std::fmt;

use nalgebra::RealField;

use crate::policies::{
    GaussianInit, GaussianNoise, IdentityObservation, InitPolicy, NoPrediction, NoisePolicy,
    NormPdf, ObservationPolicy, PredictionPolicy, ResamplingPolicy, SystematicResampling,
    WeightPolicy, WeightedMean, WinnerPolicy,
};
use crate::state::StateShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    /// A filter needs at least one particle.
    NoParticles,
    /// The raw weights summed to zero or NaN, so they cannot be
    /// normalized; every particle was implausible for the observation.
    DegenerateWeights,
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::NoParticles => write!(f, "particle count must be greater than zero"),
            FilterError::DegenerateWeights => {
                write!(f, "particle weights sum to zero or NaN, cannot normalize")
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Sequential Monte Carlo estimator composed from pluggable policies.
///
/// The default type parameters mirror a plain bootstrap filter:
/// gaussian initialization and noise, no prediction, identity
/// observation mapping, normal-density weighting, systematic
/// resampling and a weighted-mean estimate. The `W: RealField` bound
/// is the compile-time contract that weights are a real floating-point
/// type.
pub struct ParticleFilter<
    S,
    W = f64,
    I = GaussianInit<S>,
    P = NoPrediction,
    N = GaussianNoise<S>,
    M = IdentityObservation,
    L = NormPdf<W>,
    R = SystematicResampling,
    E = WeightedMean,
> where
    S: StateShape,
    W: RealField + Copy,
{
    num_particles: usize,
    initialized: bool,
    particles: Vec<S>,
    weights: Vec<W>,
    init: I,
    prediction: P,
    noise: N,
    observation: M,
    weighting: L,
    resampling: R,
    winner: E,
}

impl<S, W, I, P, N, M, L, R, E> ParticleFilter<S, W, I, P, N, M, L, R, E>
where
    S: StateShape,
    W: RealField + Copy,
{
    /// Policies are listed in pipeline order. Fails if `num_particles`
    /// is zero.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        num_particles: usize,
        init: I,
        prediction: P,
        noise: N,
        observation: M,
        weighting: L,
        resampling: R,
        winner: E,
    ) -> Result<Self, FilterError> {
        if num_particles == 0 {
            return Err(FilterError::NoParticles);
        }
        Ok(ParticleFilter {
            num_particles,
            initialized: false,
            particles: Vec::new(),
            weights: Vec::new(),
            init,
            prediction,
            noise,
            observation,
            weighting,
            resampling,
            winner,
        })
    }

    pub fn num_particles(&self) -> usize {
        self.num_particles
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Empty until the first `run` call initializes the filter.
    pub fn particles(&self) -> &[S] {
        &self.particles
    }

    /// Uniform `1/n` after every successful `run`.
    pub fn weights(&self) -> &[W] {
        &self.weights
    }

    /// Forces re-initialization on the next `run`. Particle count and
    /// policy configuration are unchanged; the stale buffers are
    /// ignored until then.
    pub fn reset(&mut self) {
        self.initialized = false;
    }

    /// `1 / sum(w^2)`, the usual particle-degeneracy diagnostic. Equals
    /// the particle count for uniform weights.
    pub fn effective_sample_size(&self) -> W {
        let sum_sq = self
            .weights
            .iter()
            .fold(W::zero(), |acc, w| acc + *w * *w);
        if sum_sq > W::zero() {
            W::one() / sum_sq
        } else {
            W::zero()
        }
    }

    pub fn init_mut(&mut self) -> &mut I {
        &mut self.init
    }

    pub fn prediction_mut(&mut self) -> &mut P {
        &mut self.prediction
    }

    pub fn noise_mut(&mut self) -> &mut N {
        &mut self.noise
    }

    pub fn observation_mut(&mut self) -> &mut M {
        &mut self.observation
    }

    pub fn weighting_mut(&mut self) -> &mut L {
        &mut self.weighting
    }

    pub fn resampling_mut(&mut self) -> &mut R {
        &mut self.resampling
    }

    pub fn winner_mut(&mut self) -> &mut E {
        &mut self.winner
    }
}

impl<S, W, I, P, N, M, L, R, E> ParticleFilter<S, W, I, P, N, M, L, R, E>
where
    S: StateShape,
    W: RealField + Copy,
    I: InitPolicy<S>,
    P: PredictionPolicy<S>,
    N: NoisePolicy<S>,
    R: ResamplingPolicy<S, W>,
    E: WinnerPolicy<S, W>,
{
    /// Runs the full pipeline for one observation and returns the
    /// point estimate. The first call lazily initializes the particle
    /// set.
    pub fn run<O>(&mut self, observation: &O) -> Result<S, FilterError>
    where
        M: ObservationPolicy<S, O>,
        L: WeightPolicy<W, O>,
    {
        if !self.initialized {
            self.particles = self.init.init(self.num_particles);
            self.initialized = true;
        }

        self.prediction.predict(&mut self.particles);
        self.noise.noise(&mut self.particles);

        let predicted = self.observation.state_to_obs(&self.particles);
        let mut weights = self.weighting.weight(&predicted, observation);

        let sum = weights.iter().fold(W::zero(), |acc, w| acc + *w);
        // a NaN sum must fail this comparison too
        if sum.partial_cmp(&W::zero()) != Some(Ordering::Greater) {
            return Err(FilterError::DegenerateWeights);
        }
        for w in weights.iter_mut() {
            *w /= sum;
        }

        // Both buffers are swapped in wholesale here; intermediate
        // particle generations are never observable.
        self.resampling.resample(&mut self.particles, &mut weights);
        self.weights = weights;

        Ok(self.winner.winner(&self.particles, &self.weights))
    }
}

impl<S> ParticleFilter<S>
where
    S: StateShape<Scalar = f64> + Default,
{
    /// A bootstrap filter over the default policies with unit sigmas
    /// and a zero baseline state.
    pub fn with_defaults(num_particles: usize) -> Result<Self, FilterError> {
        ParticleFilter::new(
            num_particles,
            GaussianInit::new(S::default(), 1.0),
            NoPrediction,
            GaussianNoise::new(1.0),
            IdentityObservation,
            NormPdf::default(),
            SystematicResampling::new(),
            WeightedMean,
        )
    }
}

impl<S, W, I, P, N, M, L, R, E> fmt::Debug for ParticleFilter<S, W, I, P, N, M, L, R, E>
where
    S: StateShape,
    W: RealField + Copy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticleFilter")
            .field("num_particles", &self.num_particles)
            .field("initialized", &self.initialized)
            .field("effective_sample_size", &self.effective_sample_size())
            .finish()
    }
}
