use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::state::StateShape;

/// Produces the first generation of particles.
pub trait InitPolicy<S> {
    fn init(&mut self, num_particles: usize) -> Vec<S>;
}

/// Draws every particle as a template state plus independent zero-mean
/// gaussian offsets on each scalar component.
pub struct GaussianInit<S: StateShape> {
    template: S,
    sigma: S::Scalar,
    rng: StdRng,
}

impl<S: StateShape> GaussianInit<S> {
    /// The template is the baseline mean of the initial distribution;
    /// for dynamic-sequence states it also fixes the particle shape.
    pub fn new(template: S, sigma: S::Scalar) -> Self {
        GaussianInit {
            template,
            sigma,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(template: S, sigma: S::Scalar, seed: u64) -> Self {
        GaussianInit {
            template,
            sigma,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Takes effect on the next `init` call.
    pub fn set_sigma(&mut self, sigma: S::Scalar) {
        self.sigma = sigma;
    }

    pub fn sigma(&self) -> S::Scalar {
        self.sigma
    }
}

impl<S> InitPolicy<S> for GaussianInit<S>
where
    S: StateShape,
    StandardNormal: Distribution<S::Scalar>,
{
    fn init(&mut self, num_particles: usize) -> Vec<S> {
        let sigma = self.sigma;
        let mut particles = Vec::with_capacity(num_particles);
        for _ in 0..num_particles {
            let mut particle = self.template.clone();
            particle.for_each_scalar(&mut |x| {
                let draw: S::Scalar = StandardNormal.sample(&mut self.rng);
                *x += sigma * draw;
            });
            particles.push(particle);
        }
        particles
    }
}
