use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::state::StateShape;

/// Perturbs every particle in place with system noise.
pub trait NoisePolicy<S> {
    fn noise(&mut self, particles: &mut [S]);
}

/// Adds an independent zero-mean gaussian draw to every scalar
/// component of every particle.
pub struct GaussianNoise<S: StateShape> {
    sigma: S::Scalar,
    rng: StdRng,
}

impl<S: StateShape> GaussianNoise<S> {
    pub fn new(sigma: S::Scalar) -> Self {
        GaussianNoise {
            sigma,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(sigma: S::Scalar, seed: u64) -> Self {
        GaussianNoise {
            sigma,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Takes effect on the next `noise` call.
    pub fn set_sigma(&mut self, sigma: S::Scalar) {
        self.sigma = sigma;
    }

    pub fn sigma(&self) -> S::Scalar {
        self.sigma
    }
}

impl<S> NoisePolicy<S> for GaussianNoise<S>
where
    S: StateShape,
    StandardNormal: Distribution<S::Scalar>,
{
    fn noise(&mut self, particles: &mut [S]) {
        let sigma = self.sigma;
        for particle in particles.iter_mut() {
            particle.for_each_scalar(&mut |x| {
                let draw: S::Scalar = StandardNormal.sample(&mut self.rng);
                *x += sigma * draw;
            });
        }
    }
}
