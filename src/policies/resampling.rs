use nalgebra::RealField;
use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Redraws the particle set proportionally to the normalized weights
/// and resets the weights to uniform. Input weights are assumed to sum
/// to one.
pub trait ResamplingPolicy<S, W> {
    fn resample(&mut self, particles: &mut Vec<S>, weights: &mut [W]);
}

/// Low-variance resampling from a single uniform draw.
///
/// The cumulative weights form a staircase of edges; one offset in
/// `[0, 1/n)` advanced in strides of `1/n` walks the staircase and
/// emits each particle once per stride landing on its step. With the
/// final edge pinned to 1 this produces exactly n particles.
pub struct SystematicResampling {
    rng: StdRng,
}

impl SystematicResampling {
    pub fn new() -> Self {
        SystematicResampling {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        SystematicResampling {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystematicResampling {
    fn default() -> Self {
        SystematicResampling::new()
    }
}

impl<S, W> ResamplingPolicy<S, W> for SystematicResampling
where
    S: Clone,
    W: RealField + Copy,
    Standard: Distribution<W>,
{
    fn resample(&mut self, particles: &mut Vec<S>, weights: &mut [W]) {
        let n = weights.len();
        debug_assert_eq!(particles.len(), n);

        // Cumulative edges, clamped so accumulated rounding can never
        // push an edge past 1; the last edge is pinned to exactly 1.
        let mut edges = vec![W::zero(); n + 1];
        for i in 0..n {
            let e = edges[i] + weights[i];
            edges[i + 1] = if e > W::one() { W::one() } else { e };
        }
        edges[n] = W::one();

        let stride = W::one() / W::from_usize(n).unwrap();
        let mut u: W = self.rng.gen::<W>() * stride;

        let mut resampled = Vec::with_capacity(n);
        for i in 1..=n {
            while u < edges[i] {
                resampled.push(particles[i - 1].clone());
                u += stride;
            }
            weights[i - 1] = stride;
        }
        *particles = resampled;
    }
}

/// Independent cumulative-weight draws, one per particle. Higher
/// resampling variance than the systematic scheme, kept for
/// comparison.
pub struct MultinomialResampling {
    rng: StdRng,
}

impl MultinomialResampling {
    pub fn new() -> Self {
        MultinomialResampling {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        MultinomialResampling {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for MultinomialResampling {
    fn default() -> Self {
        MultinomialResampling::new()
    }
}

impl<S, W> ResamplingPolicy<S, W> for MultinomialResampling
where
    S: Clone,
    W: RealField + Copy,
    Standard: Distribution<W>,
{
    fn resample(&mut self, particles: &mut Vec<S>, weights: &mut [W]) {
        let n = weights.len();
        debug_assert_eq!(particles.len(), n);

        let mut cumulative = vec![W::zero(); n];
        let mut total = W::zero();
        for i in 0..n {
            total += weights[i];
            cumulative[i] = total;
        }

        let mut resampled = Vec::with_capacity(n);
        for _ in 0..n {
            let draw: W = self.rng.gen::<W>() * total;
            let mut pick = n - 1;
            for (i, edge) in cumulative.iter().enumerate() {
                if *edge > draw {
                    pick = i;
                    break;
                }
            }
            resampled.push(particles[pick].clone());
        }

        let uniform = W::one() / W::from_usize(n).unwrap();
        for w in weights.iter_mut() {
            *w = uniform;
        }
        *particles = resampled;
    }
}

#[cfg(test)]
mod tests {
    use super::{MultinomialResampling, ResamplingPolicy, SystematicResampling};

    #[test]
    fn output_length_is_always_n() {
        for seed in 0..20 {
            let mut resampling = SystematicResampling::seeded(seed);
            let mut particles: Vec<f64> = (0..7).map(|i| i as f64).collect();
            let mut weights = vec![0.05, 0.1, 0.15, 0.2, 0.25, 0.15, 0.1];
            resampling.resample(&mut particles, &mut weights);
            assert_eq!(particles.len(), 7);
        }
    }

    #[test]
    fn weights_reset_to_uniform() {
        let mut resampling = SystematicResampling::seeded(3);
        let mut particles = vec![1.0, 2.0, 3.0, 4.0];
        let mut weights = vec![0.1, 0.2, 0.3, 0.4];
        resampling.resample(&mut particles, &mut weights);
        assert!(weights.iter().all(|&w| w == 0.25));
    }

    #[test]
    fn uniform_weights_reproduce_each_particle_once() {
        // With exactly representable uniform weights the stride lands
        // once on every step, whatever the random offset.
        for seed in 0..50 {
            let mut resampling = SystematicResampling::seeded(seed);
            let mut particles = vec![0.0, 1.0, 2.0, 3.0];
            let mut weights = vec![0.25; 4];
            resampling.resample(&mut particles, &mut weights);
            let mut sorted = particles.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(sorted, vec![0.0, 1.0, 2.0, 3.0]);
        }
    }

    #[test]
    fn concentrated_weight_clones_the_winner() {
        for seed in 0..20 {
            let mut resampling = SystematicResampling::seeded(seed);
            let mut particles = vec![10.0, 20.0, 30.0, 40.0, 50.0];
            let mut weights = vec![0.0, 0.0, 1.0, 0.0, 0.0];
            resampling.resample(&mut particles, &mut weights);
            assert_eq!(particles, vec![30.0; 5]);
        }
    }

    #[test]
    fn half_half_weights_split_evenly() {
        for seed in 0..20 {
            let mut resampling = SystematicResampling::seeded(seed);
            let mut particles = vec![1.0, 2.0, 3.0, 4.0];
            let mut weights = vec![0.5, 0.5, 0.0, 0.0];
            resampling.resample(&mut particles, &mut weights);
            assert_eq!(particles.iter().filter(|&&p| p == 1.0).count(), 2);
            assert_eq!(particles.iter().filter(|&&p| p == 2.0).count(), 2);
        }
    }

    #[test]
    fn survives_cumulative_drift_past_one() {
        // 10 * 0.1 does not sum to exactly 1.0 in binary floating point.
        let mut resampling = SystematicResampling::seeded(11);
        let mut particles: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let mut weights = vec![0.1; 10];
        resampling.resample(&mut particles, &mut weights);
        assert_eq!(particles.len(), 10);
    }

    #[test]
    fn array_states_are_cloned_whole() {
        let mut resampling = SystematicResampling::seeded(5);
        let mut particles = vec![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let mut weights = vec![0.0, 1.0, 0.0];
        resampling.resample(&mut particles, &mut weights);
        assert_eq!(particles, vec![[2.0, 2.0]; 3]);
    }

    #[test]
    fn multinomial_preserves_length_and_resets_weights() {
        for seed in 0..20 {
            let mut resampling = MultinomialResampling::seeded(seed);
            let mut particles = vec![1.0, 2.0, 3.0, 4.0, 5.0];
            let mut weights = vec![0.2, 0.2, 0.2, 0.2, 0.2];
            resampling.resample(&mut particles, &mut weights);
            assert_eq!(particles.len(), 5);
            assert!(weights.iter().all(|&w| w == 0.2));
        }
    }

    #[test]
    fn multinomial_concentrated_weight_clones_the_winner() {
        for seed in 0..20 {
            let mut resampling = MultinomialResampling::seeded(seed);
            let mut particles = vec![1.0, 2.0, 3.0];
            let mut weights = vec![0.0, 0.0, 1.0];
            resampling.resample(&mut particles, &mut weights);
            assert_eq!(particles, vec![3.0; 3]);
        }
    }
}
