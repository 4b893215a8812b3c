/// Advances every particle through the process model, in place.
pub trait PredictionPolicy<S> {
    fn predict(&mut self, particles: &mut [S]);
}

/// Identity prediction, for systems whose dynamics live entirely in
/// the noise model.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrediction;

impl<S> PredictionPolicy<S> for NoPrediction {
    fn predict(&mut self, _particles: &mut [S]) {}
}

/// Applies a pure transition function of the previous state and the
/// discrete step index. The step counter increments once per call and
/// is shared by all particles of that call, so time-varying dynamics
/// see a consistent clock.
pub struct TransitionPrediction<F> {
    transition: F,
    step: usize,
}

impl<F> TransitionPrediction<F> {
    pub fn new(transition: F) -> Self {
        TransitionPrediction {
            transition,
            step: 0,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }
}

impl<S, F> PredictionPolicy<S> for TransitionPrediction<F>
where
    F: FnMut(&S, usize) -> S,
{
    fn predict(&mut self, particles: &mut [S]) {
        self.step += 1;
        for particle in particles.iter_mut() {
            *particle = (self.transition)(particle, self.step);
        }
    }
}
