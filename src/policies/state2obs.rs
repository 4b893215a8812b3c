/// Maps each particle to its predicted observation.
pub trait ObservationPolicy<S, O> {
    fn state_to_obs(&mut self, particles: &[S]) -> Vec<O>;
}

/// State and observation share a representation.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityObservation;

impl<S: Clone> ObservationPolicy<S, S> for IdentityObservation {
    fn state_to_obs(&mut self, particles: &[S]) -> Vec<S> {
        particles.to_vec()
    }
}

/// Wraps a pure observation function.
pub struct MapObservation<F> {
    map: F,
}

impl<F> MapObservation<F> {
    pub fn new(map: F) -> Self {
        MapObservation { map }
    }
}

impl<S, O, F> ObservationPolicy<S, O> for MapObservation<F>
where
    F: FnMut(&S) -> O,
{
    fn state_to_obs(&mut self, particles: &[S]) -> Vec<O> {
        let map = &mut self.map;
        particles.iter().map(|p| map(p)).collect()
    }
}
