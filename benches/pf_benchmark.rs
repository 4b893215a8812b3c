use criterion::{criterion_group, criterion_main, Criterion};

use smc::policies::{
    GaussianInit, GaussianNoise, IdentityObservation, NoPrediction, NormPdf,
    SystematicResampling, WeightedMean,
};
use smc::ParticleFilter;

fn scalar_state(c: &mut Criterion) {
    let mut filter = ParticleFilter::new(
        500,
        GaussianInit::seeded(0.0, 1.0, 1),
        NoPrediction,
        GaussianNoise::seeded(0.5, 2),
        IdentityObservation,
        NormPdf::default(),
        SystematicResampling::seeded(3),
        WeightedMean,
    )
    .unwrap();

    c.bench_function("pf_scalar", |b| b.iter(|| filter.run(&0.5).unwrap()));
}

fn array_state(c: &mut Criterion) {
    let mut filter = ParticleFilter::new(
        500,
        GaussianInit::seeded([0.0; 3], 1.0, 1),
        NoPrediction,
        GaussianNoise::seeded(0.5, 2),
        IdentityObservation,
        NormPdf::default(),
        SystematicResampling::seeded(3),
        WeightedMean,
    )
    .unwrap();

    c.bench_function("pf_array", |b| b.iter(|| filter.run(&[0.1, 0.2, 0.3]).unwrap()));
}

criterion_group!(benches, scalar_state, array_state);
criterion_main!(benches);
