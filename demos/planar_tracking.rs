// Constant-velocity target on a plane, estimated from noisy position
// fixes. The state is an nalgebra vector [x, y, vx, vy]; only the
// position block is observed.

use std::error::Error;

use nalgebra::{Vector2, Vector4};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use smc::policies::{
    GaussianInit, GaussianNoise, MapObservation, NormPdf, SystematicResampling,
    TransitionPrediction, WeightedMean,
};
use smc::ParticleFilter;

const DT: f64 = 0.1;

fn transition(s: &Vector4<f64>, _k: usize) -> Vector4<f64> {
    Vector4::new(s[0] + s[2] * DT, s[1] + s[3] * DT, s[2], s[3])
}

fn position(s: &Vector4<f64>) -> Vector2<f64> {
    s.fixed_rows::<2>(0).into_owned()
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut filter = ParticleFilter::new(
        500,
        GaussianInit::seeded(Vector4::new(0.0, 0.0, 1.0, 0.5), 0.5, 1),
        TransitionPrediction::new(transition),
        GaussianNoise::seeded(0.05, 2),
        MapObservation::new(position),
        NormPdf::new(0.0, 0.5),
        SystematicResampling::seeded(3),
        WeightedMean,
    )?;

    let mut rng = StdRng::seed_from_u64(7);
    let gps_noise = Normal::new(0.0, 0.3)?;

    let mut truth = Vector4::new(0.0, 0.0, 1.0, 0.5);
    println!("step\ttruth_x\ttruth_y\test_x\test_y");
    for step in 1..=100 {
        truth = transition(&truth, step);
        let z = position(&truth)
            + Vector2::new(gps_noise.sample(&mut rng), gps_noise.sample(&mut rng));
        let estimate = filter.run(&z)?;
        if step % 10 == 0 {
            println!(
                "{step}\t{:.3}\t{:.3}\t{:.3}\t{:.3}",
                truth[0], truth[1], estimate[0], estimate[1]
            );
        }
    }
    println!("{:?}", filter);

    Ok(())
}
