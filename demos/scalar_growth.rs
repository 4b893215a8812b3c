// Univariate nonlinear growth model, the classic particle filter
// benchmark: the state is scalar, the observation is quadratic in the
// state, and the dynamics are strongly nonlinear and time-varying.

use std::error::Error;
use std::fs;

use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use smc::policies::{
    GaussianInit, GaussianNoise, MapObservation, NormPdf, SystematicResampling,
    TransitionPrediction, WeightedMean,
};
use smc::ParticleFilter;

fn system(x: f64, k: usize) -> f64 {
    x / 2.0 + 25.0 * x / (1.0 + x * x) + 8.0 * (1.2 * k as f64).cos()
}

fn generate_observation(x: f64) -> f64 {
    x * x / 20.0
}

#[derive(Serialize)]
struct Record {
    step: usize,
    truth: f64,
    observation: f64,
    estimate: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let sigma = 10.0f64.sqrt();

    let mut filter = ParticleFilter::new(
        1000,
        GaussianInit::seeded(0.0, sigma, 1),
        TransitionPrediction::new(|x: &f64, k| system(*x, k)),
        GaussianNoise::seeded(sigma, 2),
        MapObservation::new(|x: &f64| generate_observation(*x)),
        NormPdf::default(),
        SystematicResampling::seeded(3),
        WeightedMean,
    )?;

    // simulated process driving the filter
    let mut rng = StdRng::seed_from_u64(7);
    let process_noise = Normal::new(0.0, sigma)?;
    let observation_noise = Normal::new(0.0, 1.0)?;

    let mut truth = 0.0;
    let mut records = Vec::new();
    for step in 1..=40 {
        truth = system(truth, step) + process_noise.sample(&mut rng);
        let observation = generate_observation(truth) + observation_noise.sample(&mut rng);
        let estimate = filter.run(&observation)?;
        println!("{step}\t{truth:.4}\t{observation:.4}\t{estimate:.4}");
        records.push(Record {
            step,
            truth,
            observation,
            estimate,
        });
    }

    fs::create_dir_all("img")?;

    let mut writer = csv::Writer::from_path("img/scalar_growth.csv")?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let y_min = records
        .iter()
        .map(|r| r.truth.min(r.estimate))
        .fold(f64::INFINITY, f64::min)
        - 5.0;
    let y_max = records
        .iter()
        .map(|r| r.truth.max(r.estimate))
        .fold(f64::NEG_INFINITY, f64::max)
        + 5.0;

    let root = BitMapBackend::new("img/scalar_growth.png", (960, 540)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Univariate nonlinear growth model", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0i32..41i32, y_min..y_max)?;
    chart.configure_mesh().draw()?;
    chart
        .draw_series(LineSeries::new(
            records.iter().map(|r| (r.step as i32, r.truth)),
            &BLUE,
        ))?
        .label("truth")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .draw_series(LineSeries::new(
            records.iter().map(|r| (r.step as i32, r.estimate)),
            &RED,
        ))?
        .label("estimate")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart.configure_series_labels().border_style(BLACK).draw()?;
    root.present()?;

    Ok(())
}
