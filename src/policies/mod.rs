mod init;
mod noise;
mod prediction;
mod resampling;
mod state2obs;
mod weight;
mod winner;

pub use init::{GaussianInit, InitPolicy};
pub use noise::{GaussianNoise, NoisePolicy};
pub use prediction::{NoPrediction, PredictionPolicy, TransitionPrediction};
pub use resampling::{MultinomialResampling, ResamplingPolicy, SystematicResampling};
pub use state2obs::{IdentityObservation, MapObservation, ObservationPolicy};
pub use weight::{InverseSquareError, NormPdf, WeightPolicy};
pub use winner::{HighestWeight, WeightedMean, WinnerPolicy};
