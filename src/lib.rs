pub mod filter;
pub mod policies;
pub mod state;
pub mod utils;

pub use filter::{FilterError, ParticleFilter};
pub use state::StateShape;
