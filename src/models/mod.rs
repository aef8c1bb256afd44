pub mod prediction;

pub use prediction::{Prediction, PredictionState, PredictionStatus};
