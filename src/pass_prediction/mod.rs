//! Everything between "ask the prediction service" and "this is the pass to wait for".
mod observer_location;
mod pass_candidate;
mod pass_selector;
mod predictor_client;

pub use observer_location::ObserverLocation;
pub use pass_candidate::{PassCandidate, SelectedPass};
pub(crate) use pass_candidate::split_hms;
pub use pass_selector::select;
pub use predictor_client::{FetchError, PassPredictor, PassPredictorClient, PredictionProvider};
