//! ModelServer Client
//!
//! Typed client for the Predict endpoint of a running model server.

pub mod prediction_client;

pub use prediction_client::{parse_float_input, PredictionClient};
