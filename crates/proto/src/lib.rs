//! ModelServer Protocol Buffers
//!
//! Wire messages for the `tensorflow.serving.PredictionService/Predict` call.
//! Messages are declared directly as prost messages; the service stubs are
//! generated by `build.rs`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Signature used when a request leaves `signature_name` empty.
pub const DEFAULT_SIGNATURE_NAME: &str = "serving_default";

/// Identifies the servable a request is addressed to.
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model name as configured on the server
    #[prost(string, tag = "1")]
    pub name: String,

    /// Specific version; latest servable version when unset
    #[prost(int64, optional, tag = "2")]
    pub version: Option<i64>,

    /// Signature within the model
    #[prost(string, tag = "3")]
    pub signature_name: String,
}

/// Element type of a tensor.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize, Deserialize,
)]
#[repr(i32)]
pub enum DataType {
    DtInvalid = 0,
    DtFloat = 1,
    DtDouble = 2,
    DtInt32 = 3,
    DtString = 7,
    DtInt64 = 9,
    DtBool = 10,
}

/// Dimension sizes of a tensor, outermost first.
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
pub struct TensorShape {
    #[prost(int64, repeated, tag = "1")]
    pub dims: Vec<i64>,
}

/// A dense tensor value. Only the `*_val` field matching `dtype` is populated.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct TensorProto {
    #[prost(enumeration = "DataType", tag = "1")]
    pub dtype: i32,

    #[prost(message, optional, tag = "2")]
    pub tensor_shape: Option<TensorShape>,

    #[prost(float, repeated, tag = "5")]
    pub float_val: Vec<f32>,

    #[prost(double, repeated, tag = "6")]
    pub double_val: Vec<f64>,

    #[prost(int32, repeated, tag = "7")]
    pub int_val: Vec<i32>,

    #[prost(bytes = "vec", repeated, tag = "8")]
    pub string_val: Vec<Vec<u8>>,

    #[prost(int64, repeated, tag = "10")]
    pub int64_val: Vec<i64>,

    #[prost(bool, repeated, tag = "11")]
    pub bool_val: Vec<bool>,
}

impl TensorProto {
    /// Build a rank-1 float tensor
    pub fn from_floats(values: Vec<f32>) -> Self {
        Self {
            dtype: DataType::DtFloat as i32,
            tensor_shape: Some(TensorShape {
                dims: vec![values.len() as i64],
            }),
            float_val: values,
            ..Default::default()
        }
    }
}

/// Predict call input.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct PredictRequest {
    #[prost(message, optional, tag = "1")]
    pub model_spec: Option<ModelSpec>,

    /// Input tensors keyed by signature input name
    #[prost(map = "string, message", tag = "2")]
    pub inputs: HashMap<String, TensorProto>,

    /// Restrict the returned outputs; all outputs when empty
    #[prost(string, repeated, tag = "3")]
    pub output_filter: Vec<String>,
}

/// Predict call output.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Output tensors keyed by signature output name
    #[prost(map = "string, message", tag = "1")]
    pub outputs: HashMap<String, TensorProto>,

    /// The servable that actually produced the outputs
    #[prost(message, optional, tag = "2")]
    pub model_spec: Option<ModelSpec>,
}

include!(concat!(env!("OUT_DIR"), "/tensorflow.serving.PredictionService.rs"));

pub use prediction_service_client::PredictionServiceClient;
pub use prediction_service_server::{PredictionService, PredictionServiceServer};
