//! Prediction client for talking to a model server

use modelserver_common::error::{ModelServerError, Result};
use modelserver_proto::{ModelSpec, PredictRequest, PredictResponse, PredictionServiceClient, TensorProto};
use std::collections::HashMap;
use std::time::Duration;
use tonic::transport::Channel;
use tracing::debug;

/// Client wrapper around the generated Predict stub
#[derive(Clone)]
pub struct PredictionClient {
    endpoint: String,
    inner: PredictionServiceClient<Channel>,
}

impl PredictionClient {
    /// Connect to a model server endpoint, e.g. `http://localhost:8500`
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let inner = PredictionServiceClient::connect(endpoint.to_string())
            .await
            .map_err(ModelServerError::Transport)?;

        debug!("Connected to model server at {}", endpoint);

        Ok(Self {
            endpoint: endpoint.to_string(),
            inner,
        })
    }

    /// Endpoint this client is connected to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Call Predict on `model_name`.
    ///
    /// `timeout` is sent as the call deadline. A failed call returns the
    /// server's status as [`ModelServerError::Grpc`].
    pub async fn predict(
        &mut self,
        model_name: &str,
        signature_name: &str,
        inputs: HashMap<String, TensorProto>,
        timeout: Option<Duration>,
    ) -> Result<PredictResponse> {
        let mut request = tonic::Request::new(PredictRequest {
            model_spec: Some(ModelSpec {
                name: model_name.to_string(),
                version: None,
                signature_name: signature_name.to_string(),
            }),
            inputs,
            output_filter: Vec::new(),
        });
        if let Some(timeout) = timeout {
            request.set_timeout(timeout);
        }

        let response = self.inner.predict(request).await?;
        Ok(response.into_inner())
    }
}

/// Parse `name=v1,v2,...` into a named rank-1 float tensor
pub fn parse_float_input(spec: &str) -> Result<(String, TensorProto)> {
    let (name, values) = spec
        .split_once('=')
        .ok_or_else(|| ModelServerError::invalid_input(format!("expected name=values, got '{}'", spec)))?;
    if name.is_empty() {
        return Err(ModelServerError::invalid_input("input name must not be empty"));
    }

    let values = values
        .split(',')
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim().parse::<f32>().map_err(|e| {
                ModelServerError::invalid_input(format!("bad value '{}' for input '{}': {}", v, name, e))
            })
        })
        .collect::<Result<Vec<f32>>>()?;

    Ok((name.to_string(), TensorProto::from_floats(values)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_input() {
        let (name, tensor) = parse_float_input("x=1, 2.5,-3").unwrap();

        assert_eq!(name, "x");
        assert_eq!(tensor.float_val, vec![1.0, 2.5, -3.0]);
        assert_eq!(tensor.tensor_shape.unwrap().dims, vec![3]);
    }

    #[test]
    fn test_parse_float_input_rejects_garbage() {
        assert!(parse_float_input("x").is_err());
        assert!(parse_float_input("=1,2").is_err());
        assert!(parse_float_input("x=1,two").is_err());
    }
}
