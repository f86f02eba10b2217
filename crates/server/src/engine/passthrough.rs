//! Pass-through execution engine
//!
//! Serves every configured model with a single `serving_default` signature that
//! returns its inputs unchanged. Versions are discovered with one scan of each
//! model's base path at startup.

use super::ExecutionEngine;
use crate::deadline::RunOptions;
use modelserver_common::config::{BatchingParameters, ModelEntry, ServingConfiguration};
use modelserver_common::{EngineStatus, ModelServerError, Result};
use modelserver_proto::{ModelSpec, PredictRequest, PredictResponse, DEFAULT_SIGNATURE_NAME};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A model and the versions it serves
#[derive(Debug, Clone)]
struct ServedModel {
    base_path: PathBuf,

    /// Servable versions, highest first
    versions: Vec<i64>,
}

/// Engine that echoes inputs back as outputs
#[derive(Debug)]
pub struct PassthroughEngine {
    models: HashMap<String, ServedModel>,
}

impl PassthroughEngine {
    /// Initialize from a resolved configuration
    ///
    /// Fails when a model's base path cannot be listed.
    pub fn initialize(config: &ServingConfiguration) -> Result<Self> {
        let mut models = HashMap::with_capacity(config.models.len());

        for entry in &config.models {
            let served = Self::load_model(entry)?;
            if served.versions.is_empty() {
                warn!(
                    "No servable versions of model '{}' under {}",
                    entry.name,
                    served.base_path.display()
                );
            } else {
                info!(
                    "Serving model '{}' versions {:?} from {}",
                    entry.name,
                    served.versions,
                    served.base_path.display()
                );
            }
            models.insert(entry.name.clone(), served);
        }

        info!(
            "Pass-through engine ready: {} model(s), version policy {:?}, poll interval {}s, session parallelism {}",
            models.len(),
            config.version_policy,
            config.poll_interval_seconds,
            config.session_parallelism
        );

        if let Some(batching) = &config.batching {
            Self::log_batching(batching);
        }

        Ok(Self { models })
    }

    /// Requests are executed one at a time; batching parameters are reported only
    fn log_batching(batching: &BatchingParameters) {
        info!(
            "Batching enabled on thread pool {:?}: max_batch_size {:?}, batch_timeout_micros {:?}, num_batch_threads {:?}",
            batching.thread_pool_name,
            batching.max_batch_size,
            batching.batch_timeout_micros,
            batching.num_batch_threads
        );
    }

    /// Servable versions of a model, highest first
    pub fn versions(&self, model: &str) -> Option<&[i64]> {
        self.models.get(model).map(|m| m.versions.as_slice())
    }

    fn load_model(entry: &ModelEntry) -> Result<ServedModel> {
        let base_path = PathBuf::from(&entry.base_path);
        let available = scan_versions(&base_path).map_err(|e| {
            ModelServerError::startup(format!(
                "Failed to list versions of model '{}' under {}: {}",
                entry.name,
                base_path.display(),
                e
            ))
        })?;
        let selection = entry
            .version_selection()
            .map_err(|e| ModelServerError::startup(e.to_string()))?;

        Ok(ServedModel {
            base_path,
            versions: selection.select(&available),
        })
    }
}

/// Numeric subdirectory names directly under `base_path`
fn scan_versions(base_path: &Path) -> std::io::Result<Vec<i64>> {
    let mut versions = Vec::new();
    for entry in std::fs::read_dir(base_path)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(version) = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<i64>().ok())
            .filter(|v| *v >= 0)
        {
            versions.push(version);
        }
    }
    Ok(versions)
}

impl ExecutionEngine for PassthroughEngine {
    fn predict(
        &self,
        options: &RunOptions,
        request: &PredictRequest,
    ) -> std::result::Result<PredictResponse, EngineStatus> {
        let spec = request
            .model_spec
            .as_ref()
            .ok_or_else(|| EngineStatus::invalid_argument("Missing ModelSpec"))?;

        let model = self.models.get(&spec.name).ok_or_else(|| {
            EngineStatus::not_found(format!("Servable not found for request: {}", spec.name))
        })?;

        let version = match spec.version {
            Some(wanted) if model.versions.contains(&wanted) => wanted,
            Some(wanted) => {
                return Err(EngineStatus::unavailable(format!(
                    "Version {} of model '{}' is not available",
                    wanted, spec.name
                )))
            }
            None => *model.versions.first().ok_or_else(|| {
                EngineStatus::unavailable(format!(
                    "No versions of model '{}' are available",
                    spec.name
                ))
            })?,
        };

        let signature = if spec.signature_name.is_empty() {
            DEFAULT_SIGNATURE_NAME
        } else {
            spec.signature_name.as_str()
        };
        if signature != DEFAULT_SIGNATURE_NAME {
            return Err(EngineStatus::invalid_argument(format!(
                "Serving signature name: \"{}\" not found in signature def",
                signature
            )));
        }

        if request.inputs.is_empty() {
            return Err(EngineStatus::invalid_argument("Request has no input tensors"));
        }

        if options.is_expired() {
            return Err(EngineStatus::deadline_exceeded(
                "Deadline exceeded before execution started",
            ));
        }

        let outputs = if request.output_filter.is_empty() {
            request.inputs.clone()
        } else {
            let mut outputs = HashMap::with_capacity(request.output_filter.len());
            for name in &request.output_filter {
                let tensor = request.inputs.get(name).ok_or_else(|| {
                    EngineStatus::invalid_argument(format!(
                        "output tensor alias not found in signature: {}",
                        name
                    ))
                })?;
                outputs.insert(name.clone(), tensor.clone());
            }
            outputs
        };

        Ok(PredictResponse {
            outputs,
            model_spec: Some(ModelSpec {
                name: spec.name.clone(),
                version: Some(version),
                signature_name: signature.to_string(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelserver_common::config::{ConfigResolver, ServerOptions};
    use modelserver_common::StatusCode;
    use modelserver_proto::TensorProto;
    use std::time::Duration;
    use tempfile::TempDir;

    fn model_dir(versions: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for v in versions {
            std::fs::create_dir(dir.path().join(v)).unwrap();
        }
        dir
    }

    fn engine_for(dir: &TempDir) -> PassthroughEngine {
        let options = ServerOptions {
            model_name: Some("echo".to_string()),
            model_base_path: dir.path().to_str().unwrap().to_string(),
            ..Default::default()
        };
        let config = ConfigResolver::resolve(&options).unwrap();
        PassthroughEngine::initialize(&config).unwrap()
    }

    fn request(name: &str, version: Option<i64>) -> PredictRequest {
        let mut inputs = HashMap::new();
        inputs.insert("x".to_string(), TensorProto::from_floats(vec![1.0, 2.0]));
        PredictRequest {
            model_spec: Some(ModelSpec {
                name: name.to_string(),
                version,
                signature_name: String::new(),
            }),
            inputs,
            output_filter: Vec::new(),
        }
    }

    #[test]
    fn test_latest_version_is_served() {
        let dir = model_dir(&["1", "3", "2", "assets"]);
        let engine = engine_for(&dir);

        assert_eq!(engine.versions("echo"), Some(&[3][..]));

        let response = engine
            .predict(&RunOptions::default(), &request("echo", None))
            .unwrap();

        let spec = response.model_spec.unwrap();
        assert_eq!(spec.version, Some(3));
        assert_eq!(spec.signature_name, DEFAULT_SIGNATURE_NAME);
        assert_eq!(response.outputs["x"].float_val, vec![1.0, 2.0]);
    }

    #[test]
    fn test_unknown_model_is_not_found() {
        let dir = model_dir(&["1"]);
        let engine = engine_for(&dir);

        let err = engine
            .predict(&RunOptions::default(), &request("missing", None))
            .unwrap_err();

        assert_eq!(err.code, StatusCode::NotFound);
    }

    #[test]
    fn test_unloaded_version_is_unavailable() {
        let dir = model_dir(&["1", "2"]);
        let engine = engine_for(&dir);

        let err = engine
            .predict(&RunOptions::default(), &request("echo", Some(1)))
            .unwrap_err();
        assert_eq!(err.code, StatusCode::Unavailable);

        let empty = model_dir(&[]);
        let engine = engine_for(&empty);
        let err = engine
            .predict(&RunOptions::default(), &request("echo", None))
            .unwrap_err();
        assert_eq!(err.code, StatusCode::Unavailable);
    }

    #[test]
    fn test_expired_budget_is_deadline_exceeded() {
        let dir = model_dir(&["1"]);
        let engine = engine_for(&dir);

        let err = engine
            .predict(
                &RunOptions::with_budget(Some(Duration::ZERO)),
                &request("echo", None),
            )
            .unwrap_err();

        assert_eq!(err.code, StatusCode::DeadlineExceeded);
    }

    #[test]
    fn test_invalid_requests() {
        let dir = model_dir(&["1"]);
        let engine = engine_for(&dir);
        let options = RunOptions::default();

        let mut no_spec = request("echo", None);
        no_spec.model_spec = None;
        assert_eq!(
            engine.predict(&options, &no_spec).unwrap_err().code,
            StatusCode::InvalidArgument
        );

        let mut bad_signature = request("echo", None);
        if let Some(spec) = bad_signature.model_spec.as_mut() {
            spec.signature_name = "classify".to_string();
        }
        assert_eq!(
            engine.predict(&options, &bad_signature).unwrap_err().code,
            StatusCode::InvalidArgument
        );

        let mut no_inputs = request("echo", None);
        no_inputs.inputs.clear();
        assert_eq!(
            engine.predict(&options, &no_inputs).unwrap_err().code,
            StatusCode::InvalidArgument
        );

        let mut bad_filter = request("echo", None);
        bad_filter.output_filter = vec!["y".to_string()];
        assert_eq!(
            engine.predict(&options, &bad_filter).unwrap_err().code,
            StatusCode::InvalidArgument
        );
    }

    #[test]
    fn test_missing_base_path_fails_startup() {
        let options = ServerOptions {
            model_base_path: "/nonexistent/model/root".to_string(),
            ..Default::default()
        };
        let config = ConfigResolver::resolve(&options).unwrap();

        let err = PassthroughEngine::initialize(&config).unwrap_err();

        assert!(matches!(err, ModelServerError::Startup(_)));
    }
}
