//! Serving configuration for ModelServer
//!
//! Operator input arrives as [`ServerOptions`] (command line flags lowered into a
//! plain struct). [`ConfigResolver::resolve`] turns it into an immutable
//! [`ServingConfiguration`]: either from a multi-model descriptor file, which is
//! authoritative, or from the single-model flags. Descriptor and batching
//! parameter files are YAML documents (JSON is accepted as well).

use crate::error::{ModelServerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Model name used when `--model_name` is not given
pub const DEFAULT_MODEL_NAME: &str = "default";

/// Thread pool name installed when batching is enabled without a parameters file
pub const DEFAULT_BATCH_THREAD_POOL_NAME: &str = "model_server_batch_threads";

/// Default gRPC port
pub const DEFAULT_PORT: u16 = 8500;

/// Default interval between storage polls for new versions
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;

/// Raw operator input, before any validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// gRPC port to listen on
    pub port: u16,

    /// Multi-model descriptor; empty means single-model mode
    pub model_config_file: String,

    /// Single-model name override
    pub model_name: Option<String>,

    /// Single-model base path
    pub model_base_path: String,

    /// Enable request batching
    pub enable_batching: bool,

    /// Batching parameters file; empty means engine defaults
    pub batching_parameters_file: String,

    /// Seconds between storage polls for new model versions
    pub file_system_poll_wait_seconds: u64,

    /// Engine session parallelism (0 = auto-configured)
    pub session_parallelism: u64,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_config_file: String::new(),
            model_name: None,
            model_base_path: String::new(),
            enable_batching: false,
            batching_parameters_file: String::new(),
            file_system_poll_wait_seconds: DEFAULT_POLL_INTERVAL_SECS,
            session_parallelism: 0,
        }
    }
}

/// Resolved configuration, built once at startup and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingConfiguration {
    /// Models to serve, in descriptor order
    pub models: Vec<ModelEntry>,

    /// Present only when batching is enabled
    pub batching: Option<BatchingParameters>,

    /// Policy the version manager uses to move between versions
    pub version_policy: AspiredVersionPolicy,

    /// Seconds between storage polls for new model versions
    pub poll_interval_seconds: u64,

    /// Forwarded to the engine's thread pool sizing
    pub session_parallelism: u64,
}

impl ServingConfiguration {
    /// Look up a configured model by name
    pub fn model(&self, name: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.name == name)
    }
}

/// One model to serve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    /// Unique model name
    pub name: String,

    /// Model root; version subdirectories live beneath it
    pub base_path: String,

    /// Execution platform
    #[serde(default, rename = "model_platform")]
    pub platform: ModelPlatform,

    /// Which on-disk versions are servable
    #[serde(default, rename = "model_version_policy", skip_serializing_if = "Option::is_none")]
    pub version_policy: Option<VersionPolicySpec>,
}

impl ModelEntry {
    /// Versions selection for this model, falling back to the latest version
    pub fn version_selection(&self) -> Result<VersionSelection> {
        match &self.version_policy {
            Some(spec) => spec.selection(),
            None => Ok(VersionSelection::default()),
        }
    }
}

/// Execution platforms understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelPlatform {
    #[default]
    Tensorflow,
}

/// Descriptor form of a version policy; at most one arm may be set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionPolicySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<LatestVersions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<AllVersions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific: Option<SpecificVersions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatestVersions {
    #[serde(default = "default_num_versions")]
    pub num_versions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllVersions {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecificVersions {
    pub versions: Vec<i64>,
}

impl VersionPolicySpec {
    /// Convert the descriptor form into a selection
    pub fn selection(&self) -> Result<VersionSelection> {
        match (&self.latest, &self.all, &self.specific) {
            (None, None, None) => Ok(VersionSelection::default()),
            (Some(latest), None, None) => {
                if latest.num_versions == 0 {
                    return Err(ModelServerError::config(
                        "model_version_policy.latest.num_versions must be positive",
                    ));
                }
                Ok(VersionSelection::Latest(latest.num_versions))
            }
            (None, Some(_), None) => Ok(VersionSelection::All),
            (None, None, Some(specific)) => {
                if specific.versions.is_empty() {
                    return Err(ModelServerError::config(
                        "model_version_policy.specific.versions must not be empty",
                    ));
                }
                Ok(VersionSelection::Specific(specific.versions.clone()))
            }
            _ => Err(ModelServerError::config(
                "model_version_policy may set only one of latest, all, specific",
            )),
        }
    }
}

/// Which on-disk versions of a model are servable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelection {
    /// The N highest version numbers
    Latest(u32),

    /// Every version found
    All,

    /// Exactly the listed versions, when present
    Specific(Vec<i64>),
}

impl Default for VersionSelection {
    fn default() -> Self {
        VersionSelection::Latest(default_num_versions())
    }
}

impl VersionSelection {
    /// Pick servable versions out of those available, highest first
    pub fn select(&self, available: &[i64]) -> Vec<i64> {
        let mut versions = available.to_vec();
        versions.sort_unstable_by(|a, b| b.cmp(a));
        versions.dedup();

        match self {
            VersionSelection::Latest(n) => {
                versions.truncate(*n as usize);
                versions
            }
            VersionSelection::All => versions,
            VersionSelection::Specific(wanted) => {
                versions.retain(|v| wanted.contains(v));
                versions
            }
        }
    }
}

/// Policy the external version manager follows when swapping versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspiredVersionPolicy {
    /// Load the new version before unloading the old one
    #[default]
    AvailabilityPreserving,

    /// Unload the old version before loading the new one
    ResourcePreserving,
}

/// Batching parameters handed to the engine's batching layer.
///
/// Unset fields keep the engine's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchingParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_pool_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_batch_size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_timeout_micros: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_enqueued_batches: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_batch_threads: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_batch_sizes: Vec<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad_variable_length_inputs: Option<bool>,
}

impl BatchingParameters {
    /// Parameters used when batching is enabled without a file
    pub fn with_default_thread_pool() -> Self {
        Self {
            thread_pool_name: Some(DEFAULT_BATCH_THREAD_POOL_NAME.to_string()),
            ..Default::default()
        }
    }
}

/// Multi-model descriptor file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelServerConfig {
    pub model_config_list: Vec<ModelEntry>,
}

impl ModelServerConfig {
    /// Build a descriptor with one entry per subdirectory of `servables_dir`.
    ///
    /// Each entry is named after its directory. Only directories whose name
    /// contains `filter` are kept when one is given. Directories named like a
    /// version (all digits) are skipped. Entries are sorted by name.
    pub fn from_servables_dir(servables_dir: &Path, filter: Option<&str>) -> Result<Self> {
        let listing = std::fs::read_dir(servables_dir).map_err(|e| {
            ModelServerError::config(format!(
                "Failed to list servables directory {}: {}",
                servables_dir.display(),
                e
            ))
        })?;

        let mut entries = Vec::new();
        for dirent in listing {
            let dirent = dirent?;
            if !dirent.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = dirent.file_name().to_str().map(str::to_string) else {
                debug!("Skipping non UTF-8 servable directory {:?}", dirent.path());
                continue;
            };
            if filter.is_some_and(|f| !name.contains(f)) {
                continue;
            }
            let base_path = dirent.path().to_string_lossy().into_owned();
            if ends_with_version(&base_path) {
                debug!("Skipping version directory {}", base_path);
                continue;
            }
            entries.push(ModelEntry {
                name,
                base_path,
                platform: ModelPlatform::Tensorflow,
                version_policy: None,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        info!(
            "Found {} servable(s) under {}",
            entries.len(),
            servables_dir.display()
        );
        Ok(Self {
            model_config_list: entries,
        })
    }

    /// Render as a descriptor file that `--model_config_file` accepts
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ModelServerError::config(format!("Failed to render model config: {}", e)))
    }
}

fn default_num_versions() -> u32 {
    1
}

/// Builds a [`ServingConfiguration`] from operator input
pub struct ConfigResolver;

impl ConfigResolver {
    /// Resolve and validate operator input.
    ///
    /// Reads at most the descriptor and the batching parameters file. Nothing
    /// else is touched, so a failure leaves no partial state behind.
    pub fn resolve(options: &ServerOptions) -> Result<ServingConfiguration> {
        let batching = Self::resolve_batching(options)?;
        let models = Self::resolve_models(options)?;

        info!(
            "Resolved serving configuration: {} model(s), batching={}",
            models.len(),
            batching.is_some()
        );

        Ok(ServingConfiguration {
            models,
            batching,
            version_policy: AspiredVersionPolicy::default(),
            poll_interval_seconds: options.file_system_poll_wait_seconds,
            session_parallelism: options.session_parallelism,
        })
    }

    fn resolve_models(options: &ServerOptions) -> Result<Vec<ModelEntry>> {
        let models = if !options.model_config_file.is_empty() {
            if options.model_name.is_some() || !options.model_base_path.is_empty() {
                debug!("--model_config_file is set, ignoring --model_name and --model_base_path");
            }
            load_yaml::<ModelServerConfig>(Path::new(&options.model_config_file), "model config")?
                .model_config_list
        } else {
            if options.model_base_path.is_empty() {
                return Err(ModelServerError::config(
                    "either --model_config_file or --model_base_path must be specified",
                ));
            }
            vec![ModelEntry {
                name: options
                    .model_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
                base_path: options.model_base_path.clone(),
                platform: ModelPlatform::Tensorflow,
                version_policy: None,
            }]
        };

        validate_models(&models)?;
        Ok(models)
    }

    fn resolve_batching(options: &ServerOptions) -> Result<Option<BatchingParameters>> {
        if !options.enable_batching {
            if !options.batching_parameters_file.is_empty() {
                return Err(ModelServerError::config(
                    "--batching_parameters_file requires --enable_batching",
                ));
            }
            return Ok(None);
        }

        if options.batching_parameters_file.is_empty() {
            return Ok(Some(BatchingParameters::with_default_thread_pool()));
        }

        let params = load_yaml::<BatchingParameters>(
            Path::new(&options.batching_parameters_file),
            "batching parameters",
        )?;
        Ok(Some(params))
    }
}

fn validate_models(models: &[ModelEntry]) -> Result<()> {
    if models.is_empty() {
        return Err(ModelServerError::config("model config lists no models"));
    }

    let mut seen = HashSet::new();
    for model in models {
        if model.name.is_empty() {
            return Err(ModelServerError::config("model name must not be empty"));
        }
        if model.base_path.is_empty() {
            return Err(ModelServerError::config(format!(
                "model '{}' has an empty base_path",
                model.name
            )));
        }
        if ends_with_version(&model.base_path) {
            return Err(ModelServerError::config(format!(
                "base_path '{}' of model '{}' must be the model root, not a version directory",
                model.base_path, model.name
            )));
        }
        if !seen.insert(model.name.as_str()) {
            return Err(ModelServerError::config(format!(
                "model '{}' is configured more than once",
                model.name
            )));
        }
        model.version_selection()?;
    }

    Ok(())
}

/// True when the last path segment is a bare version number
fn ends_with_version(base_path: &str) -> bool {
    PathBuf::from(base_path)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ModelServerError::config(format!(
            "Failed to read {} file {}: {}",
            what,
            path.display(),
            e
        ))
    })?;

    serde_yaml::from_str(&content).map_err(|e| {
        ModelServerError::config(format!(
            "Failed to parse {} file {}: {}",
            what,
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn path_of(file: &NamedTempFile) -> String {
        file.path().to_str().unwrap().to_string()
    }

    const TWO_MODELS: &str = "\
model_config_list:
  - name: alpha
    base_path: /data/alpha
    model_platform: tensorflow
  - name: beta
    base_path: /data/beta
";

    #[test]
    fn test_descriptor_with_two_models() {
        let descriptor = write_file(TWO_MODELS);
        let options = ServerOptions {
            model_config_file: path_of(&descriptor),
            ..Default::default()
        };

        let config = ConfigResolver::resolve(&options).unwrap();

        let names: Vec<_> = config.models.iter().map(|m| m.name.as_str()).collect();
        let paths: Vec<_> = config.models.iter().map(|m| m.base_path.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(paths, vec!["/data/alpha", "/data/beta"]);
        assert!(config.batching.is_none());
        assert_eq!(config.poll_interval_seconds, 1);
        assert_eq!(config.version_policy, AspiredVersionPolicy::AvailabilityPreserving);
    }

    #[test]
    fn test_descriptor_ignores_single_model_flags() {
        let descriptor = write_file(TWO_MODELS);
        let alone = ServerOptions {
            model_config_file: path_of(&descriptor),
            ..Default::default()
        };
        let with_flags = ServerOptions {
            model_name: Some("ignored".to_string()),
            model_base_path: "/data/ignored".to_string(),
            ..alone.clone()
        };

        let expected = ConfigResolver::resolve(&alone).unwrap();
        let actual = ConfigResolver::resolve(&with_flags).unwrap();

        assert_eq!(actual.models, expected.models);
    }

    #[test]
    fn test_single_model_defaults_name() {
        let options = ServerOptions {
            model_base_path: "/data/m".to_string(),
            ..Default::default()
        };

        let config = ConfigResolver::resolve(&options).unwrap();

        assert_eq!(config.models.len(), 1);
        assert_eq!(config.models[0].name, "default");
        assert_eq!(config.models[0].base_path, "/data/m");
        assert_eq!(config.models[0].platform, ModelPlatform::Tensorflow);
    }

    #[test]
    fn test_single_model_name_override() {
        let options = ServerOptions {
            model_name: Some("mnist".to_string()),
            model_base_path: "/data/mnist".to_string(),
            ..Default::default()
        };

        let config = ConfigResolver::resolve(&options).unwrap();

        assert_eq!(config.models[0].name, "mnist");
        assert!(config.model("mnist").is_some());
    }

    #[test]
    fn test_missing_model_source_fails() {
        let err = ConfigResolver::resolve(&ServerOptions::default()).unwrap_err();

        assert!(matches!(err, ModelServerError::Configuration(_)));
    }

    #[test]
    fn test_unreadable_descriptor_fails() {
        let options = ServerOptions {
            model_config_file: "/nonexistent/models.yaml".to_string(),
            model_base_path: "/data/m".to_string(),
            ..Default::default()
        };

        let err = ConfigResolver::resolve(&options).unwrap_err();

        assert!(matches!(err, ModelServerError::Configuration(_)));
    }

    #[test]
    fn test_malformed_descriptor_fails() {
        let descriptor = write_file("model_config_list:\n  - name: alpha\n    base_paht: /x\n");
        let options = ServerOptions {
            model_config_file: path_of(&descriptor),
            ..Default::default()
        };

        assert!(ConfigResolver::resolve(&options).is_err());
    }

    #[test]
    fn test_empty_descriptor_list_fails() {
        let descriptor = write_file("model_config_list: []\n");
        let options = ServerOptions {
            model_config_file: path_of(&descriptor),
            ..Default::default()
        };

        assert!(ConfigResolver::resolve(&options).is_err());
    }

    #[test]
    fn test_duplicate_model_names_fail() {
        let descriptor = write_file(
            "model_config_list:\n  - {name: a, base_path: /x}\n  - {name: a, base_path: /y}\n",
        );
        let options = ServerOptions {
            model_config_file: path_of(&descriptor),
            ..Default::default()
        };

        assert!(ConfigResolver::resolve(&options).is_err());
    }

    #[test]
    fn test_versioned_base_path_fails() {
        let options = ServerOptions {
            model_base_path: "/data/m/3".to_string(),
            ..Default::default()
        };

        assert!(ConfigResolver::resolve(&options).is_err());
    }

    #[test]
    fn test_batching_enabled_without_file() {
        let options = ServerOptions {
            model_base_path: "/data/m".to_string(),
            enable_batching: true,
            ..Default::default()
        };

        let config = ConfigResolver::resolve(&options).unwrap();

        assert_eq!(
            config.batching,
            Some(BatchingParameters {
                thread_pool_name: Some(DEFAULT_BATCH_THREAD_POOL_NAME.to_string()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_batching_file_is_authoritative_and_stable() {
        let params = write_file(
            "max_batch_size: 32\nbatch_timeout_micros: 500\nnum_batch_threads: 4\nallowed_batch_sizes: [8, 16, 32]\n",
        );
        let options = ServerOptions {
            model_base_path: "/data/m".to_string(),
            enable_batching: true,
            batching_parameters_file: path_of(&params),
            ..Default::default()
        };

        let first = ConfigResolver::resolve(&options).unwrap();
        let second = ConfigResolver::resolve(&options).unwrap();
        let batching = first.batching.clone().unwrap();

        assert_eq!(first, second);
        assert_eq!(batching.max_batch_size, Some(32));
        assert_eq!(batching.batch_timeout_micros, Some(500));
        assert_eq!(batching.allowed_batch_sizes, vec![8, 16, 32]);
        assert_eq!(batching.thread_pool_name, None);
    }

    #[test]
    fn test_batching_file_without_batching_fails() {
        let valid = write_file("max_batch_size: 32\n");
        for file in [path_of(&valid), "/nonexistent/batching.yaml".to_string()] {
            let options = ServerOptions {
                model_base_path: "/data/m".to_string(),
                batching_parameters_file: file,
                ..Default::default()
            };

            let err = ConfigResolver::resolve(&options).unwrap_err();
            assert!(matches!(err, ModelServerError::Configuration(_)));
        }
    }

    #[test]
    fn test_unknown_batching_field_fails() {
        let params = write_file("max_batch_size: 32\nbatch_window: 7\n");
        let options = ServerOptions {
            model_base_path: "/data/m".to_string(),
            enable_batching: true,
            batching_parameters_file: path_of(&params),
            ..Default::default()
        };

        assert!(ConfigResolver::resolve(&options).is_err());
    }

    #[test]
    fn test_version_policy_override() {
        let descriptor = write_file(
            "\
model_config_list:
  - name: alpha
    base_path: /data/alpha
    model_version_policy:
      specific:
        versions: [1, 3]
  - name: beta
    base_path: /data/beta
    model_version_policy:
      all: {}
",
        );
        let options = ServerOptions {
            model_config_file: path_of(&descriptor),
            ..Default::default()
        };

        let config = ConfigResolver::resolve(&options).unwrap();

        assert_eq!(
            config.models[0].version_selection().unwrap(),
            VersionSelection::Specific(vec![1, 3])
        );
        assert_eq!(config.models[1].version_selection().unwrap(), VersionSelection::All);
    }

    #[test]
    fn test_conflicting_version_policy_fails() {
        let descriptor = write_file(
            "model_config_list:\n  - name: a\n    base_path: /x\n    model_version_policy: {all: {}, latest: {num_versions: 2}}\n",
        );
        let options = ServerOptions {
            model_config_file: path_of(&descriptor),
            ..Default::default()
        };

        assert!(ConfigResolver::resolve(&options).is_err());
    }

    #[test]
    fn test_shipped_config_files_parse() {
        let configs = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs");
        let options = ServerOptions {
            model_config_file: format!("{}/models.yaml", configs),
            enable_batching: true,
            batching_parameters_file: format!("{}/batching.yaml", configs),
            ..Default::default()
        };

        let config = ConfigResolver::resolve(&options).unwrap();

        assert_eq!(config.models.len(), 2);
        assert_eq!(
            config.models[1].version_selection().unwrap(),
            VersionSelection::Latest(2)
        );
        assert_eq!(config.batching.unwrap().max_batch_size, Some(128));
    }

    #[test]
    fn test_version_selection() {
        let available = [1, 5, 3, 2];

        assert_eq!(VersionSelection::default().select(&available), vec![5]);
        assert_eq!(VersionSelection::Latest(2).select(&available), vec![5, 3]);
        assert_eq!(VersionSelection::All.select(&available), vec![5, 3, 2, 1]);
        assert_eq!(
            VersionSelection::Specific(vec![2, 9]).select(&available),
            vec![2]
        );
    }
    #[test]
    fn test_descriptor_from_servables_dir() {
        let root = tempfile::TempDir::new().unwrap();
        for dir in ["nuclear_b", "nuclear_a", "other", "7"] {
            std::fs::create_dir(root.path().join(dir)).unwrap();
        }
        std::fs::write(root.path().join("nuclear_notes.txt"), "x").unwrap();

        let all = ModelServerConfig::from_servables_dir(root.path(), None).unwrap();
        let names: Vec<_> = all.model_config_list.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["nuclear_a", "nuclear_b", "other"]);

        let filtered = ModelServerConfig::from_servables_dir(root.path(), Some("nuclear")).unwrap();
        assert_eq!(filtered.model_config_list.len(), 2);
        let first = &filtered.model_config_list[0];
        assert_eq!(first.platform, ModelPlatform::Tensorflow);
        assert_eq!(
            PathBuf::from(&first.base_path),
            root.path().join("nuclear_a")
        );

        // The rendered descriptor resolves like a hand-written one
        let descriptor = write_file(&filtered.to_yaml().unwrap());
        let config = ConfigResolver::resolve(&ServerOptions {
            model_config_file: descriptor.path().to_str().unwrap().to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.models, filtered.model_config_list);
    }

    #[test]
    fn test_descriptor_from_missing_dir_fails() {
        let err = ModelServerConfig::from_servables_dir(Path::new("/nonexistent/servables"), None)
            .unwrap_err();
        assert!(matches!(err, ModelServerError::Configuration(_)));
    }
}
