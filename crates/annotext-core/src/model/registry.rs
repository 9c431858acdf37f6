use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{GazetteerModel, NameModel};
use crate::error::{Error, Result};

/// Settings key prefix naming a model file; the rest of the key is the model name.
pub const SETTINGS_PREFIX: &str = "annotext.model.file.";

/// Where to load models from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Directory that relative model paths resolve against.
    #[serde(default)]
    pub base_dir: PathBuf,
    /// Model name to model file path.
    #[serde(default)]
    pub models: BTreeMap<String, PathBuf>,
}

impl RegistryConfig {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            models: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.models.insert(name.into(), path.into());
        self
    }

    /// Read a JSON configuration file. A relative `base_dir` resolves
    /// against the directory holding the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&raw)?;

        if config.base_dir.is_relative() {
            let parent = path.parent().unwrap_or_else(|| Path::new(""));
            config.base_dir = parent.join(&config.base_dir);
        }

        Ok(config)
    }

    /// Collect models from flat settings, keeping only keys under [`SETTINGS_PREFIX`].
    pub fn from_settings<I, K, V>(base_dir: impl Into<PathBuf>, settings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<PathBuf>,
    {
        let mut config = Self::new(base_dir);
        for (key, value) in settings {
            if let Some(name) = key.as_ref().strip_prefix(SETTINGS_PREFIX) {
                if !name.is_empty() {
                    config.models.insert(name.to_string(), value.into());
                }
            }
        }
        config
    }

    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}

/// Loaded models by name. Populated once at startup, read-only afterwards.
#[derive(Default, Clone)]
pub struct ModelRegistry {
    models: BTreeMap<String, Arc<dyn NameModel>>,
    /// Every configured name, including models that failed to load.
    configured: BTreeSet<String>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every configured model. A model that fails to load is logged and
    /// skipped; the others still load.
    #[must_use]
    pub fn load(config: &RegistryConfig) -> Self {
        let started = Instant::now();
        let mut registry = Self::new();

        for (name, path) in &config.models {
            registry.configured.insert(name.clone());
            match load_model(name, &config.resolve(path)) {
                Ok(model) => registry.insert(name.clone(), model),
                Err(e) => tracing::error!(model = %name, "{e}"),
            }
        }

        if config.models.is_empty() {
            tracing::warn!("Did not load any models, none configured");
        } else if registry.is_empty() {
            tracing::warn!(
                "Did not load any models, all {} configured models failed",
                config.models.len()
            );
        } else {
            tracing::info!(
                "Read models in [{:?}] for {:?}",
                started.elapsed(),
                registry.known_model_names()
            );
        }

        registry
    }

    pub fn insert(&mut self, name: impl Into<String>, model: Arc<dyn NameModel>) {
        let name = name.into();
        self.configured.insert(name.clone());
        self.models.insert(name, model);
    }

    #[must_use]
    pub fn with_model(mut self, name: impl Into<String>, model: Arc<dyn NameModel>) -> Self {
        self.insert(name, model);
        self
    }

    pub fn get(&self, name: &str) -> Result<&Arc<dyn NameModel>> {
        self.models.get(name).ok_or_else(|| Error::UnknownModel {
            name: name.to_string(),
            known: self.known_model_names(),
        })
    }

    #[must_use]
    pub fn known_model_names(&self) -> BTreeSet<String> {
        self.models.keys().cloned().collect()
    }

    /// Names of every configured model, loaded or not.
    #[must_use]
    pub fn configured_model_names(&self) -> BTreeSet<String> {
        self.configured.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Load one model file, reporting any failure as [`Error::ModelLoad`].
pub fn load_model(name: &str, path: &Path) -> Result<Arc<dyn NameModel>> {
    match GazetteerModel::from_path(path) {
        Ok(model) => Ok(Arc::new(model)),
        Err(e) => Err(Error::ModelLoad {
            name: name.to_string(),
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.known_model_names())
            .field("configured", &self.configured)
            .finish()
    }
}
