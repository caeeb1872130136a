//! Configuration management module
//!
//! Built-in defaults, overlaid by an optional YAML file, overlaid by
//! `AUTOFILL__*` environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use autofill_core_types::{PageLabel, ValueBag};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::AutofillError;

const ENV_PREFIX: &str = "AUTOFILL__";
const CONFIG_FILE: &str = "autofill.yaml";

/// A key the flat walker never fills, optionally only on some pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRule {
    pub key: String,
    /// Empty means every page.
    #[serde(default)]
    pub pages: Vec<PageLabel>,
}

impl SkipRule {
    fn everywhere(key: &str) -> Self {
        Self {
            key: key.into(),
            pages: Vec::new(),
        }
    }

    fn on(key: &str, page: PageLabel) -> Self {
        Self {
            key: key.into(),
            pages: vec![page],
        }
    }

    pub fn applies(&self, key: &str, page: PageLabel) -> bool {
        self.key == key && (self.pages.is_empty() || self.pages.contains(&page))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillerConfig {
    /// Any bag key starting with this selects the flat regime.
    pub namespace_prefix: String,
    /// Keys containing one of these are matched against dropdown options.
    pub selector_markers: Vec<String>,
    /// Preferred-language key, always routed through the language table.
    pub language_field: String,
    pub skip_rules: Vec<SkipRule>,
    /// Storage key holding the value bag.
    pub storage_key: String,
    /// Key of the dependents array inside the bag.
    pub dependents_key: String,
    /// Options listed per dropdown by field detection.
    pub detect_option_preview: usize,
    pub logging: LoggingConfig,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: "atlas_".into(),
            selector_markers: vec!["country".into(), "nationality".into(), "country_code".into()],
            language_field: "adx_preferredlanguageid".into(),
            skip_rules: vec![
                SkipRule::everywhere("email"),
                SkipRule::everywhere("reemail"),
                SkipRule::on("newPassword", PageLabel::Signup),
                SkipRule::on("reenterPassword", PageLabel::Signup),
            ],
            storage_key: "visaData".into(),
            dependents_key: "dependents".into(),
            detect_option_preview: 5,
            logging: LoggingConfig::default(),
        }
    }
}

impl FillerConfig {
    /// Load using the default file lookup when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, AutofillError> {
        let path = path.map(Path::to_path_buf).or_else(default_config_path);
        load_with_options(&LoadOptions {
            path,
            include_env: true,
        })
    }

    pub fn is_flat_bag(&self, bag: &ValueBag) -> bool {
        !self.namespace_prefix.is_empty()
            && bag.keys().any(|key| key.starts_with(&self.namespace_prefix))
    }

    pub fn is_selector_key(&self, key: &str) -> bool {
        self.selector_markers
            .iter()
            .any(|marker| key.contains(marker.as_str()))
    }

    pub fn skips(&self, key: &str, page: PageLabel) -> bool {
        self.skip_rules.iter().any(|rule| rule.applies(key, page))
    }
}

#[derive(Debug, Default)]
pub struct LoadOptions {
    pub path: Option<PathBuf>,
    pub include_env: bool,
}

pub fn load_with_options(options: &LoadOptions) -> Result<FillerConfig, AutofillError> {
    let mut merged = serde_json::to_value(FillerConfig::default())
        .map_err(|err| AutofillError::Config(err.to_string()))?;

    if let Some(path) = &options.path {
        if path.exists() {
            let overlay = read_file(path)?;
            merge(&mut merged, overlay);
            debug!(path = %path.display(), "loaded autofill config file");
        }
    }

    if options.include_env {
        for (key, raw) in env::vars() {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                let segments: Vec<String> = stripped
                    .split("__")
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.to_ascii_lowercase())
                    .collect();
                if segments.is_empty() {
                    continue;
                }
                set_path(&mut merged, &segments, parse_env_value(&raw));
            }
        }
    }

    serde_json::from_value(merged).map_err(|err| AutofillError::Config(err.to_string()))
}

/// `./config/autofill.yaml`, else `<config_dir>/visa-autofill/autofill.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("config").join(CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("visa-autofill").join(CONFIG_FILE))
}

fn read_file(path: &Path) -> Result<Value, AutofillError> {
    let content = fs::read_to_string(path)
        .map_err(|err| AutofillError::Config(format!("{}: {}", path.display(), err)))?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
        .map_err(|err| AutofillError::Config(format!("{}: {}", path.display(), err)))?;
    serde_json::to_value(yaml).map_err(|err| AutofillError::Config(err.to_string()))
}

fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn set_path(root: &mut Value, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut current = root;
    for segment in parents {
        if !current.is_object() {
            *current = Value::Object(Default::default());
        }
        let Value::Object(map) = current else {
            return;
        };
        current = map
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Default::default()));
    }
    if let Value::Object(map) = current {
        map.insert(last.clone(), value);
    }
}

fn parse_env_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
        return parsed;
    }
    Value::String(raw.to_string())
}
