//! `nbm.toml` descriptor settings
//!
//! ```toml
//! [module]
//! name = "org.example.core"
//! requires = ["org.openide.modules.os.Unix"]
//! license-file = "LICENSE"
//!
//! [friend-packages]
//! packages = ["org.example.api"]
//! packages-with-subpackages = ["org.example.spi"]
//!
//! [key-store]
//! file = "keystore.jks"
//! alias = "release"
//! password-env = "NBM_KEYSTORE_PASSWORD"
//!
//! [manifest]
//! X-Vendor = "Example"
//! ```

use nbm_manifest::{CustomManifestEntries, DescriptorError, FileResolver, ModuleDescriptorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const SETTINGS_FILE_NAME: &str = "nbm.toml";
pub const SETTINGS_ENV_VAR: &str = "NBM_SETTINGS";

/// Errors that can occur while loading or applying settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Environment variable '{0}' named by key-store.password-env is not set")]
    MissingPasswordEnv(String),

    #[error("Manifest entry '{key}' cannot be represented: {reason}")]
    InvalidEntry { key: String, reason: String },

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DescriptorSettings {
    #[serde(default)]
    pub module: ModuleSettings,
    #[serde(default)]
    pub friend_packages: FriendPackageSettings,
    #[serde(default)]
    pub key_store: KeyStoreSettings,
    /// Custom entries copied into the descriptor with final precedence
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub manifest: toml::Table,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModuleSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eager: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoload: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localizing_bundle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_install: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_restart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_dependency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoupdate_show_in_client: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FriendPackageSettings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages_with_subpackages: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct KeyStoreSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Name of an environment variable holding the password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,
}

impl std::fmt::Debug for KeyStoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStoreSettings")
            .field("file", &self.file)
            .field("alias", &self.alias)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_env", &self.password_env)
            .finish()
    }
}

impl DescriptorSettings {
    /// Settings file location: an explicit path, then `NBM_SETTINGS`, then
    /// `nbm.toml` in the project directory.
    pub fn path(project_dir: &Path, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(env_path) = std::env::var(SETTINGS_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        project_dir.join(SETTINGS_FILE_NAME)
    }

    /// Load settings, returning empty settings if the file doesn't exist
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(DescriptorSettings::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Copy every configured value onto `config`. Unset settings leave the
    /// config untouched so defaults keep applying. On error `config` is left
    /// exactly as it was.
    pub fn apply(
        &self,
        config: &mut ModuleDescriptorConfig,
        resolver: &dyn FileResolver,
    ) -> Result<(), SettingsError> {
        let password = self.key_store_password()?;
        let module = &self.module;
        let mut staged = config.clone();

        if module.name.is_some() {
            staged.set_module_name(module.name.clone());
        }
        if module.cluster.is_some() {
            staged.set_cluster(module.cluster.clone());
        }
        if module.specification_version.is_some() {
            staged.set_specification_version(module.specification_version.clone());
        }
        if module.implementation_version.is_some() {
            staged.set_implementation_version(module.implementation_version.clone());
        }
        if let Some(eager) = module.eager {
            staged.set_eager(eager);
        }
        if let Some(autoload) = module.autoload {
            staged.set_autoload(autoload);
        }
        if module.requires.is_some() {
            staged.set_requires(module.requires.clone())?;
        }
        if module.localizing_bundle.is_some() {
            staged.set_localizing_bundle(module.localizing_bundle.clone());
        }
        if module.module_install.is_some() {
            staged.set_module_install(module.module_install.clone());
        }
        if let Some(license) = &module.license_file {
            staged.set_license_file(Some(license.as_path()), resolver)?;
        }
        if module.author.is_some() {
            staged.set_module_author(module.author.clone());
        }
        if module.home_page.is_some() {
            staged.set_home_page(module.home_page.clone());
        }
        if module.needs_restart.is_some() {
            staged.set_needs_restart(module.needs_restart);
        }
        if module.layer.is_some() {
            staged.set_layer(module.layer.clone());
        }
        if module.java_dependency.is_some() {
            staged.set_java_dependency(module.java_dependency.clone());
        }
        if let Some(show) = module.autoupdate_show_in_client {
            staged.set_autoupdate_show_in_client(show);
        }

        staged.configure_friend_packages(|friends| {
            for package in &self.friend_packages.packages {
                friends.add(package.as_str());
            }
            for package in &self.friend_packages.packages_with_subpackages {
                friends.add_with_subpackages(package.as_str());
            }
        });

        let key_store = &self.key_store;
        staged.configure_key_store(|ks| -> Result<(), SettingsError> {
            if let Some(file) = &key_store.file {
                ks.set_key_store_file(Some(file.as_path()), resolver)?;
            }
            if key_store.alias.is_some() {
                ks.set_alias(key_store.alias.clone());
            }
            if password.is_some() {
                ks.set_password(password);
            }
            Ok(())
        })?;

        *config = staged;
        debug!("Applied descriptor settings");
        Ok(())
    }

    fn key_store_password(&self) -> Result<Option<String>, SettingsError> {
        if let Some(password) = &self.key_store.password {
            return Ok(Some(password.clone()));
        }
        match &self.key_store.password_env {
            Some(var) => std::env::var(var)
                .map(Some)
                .map_err(|_| SettingsError::MissingPasswordEnv(var.clone())),
            None => Ok(None),
        }
    }

    /// Custom descriptor entries from the `[manifest]` table
    pub fn custom_entries(&self) -> Result<CustomManifestEntries, SettingsError> {
        let mut custom = CustomManifestEntries::new();
        for (key, value) in &self.manifest {
            custom.entry(key.as_str(), toml_to_json(key, value)?);
        }
        Ok(custom)
    }
}

fn toml_to_json(key: &str, value: &toml::Value) -> Result<serde_json::Value, SettingsError> {
    use serde_json::Value as Json;

    Ok(match value {
        toml::Value::String(s) => Json::String(s.clone()),
        toml::Value::Integer(i) => Json::from(*i),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .ok_or_else(|| SettingsError::InvalidEntry {
                key: key.to_string(),
                reason: format!("non-finite number {}", f),
            })?,
        toml::Value::Boolean(b) => Json::Bool(*b),
        toml::Value::Datetime(dt) => Json::String(dt.to_string()),
        toml::Value::Array(items) => Json::Array(
            items
                .iter()
                .map(|item| toml_to_json(key, item))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        toml::Value::Table(table) => {
            let mut object = serde_json::Map::new();
            for (k, v) in table {
                object.insert(k.clone(), toml_to_json(key, v)?);
            }
            Json::Object(object)
        }
    })
}
