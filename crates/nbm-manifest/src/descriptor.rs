//! Module descriptor configuration
//!
//! [`ModuleDescriptorConfig`] holds what the user declared for one module
//! build. Values that fall back to project data (module name and
//! specification version) are computed from the [`ProjectContext`] on every
//! read, so a later change to the project is always reflected.

use crate::context::{FileResolver, ProjectContext};
use crate::errors::DescriptorError;
use crate::friend_packages::FriendPackages;
use crate::key_store::KeyStoreConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptorConfig {
    module_name: Option<String>,
    cluster: Option<String>,
    specification_version: Option<String>,
    implementation_version: Option<String>,
    eager: bool,
    autoload: bool,
    requires: Vec<String>,
    localizing_bundle: Option<String>,
    module_install: Option<String>,
    license_file: Option<PathBuf>,
    module_author: Option<String>,
    home_page: Option<String>,
    needs_restart: Option<bool>,
    layer: Option<String>,
    java_dependency: Option<String>,
    autoupdate_show_in_client: bool,
    friend_packages: FriendPackages,
    key_store: KeyStoreConfig,
}

impl Default for ModuleDescriptorConfig {
    fn default() -> Self {
        ModuleDescriptorConfig {
            module_name: None,
            cluster: None,
            specification_version: None,
            implementation_version: None,
            eager: false,
            autoload: false,
            requires: Vec::new(),
            localizing_bundle: None,
            module_install: None,
            license_file: None,
            module_author: None,
            home_page: None,
            needs_restart: None,
            layer: None,
            java_dependency: None,
            autoupdate_show_in_client: true,
            friend_packages: FriendPackages::new(),
            key_store: KeyStoreConfig::new(),
        }
    }
}

impl ModuleDescriptorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit module name, or the project name with `-` replaced by `.`
    pub fn module_name(&self, project: &ProjectContext) -> String {
        match &self.module_name {
            Some(name) => name.clone(),
            None => project.name.replace('-', "."),
        }
    }

    pub fn set_module_name(&mut self, module_name: Option<String>) {
        self.module_name = module_name;
    }

    /// Explicit specification version, or the project version
    pub fn specification_version(&self, project: &ProjectContext) -> String {
        match &self.specification_version {
            Some(version) => version.clone(),
            None => project.version_string(),
        }
    }

    pub fn set_specification_version(&mut self, specification_version: Option<String>) {
        self.specification_version = specification_version;
    }

    pub fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }

    pub fn set_cluster(&mut self, cluster: Option<String>) {
        self.cluster = cluster;
    }

    pub fn implementation_version(&self) -> Option<&str> {
        self.implementation_version.as_deref()
    }

    pub fn set_implementation_version(&mut self, implementation_version: Option<String>) {
        self.implementation_version = implementation_version;
    }

    pub fn is_eager(&self) -> bool {
        self.eager
    }

    pub fn set_eager(&mut self, eager: bool) {
        self.eager = eager;
    }

    pub fn is_autoload(&self) -> bool {
        self.autoload
    }

    pub fn set_autoload(&mut self, autoload: bool) {
        self.autoload = autoload;
    }

    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    /// Replace the whole requires list. `None` is rejected.
    pub fn set_requires(&mut self, requires: Option<Vec<String>>) -> Result<(), DescriptorError> {
        let requires = requires.ok_or_else(|| DescriptorError::invalid_argument("requires"))?;
        self.requires.clear();
        self.requires.extend(requires);
        Ok(())
    }

    /// Append one requires token; duplicates are kept
    pub fn require(&mut self, token: impl Into<String>) {
        self.requires.push(token.into());
    }

    pub fn localizing_bundle(&self) -> Option<&str> {
        self.localizing_bundle.as_deref()
    }

    pub fn set_localizing_bundle(&mut self, localizing_bundle: Option<String>) {
        self.localizing_bundle = localizing_bundle;
    }

    pub fn module_install(&self) -> Option<&str> {
        self.module_install.as_deref()
    }

    pub fn set_module_install(&mut self, module_install: Option<String>) {
        self.module_install = module_install;
    }

    pub fn license_file(&self) -> Option<&Path> {
        self.license_file.as_deref()
    }

    /// Resolve the license reference to an absolute path; `None` clears it.
    /// Resolver failures are returned unchanged and leave the field as is.
    pub fn set_license_file(
        &mut self,
        reference: Option<&Path>,
        resolver: &dyn FileResolver,
    ) -> Result<(), DescriptorError> {
        self.license_file = match reference {
            Some(path) => Some(resolver.resolve(path)?),
            None => None,
        };
        Ok(())
    }

    pub fn module_author(&self) -> Option<&str> {
        self.module_author.as_deref()
    }

    pub fn set_module_author(&mut self, module_author: Option<String>) {
        self.module_author = module_author;
    }

    pub fn home_page(&self) -> Option<&str> {
        self.home_page.as_deref()
    }

    pub fn set_home_page(&mut self, home_page: Option<String>) {
        self.home_page = home_page;
    }

    pub fn needs_restart(&self) -> Option<bool> {
        self.needs_restart
    }

    pub fn set_needs_restart(&mut self, needs_restart: Option<bool>) {
        self.needs_restart = needs_restart;
    }

    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    pub fn set_layer(&mut self, layer: Option<String>) {
        self.layer = layer;
    }

    pub fn java_dependency(&self) -> Option<&str> {
        self.java_dependency.as_deref()
    }

    pub fn set_java_dependency(&mut self, java_dependency: Option<String>) {
        self.java_dependency = java_dependency;
    }

    pub fn autoupdate_show_in_client(&self) -> bool {
        self.autoupdate_show_in_client
    }

    pub fn set_autoupdate_show_in_client(&mut self, autoupdate_show_in_client: bool) {
        self.autoupdate_show_in_client = autoupdate_show_in_client;
    }

    pub fn friend_packages(&self) -> &FriendPackages {
        &self.friend_packages
    }

    pub fn friend_packages_mut(&mut self) -> &mut FriendPackages {
        &mut self.friend_packages
    }

    /// Hand the friend package list to a configuration block
    pub fn configure_friend_packages<F>(&mut self, configure: F)
    where
        F: FnOnce(&mut FriendPackages),
    {
        configure(&mut self.friend_packages);
    }

    pub fn key_store(&self) -> &KeyStoreConfig {
        &self.key_store
    }

    pub fn key_store_mut(&mut self) -> &mut KeyStoreConfig {
        &mut self.key_store
    }

    /// Hand the key store references to a configuration block
    pub fn configure_key_store<F, T>(&mut self, configure: F) -> T
    where
        F: FnOnce(&mut KeyStoreConfig) -> T,
    {
        configure(&mut self.key_store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ResolveError;

    fn project(name: &str) -> ProjectContext {
        ProjectContext::new(name, std::env::temp_dir().join("nbm-tests")).with_version("1.2.3")
    }

    #[test]
    fn test_module_name_derived_from_project() {
        let config = ModuleDescriptorConfig::new();
        assert_eq!(config.module_name(&project("my-cool-module")), "my.cool.module");
    }

    #[test]
    fn test_module_name_explicit_wins() {
        let mut config = ModuleDescriptorConfig::new();
        config.set_module_name(Some("x.y".to_string()));
        assert_eq!(config.module_name(&project("my-cool-module")), "x.y");
        assert_eq!(config.module_name(&project("other")), "x.y");
    }

    #[test]
    fn test_module_name_follows_project_changes() {
        let config = ModuleDescriptorConfig::new();
        let mut project = project("first-name");
        assert_eq!(config.module_name(&project), "first.name");

        project.name = "second-name".to_string();
        assert_eq!(config.module_name(&project), "second.name");
    }

    #[test]
    fn test_specification_version_defaults_to_project_version() {
        let mut config = ModuleDescriptorConfig::new();
        assert_eq!(config.specification_version(&project("m")), "1.2.3");

        config.set_specification_version(Some("2.0".to_string()));
        assert_eq!(config.specification_version(&project("m")), "2.0");
    }

    #[test]
    fn test_set_requires_replaces() {
        let mut config = ModuleDescriptorConfig::new();
        assert!(config
            .set_requires(Some(vec!["a".to_string(), "b".to_string()]))
            .is_ok());
        assert!(config.set_requires(Some(vec!["c".to_string()])).is_ok());
        assert_eq!(config.requires(), ["c".to_string()]);
    }

    #[test]
    fn test_set_requires_none_is_invalid() {
        let mut config = ModuleDescriptorConfig::new();
        config.require("kept");

        let err = config.set_requires(None).err();
        assert!(matches!(
            err,
            Some(DescriptorError::InvalidArgument { ref argument }) if argument == "requires"
        ));
        assert_eq!(config.requires(), ["kept".to_string()]);
    }

    #[test]
    fn test_require_keeps_duplicates() {
        let mut config = ModuleDescriptorConfig::new();
        config.require("a");
        config.require("a");
        assert_eq!(config.requires(), ["a".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_defaults() {
        let config = ModuleDescriptorConfig::new();
        assert!(config.autoupdate_show_in_client());
        assert!(!config.is_eager());
        assert!(!config.is_autoload());
        assert_eq!(config.needs_restart(), None);
        assert!(config.friend_packages().is_empty());
        assert!(!config.key_store().is_configured());
    }

    #[test]
    fn test_autoupdate_show_in_client_can_be_disabled() {
        let mut config = ModuleDescriptorConfig::new();
        config.set_autoupdate_show_in_client(false);
        assert!(!config.autoupdate_show_in_client());
    }

    #[test]
    fn test_license_file_resolved_and_cleared() {
        let project = project("licensed");
        let mut config = ModuleDescriptorConfig::new();

        assert!(config
            .set_license_file(Some(Path::new("LICENSE.txt")), &project)
            .is_ok());
        assert_eq!(
            config.license_file(),
            Some(project.project_dir.join("LICENSE.txt").as_path())
        );

        assert!(config.set_license_file(None, &project).is_ok());
        assert!(config.license_file().is_none());
    }

    #[test]
    fn test_license_resolution_failure_propagates() {
        let failing = |reference: &Path| -> Result<PathBuf, ResolveError> {
            Err(ResolveError {
                reference: reference.display().to_string(),
                reason: "outside project".to_string(),
            })
        };
        let mut config = ModuleDescriptorConfig::new();
        let err = config
            .set_license_file(Some(Path::new("../LICENSE")), &failing)
            .err();

        assert!(matches!(
            err,
            Some(DescriptorError::Resolution(ref e)) if e.reason == "outside project"
        ));
        assert!(config.license_file().is_none());
    }

    #[test]
    fn test_configuration_blocks_mutate_in_place() {
        let mut config = ModuleDescriptorConfig::new();
        config.configure_friend_packages(|friends| {
            friends.add("org.example.api");
            friends.add_with_subpackages("org.example.spi");
        });
        config.configure_key_store(|ks| ks.set_alias(Some("release".to_string())));

        assert_eq!(config.friend_packages().len(), 2);
        assert_eq!(config.key_store().alias(), Some("release"));
    }
}
