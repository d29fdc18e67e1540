//! Descriptor assembly
//!
//! Turns a [`ModuleDescriptorConfig`] plus user custom entries into the
//! final [`NbmManifest`]:
//!
//! 1. effective values are computed (project fallbacks applied)
//! 2. required fields are validated
//! 3. present fields are written under their reserved keys
//! 4. custom entries are laid on top and win on every key
//! 5. the module name and specification version must still be non-empty
//!
//! Nothing is returned unless every step succeeds.

use crate::context::ProjectContext;
use crate::custom_entries::{stringify, CustomManifestEntries};
use crate::descriptor::ModuleDescriptorConfig;
use crate::encoding::ListEncoding;
use crate::errors::DescriptorError;
use crate::keys;
use crate::manifest::NbmManifest;
use tracing::{debug, info, warn};

const BUILD_VERSION_FORMAT: &str = "%Y%m%d%H%M";

#[derive(Debug, Clone, Default)]
pub struct DescriptorAssembler {
    encoding: ListEncoding,
}

impl DescriptorAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(encoding: ListEncoding) -> Self {
        DescriptorAssembler { encoding }
    }

    pub fn encoding(&self) -> &ListEncoding {
        &self.encoding
    }

    pub fn assemble(
        &self,
        config: &ModuleDescriptorConfig,
        custom: &CustomManifestEntries,
        project: &ProjectContext,
    ) -> Result<NbmManifest, DescriptorError> {
        let module_name = config.module_name(project);
        validate_module_name(&module_name)?;

        let specification_version = config.specification_version(project);
        if specification_version.trim().is_empty() {
            return Err(DescriptorError::missing_field("specificationVersion"));
        }
        debug!(
            "Effective module identity: {} {}",
            module_name, specification_version
        );

        let mut manifest = NbmManifest::new();
        manifest.put(keys::MANIFEST_VERSION, keys::MANIFEST_VERSION_VALUE);
        manifest.put(keys::MODULE_NAME, module_name);
        manifest.put(keys::SPECIFICATION_VERSION, specification_version);

        put_optional(&mut manifest, keys::IMPLEMENTATION_VERSION, config.implementation_version());
        if let Some(timestamp) = project.build_timestamp {
            manifest.put(
                keys::BUILD_VERSION,
                timestamp.format(BUILD_VERSION_FORMAT).to_string(),
            );
        }
        put_optional(&mut manifest, keys::CLUSTER, config.cluster());

        if let Some(requires) = self.encoding.join(config.requires()) {
            manifest.put(keys::REQUIRES, requires);
        }
        if let Some(packages) = self.encoding.join(&config.friend_packages().patterns()) {
            manifest.put(keys::PUBLIC_PACKAGES, packages);
        }

        put_optional(&mut manifest, keys::LOCALIZING_BUNDLE, config.localizing_bundle());
        put_optional(&mut manifest, keys::MODULE_INSTALL, config.module_install());
        if let Some(license) = config.license_file() {
            manifest.put(keys::LICENSE_FILE, license.display().to_string());
        }
        put_optional(&mut manifest, keys::MODULE_AUTHOR, config.module_author());
        put_optional(&mut manifest, keys::HOME_PAGE, config.home_page());
        if let Some(needs_restart) = config.needs_restart() {
            manifest.put(keys::NEEDS_RESTART, needs_restart.to_string());
        }
        put_optional(&mut manifest, keys::LAYER, config.layer());
        put_optional(&mut manifest, keys::JAVA_DEPENDENCIES, config.java_dependency());
        if config.is_eager() {
            manifest.put(keys::EAGER, "true");
        }
        if config.is_autoload() {
            manifest.put(keys::AUTOLOAD, "true");
        }
        manifest.put(
            keys::AUTOUPDATE_SHOW_IN_CLIENT,
            config.autoupdate_show_in_client().to_string(),
        );

        for (key, value) in custom.iter() {
            let value = stringify(key, value, &self.encoding)?;
            if manifest.contains_key(key) {
                warn!("Custom manifest entry '{}' overrides computed value", key);
            }
            manifest.put(key, value);
        }

        for (key, field) in [
            (keys::MODULE_NAME, "moduleName"),
            (keys::SPECIFICATION_VERSION, "specificationVersion"),
        ] {
            if manifest.get(key).map_or(true, |v| v.trim().is_empty()) {
                return Err(DescriptorError::missing_field(field));
            }
        }

        info!(
            "Assembled descriptor for {} with {} entries",
            manifest.get(keys::MODULE_NAME).unwrap_or_default(),
            manifest.len()
        );
        Ok(manifest)
    }
}

/// Assemble with the default list encoding
pub fn assemble(
    config: &ModuleDescriptorConfig,
    custom: &CustomManifestEntries,
    project: &ProjectContext,
) -> Result<NbmManifest, DescriptorError> {
    DescriptorAssembler::new().assemble(config, custom, project)
}

fn put_optional(manifest: &mut NbmManifest, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        manifest.put(key, value);
    }
}

/// A code name base is dot-separated non-empty tokens, optionally followed
/// by `/<major release>`.
pub fn validate_module_name(module_name: &str) -> Result<(), DescriptorError> {
    if module_name.trim().is_empty() {
        return Err(DescriptorError::missing_field("moduleName"));
    }

    let (base, release) = match module_name.split_once('/') {
        Some((base, release)) => (base, Some(release)),
        None => (module_name, None),
    };

    if base.split('.').all(str::is_empty) {
        return Err(DescriptorError::missing_field("moduleName"));
    }

    let tokens_ok = base
        .split('.')
        .all(|token| !token.is_empty() && !token.chars().any(char::is_whitespace));
    let release_ok = release
        .map_or(true, |r| !r.is_empty() && r.chars().all(|c| c.is_ascii_digit()));

    if tokens_ok && release_ok {
        Ok(())
    } else {
        Err(DescriptorError::InvalidModuleName(module_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::Path;

    fn project() -> ProjectContext {
        ProjectContext::new("my-cool-module", std::env::temp_dir().join("my-cool-module"))
            .with_version("1.0.0")
    }

    #[test]
    fn test_minimal_descriptor() {
        let manifest = assemble(
            &ModuleDescriptorConfig::new(),
            &CustomManifestEntries::new(),
            &project(),
        );
        let Ok(manifest) = manifest else {
            panic!("minimal descriptor should assemble");
        };

        assert_eq!(manifest.get(keys::MODULE_NAME), Some("my.cool.module"));
        assert_eq!(manifest.get(keys::SPECIFICATION_VERSION), Some("1.0.0"));
        assert_eq!(manifest.get(keys::AUTOUPDATE_SHOW_IN_CLIENT), Some("true"));
        assert_eq!(manifest.get(keys::MANIFEST_VERSION), Some("1.0"));
        for absent in [
            keys::IMPLEMENTATION_VERSION,
            keys::CLUSTER,
            keys::REQUIRES,
            keys::PUBLIC_PACKAGES,
            keys::LICENSE_FILE,
            keys::NEEDS_RESTART,
            keys::EAGER,
            keys::AUTOLOAD,
            keys::BUILD_VERSION,
        ] {
            assert!(!manifest.contains_key(absent), "{} should be omitted", absent);
        }
    }

    #[test]
    fn test_full_descriptor() {
        let project = project().with_build_timestamp(
            Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
                .single()
                .unwrap_or_default(),
        );
        let mut config = ModuleDescriptorConfig::new();
        config.set_cluster(Some("extra".to_string()));
        config.set_implementation_version(Some("42".to_string()));
        config.require("org.openide.windows.WindowManager");
        config.require("cap.storage");
        config.configure_friend_packages(|friends| {
            friends.add("org.example.api");
            friends.add_with_subpackages("org.example.spi");
        });
        config.set_localizing_bundle(Some("org/example/Bundle.properties".to_string()));
        config.set_module_install(Some("org.example.Installer".to_string()));
        assert!(config
            .set_license_file(Some(Path::new("LICENSE")), &project)
            .is_ok());
        config.set_module_author(Some("Jane Doe".to_string()));
        config.set_home_page(Some("https://example.org".to_string()));
        config.set_needs_restart(Some(false));
        config.set_layer(Some("org/example/layer.xml".to_string()));
        config.set_java_dependency(Some("Java > 1.8".to_string()));
        config.set_eager(true);
        config.set_autoload(true);

        let Ok(manifest) = assemble(&config, &CustomManifestEntries::new(), &project) else {
            panic!("full descriptor should assemble");
        };

        assert_eq!(
            manifest.get(keys::REQUIRES),
            Some("org.openide.windows.WindowManager, cap.storage")
        );
        assert_eq!(
            manifest.get(keys::PUBLIC_PACKAGES),
            Some("org.example.api.*, org.example.spi.**")
        );
        assert_eq!(manifest.get(keys::BUILD_VERSION), Some("202403091405"));
        assert_eq!(manifest.get(keys::NEEDS_RESTART), Some("false"));
        assert_eq!(manifest.get(keys::EAGER), Some("true"));
        assert_eq!(manifest.get(keys::AUTOLOAD), Some("true"));
        assert_eq!(manifest.get(keys::CLUSTER), Some("extra"));
        assert_eq!(
            manifest.get(keys::LICENSE_FILE).map(str::to_string),
            Some(project.project_dir.join("LICENSE").display().to_string())
        );
    }

    #[test]
    fn test_custom_entry_overrides_module_name() {
        let mut custom = CustomManifestEntries::new();
        custom.entry(keys::MODULE_NAME, "org.override");
        custom.entry("X-Build-Number", 17);

        let manifest = assemble(&ModuleDescriptorConfig::new(), &custom, &project());
        assert!(manifest.as_ref().is_ok_and(|m| m.get(keys::MODULE_NAME) == Some("org.override")
            && m.get("X-Build-Number") == Some("17")));
    }

    #[test]
    fn test_empty_project_name_is_missing_module_name() {
        let project = ProjectContext::new("", std::env::temp_dir()).with_version("1.0");
        let err = assemble(
            &ModuleDescriptorConfig::new(),
            &CustomManifestEntries::new(),
            &project,
        )
        .err();

        assert!(matches!(
            err,
            Some(DescriptorError::MissingRequiredField { ref field }) if field == "moduleName"
        ));
    }

    #[test]
    fn test_tokenless_project_name_is_missing_module_name() {
        for name in ["-", "--"] {
            let project = ProjectContext::new(name, std::env::temp_dir()).with_version("1.0");
            let err = assemble(
                &ModuleDescriptorConfig::new(),
                &CustomManifestEntries::new(),
                &project,
            )
            .err();

            assert!(
                matches!(
                    err,
                    Some(DescriptorError::MissingRequiredField { ref field }) if field == "moduleName"
                ),
                "project {:?} should have no module name",
                name
            );
        }
    }

    #[test]
    fn test_custom_entries_cannot_blank_required_keys() {
        let mut custom = CustomManifestEntries::new();
        custom.entry(keys::MODULE_NAME, "");
        let err = assemble(&ModuleDescriptorConfig::new(), &custom, &project()).err();
        assert!(matches!(
            err,
            Some(DescriptorError::MissingRequiredField { ref field }) if field == "moduleName"
        ));

        let mut custom = CustomManifestEntries::new();
        custom.entry(keys::SPECIFICATION_VERSION, " ");
        let err = assemble(&ModuleDescriptorConfig::new(), &custom, &project()).err();
        assert!(matches!(
            err,
            Some(DescriptorError::MissingRequiredField { ref field }) if field == "specificationVersion"
        ));
    }

    #[test]
    fn test_missing_version_is_missing_specification_version() {
        let project = ProjectContext::new("versionless", std::env::temp_dir());
        let err = assemble(
            &ModuleDescriptorConfig::new(),
            &CustomManifestEntries::new(),
            &project,
        )
        .err();

        assert!(matches!(
            err,
            Some(DescriptorError::MissingRequiredField { ref field }) if field == "specificationVersion"
        ));
    }

    #[test]
    fn test_null_custom_entry_fails_whole_assembly() {
        let mut custom = CustomManifestEntries::new();
        custom.entry("X-Fine", "ok");
        custom.entry("X-Null", serde_json::Value::Null);

        let result = assemble(&ModuleDescriptorConfig::new(), &custom, &project());
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidArgument { ref argument }) if argument == "X-Null"
        ));
    }

    #[test]
    fn test_custom_separator() {
        let mut config = ModuleDescriptorConfig::new();
        config.require("a");
        config.require("b");

        let assembler = DescriptorAssembler::with_encoding(ListEncoding::with_separator(","));
        let manifest = assembler.assemble(&config, &CustomManifestEntries::new(), &project());
        assert!(manifest.is_ok_and(|m| m.get(keys::REQUIRES) == Some("a,b")));
    }

    #[test]
    fn test_validate_module_name() {
        assert!(validate_module_name("org.example.core").is_ok());
        assert!(validate_module_name("org.example.core/2").is_ok());
        assert!(validate_module_name("single").is_ok());
        assert!(matches!(
            validate_module_name(""),
            Err(DescriptorError::MissingRequiredField { .. })
        ));
        for tokenless in [".", "..", "/2"] {
            assert!(matches!(
                validate_module_name(tokenless),
                Err(DescriptorError::MissingRequiredField { .. })
            ));
        }
        for bad in ["org..example", ".org", "org.", "org/x", "org/", "org example"] {
            assert!(
                matches!(validate_module_name(bad), Err(DescriptorError::InvalidModuleName(_))),
                "{} should be rejected",
                bad
            );
        }
    }
}
