//! Reserved descriptor entry names

pub const MANIFEST_VERSION: &str = "Manifest-Version";
pub const MODULE_NAME: &str = "OpenIDE-Module";
pub const SPECIFICATION_VERSION: &str = "OpenIDE-Module-Specification-Version";
pub const IMPLEMENTATION_VERSION: &str = "OpenIDE-Module-Implementation-Version";
pub const BUILD_VERSION: &str = "OpenIDE-Module-Build-Version";
pub const CLUSTER: &str = "NBM-Cluster";
pub const REQUIRES: &str = "OpenIDE-Module-Requires";
pub const PUBLIC_PACKAGES: &str = "OpenIDE-Module-Public-Packages";
pub const LOCALIZING_BUNDLE: &str = "OpenIDE-Module-Localizing-Bundle";
pub const MODULE_INSTALL: &str = "OpenIDE-Module-Install";
pub const LICENSE_FILE: &str = "NBM-License-File";
pub const MODULE_AUTHOR: &str = "NBM-Module-Author";
pub const HOME_PAGE: &str = "NBM-Homepage";
pub const NEEDS_RESTART: &str = "NBM-Needs-Restart";
pub const LAYER: &str = "OpenIDE-Module-Layer";
pub const JAVA_DEPENDENCIES: &str = "OpenIDE-Module-Java-Dependencies";
pub const EAGER: &str = "NBM-Eager";
pub const AUTOLOAD: &str = "NBM-Autoload";
pub const AUTOUPDATE_SHOW_IN_CLIENT: &str = "AutoUpdate-Show-In-Client";

pub const MANIFEST_VERSION_VALUE: &str = "1.0";

/// Reserved keys in the order they are written out
pub const RESERVED: &[&str] = &[
    MANIFEST_VERSION,
    MODULE_NAME,
    SPECIFICATION_VERSION,
    IMPLEMENTATION_VERSION,
    BUILD_VERSION,
    CLUSTER,
    REQUIRES,
    PUBLIC_PACKAGES,
    LOCALIZING_BUNDLE,
    MODULE_INSTALL,
    LICENSE_FILE,
    MODULE_AUTHOR,
    HOME_PAGE,
    NEEDS_RESTART,
    LAYER,
    JAVA_DEPENDENCIES,
    EAGER,
    AUTOLOAD,
    AUTOUPDATE_SHOW_IN_CLIENT,
];

pub fn is_reserved(key: &str) -> bool {
    RESERVED.contains(&key)
}
