//! Descriptor settings loaded from `nbm.toml`
//!
//! Settings are plain data. [`DescriptorSettings::apply`] copies them onto a
//! [`nbm_manifest::ModuleDescriptorConfig`] and
//! [`DescriptorSettings::custom_entries`] yields the custom entry overlay.

pub mod settings;

pub use settings::{
    DescriptorSettings, FriendPackageSettings, KeyStoreSettings, ModuleSettings, SettingsError,
    SETTINGS_ENV_VAR, SETTINGS_FILE_NAME,
};
