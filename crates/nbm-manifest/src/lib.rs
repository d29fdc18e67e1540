//! NBM Module Descriptor
//!
//! This crate holds the model of a NetBeans module descriptor and the logic
//! that assembles it. User configuration ([`ModuleDescriptorConfig`]) is
//! combined with project data ([`ProjectContext`]) and free-form custom
//! entries into an [`NbmManifest`], which is written as properties text for
//! the packaging step.

pub mod assembler;
pub mod context;
pub mod custom_entries;
pub mod descriptor;
pub mod encoding;
pub mod errors;
pub mod friend_packages;
pub mod key_store;
pub mod keys;
pub mod manifest;
pub mod manifest_writer;

pub use assembler::{assemble, validate_module_name, DescriptorAssembler};
pub use context::{FileResolver, ProjectContext};
pub use custom_entries::CustomManifestEntries;
pub use descriptor::ModuleDescriptorConfig;
pub use encoding::ListEncoding;
pub use errors::{DescriptorError, ManifestIoError, ResolveError};
pub use friend_packages::{FriendPackage, FriendPackages};
pub use key_store::{KeyStoreConfig, SigningParameters};
pub use manifest::NbmManifest;

// Re-export manifest file utilities
pub use manifest_writer::{parse_properties, read_from_path, to_properties_string, write_to_path};
