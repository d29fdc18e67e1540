//! Code-signing key material references
//!
//! Only references are carried here. The key store is never opened; an
//! external signing step consumes [`SigningParameters`].

use crate::context::FileResolver;
use crate::errors::DescriptorError;
use std::fmt;
use std::path::{Path, PathBuf};

const REDACTED: &str = "<redacted>";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct KeyStoreConfig {
    key_store_file: Option<PathBuf>,
    alias: Option<String>,
    password: Option<String>,
}

impl KeyStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_store_file(&self) -> Option<&Path> {
        self.key_store_file.as_deref()
    }

    /// Resolve the key store location; `None` clears it
    pub fn set_key_store_file(
        &mut self,
        reference: Option<&Path>,
        resolver: &dyn FileResolver,
    ) -> Result<(), DescriptorError> {
        self.key_store_file = match reference {
            Some(path) => Some(resolver.resolve(path)?),
            None => None,
        };
        Ok(())
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn set_alias(&mut self, alias: Option<String>) {
        self.alias = alias;
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn set_password(&mut self, password: Option<String>) {
        self.password = password;
    }

    /// True when any signing reference has been supplied
    pub fn is_configured(&self) -> bool {
        self.key_store_file.is_some() || self.alias.is_some() || self.password.is_some()
    }

    /// Parameters for the signing step. Called only when the packaging
    /// pipeline actually signs; every reference must then be present.
    pub fn signing_parameters(&self) -> Result<SigningParameters, DescriptorError> {
        let key_store_file = self
            .key_store_file
            .clone()
            .ok_or_else(|| DescriptorError::missing_field("keyStore.keyStoreFile"))?;
        let alias = self
            .alias
            .clone()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| DescriptorError::missing_field("keyStore.alias"))?;
        let password = self
            .password
            .clone()
            .ok_or_else(|| DescriptorError::missing_field("keyStore.password"))?;

        Ok(SigningParameters {
            key_store_file,
            alias,
            password,
        })
    }
}

impl fmt::Debug for KeyStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStoreConfig")
            .field("key_store_file", &self.key_store_file)
            .field("alias", &self.alias)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Validated inputs for an external signing tool
#[derive(Clone, PartialEq, Eq)]
pub struct SigningParameters {
    pub key_store_file: PathBuf,
    pub alias: String,
    pub password: String,
}

impl fmt::Debug for SigningParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningParameters")
            .field("key_store_file", &self.key_store_file)
            .field("alias", &self.alias)
            .field("password", &REDACTED)
            .finish()
    }
}
