//! Volume driver identity and the option keys it reads.
//!
//! Driver configurations are JSON objects like:
//! ```json
//! {"driver": "azure_file", "share_name_key": "share_name"}
//! ```
//! Fields left out keep their Azure File defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::parser::ParsedVolume;

/// Driver name of the Azure File volume plugin.
pub const AZURE_FILE_DRIVER: &str = "azure_file";
pub const DEFAULT_ACCOUNT_NAME_KEY: &str = "storage_account_name";
pub const DEFAULT_ACCOUNT_KEY_KEY: &str = "storage_account_key";
pub const DEFAULT_SHARE_NAME_KEY: &str = "share_name";

#[derive(thiserror::Error, Debug)]
pub enum DriverConfigError {
    #[error("failed to read driver config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid driver config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("driver config field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}

/// Which driver generated volumes use and the option keys it expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Driver name, also used as the service mount type.
    pub driver: String,
    /// Option key carrying the storage account name.
    pub account_name_key: String,
    /// Option key carrying the storage account key.
    pub account_key_key: String,
    /// Option key carrying the file share name.
    pub share_name_key: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::azure_file()
    }
}

impl DriverConfig {
    /// The Azure File volume plugin with its standard option keys.
    pub fn azure_file() -> Self {
        Self {
            driver: AZURE_FILE_DRIVER.to_string(),
            account_name_key: DEFAULT_ACCOUNT_NAME_KEY.to_string(),
            account_key_key: DEFAULT_ACCOUNT_KEY_KEY.to_string(),
            share_name_key: DEFAULT_SHARE_NAME_KEY.to_string(),
        }
    }

    /// Parse a JSON driver configuration.
    pub fn from_json(json: &str) -> Result<Self, DriverConfigError> {
        let config: DriverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON driver configuration from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DriverConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DriverConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), DriverConfigError> {
        let fields = [
            ("driver", &self.driver),
            ("account_name_key", &self.account_name_key),
            ("account_key_key", &self.account_key_key),
            ("share_name_key", &self.share_name_key),
        ];
        match fields.into_iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(DriverConfigError::EmptyField { field }),
            None => Ok(()),
        }
    }

    /// Driver options for a parsed volume.
    pub fn driver_opts(&self, volume: &ParsedVolume) -> BTreeMap<String, String> {
        BTreeMap::from([
            (self.account_name_key.clone(), volume.username().to_string()),
            (self.account_key_key.clone(), volume.key().to_string()),
            (self.share_name_key.clone(), volume.share().to_string()),
        ])
    }
}
