use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named volume in a compose project.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeConfig {
    pub name: String,
    pub driver: String,
    /// Options handed to the volume driver.
    ///
    /// Values may be credentials, so `Debug` only lists the option names.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub driver_opts: BTreeMap<String, String>,
}

impl VolumeConfig {
    pub fn new(name: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
            driver_opts: BTreeMap::new(),
        }
    }

    /// Add a driver option, replacing any previous value for `key`.
    #[must_use]
    pub fn with_opt(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.driver_opts.insert(key.into(), value.into());
        self
    }
}

impl fmt::Debug for VolumeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeConfig")
            .field("name", &self.name)
            .field("driver", &self.driver)
            .field("driver_opts", &self.driver_opts.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A mount of a named volume into a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceVolumeConfig {
    #[serde(rename = "type")]
    pub kind: String,
    /// Name of the `VolumeConfig` being mounted.
    pub source: String,
    pub target: String,
}

impl ServiceVolumeConfig {
    pub fn new(
        kind: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Volumes for a compose project of a single service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunVolumes {
    /// Project volumes keyed by volume name.
    pub volumes: BTreeMap<String, VolumeConfig>,
    /// Service mounts, in the order the volumes were given.
    pub service_volumes: Vec<ServiceVolumeConfig>,
}

impl RunVolumes {
    /// Number of mounted volumes.
    pub fn len(&self) -> usize {
        self.service_volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.service_volumes.is_empty()
    }

    /// Look up the project volume a service mount refers to.
    pub fn volume_for(&self, mount: &ServiceVolumeConfig) -> Option<&VolumeConfig> {
        self.volumes.get(&mount.source)
    }

    /// Split into the project volume map and the service mount list.
    pub fn into_parts(self) -> (BTreeMap<String, VolumeConfig>, Vec<ServiceVolumeConfig>) {
        (self.volumes, self.service_volumes)
    }
}
