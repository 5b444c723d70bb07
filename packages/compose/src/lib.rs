//! Compose project volume records.
//!
//! These are the shapes a compose-style project model expects for volumes:
//! - `VolumeConfig`: a named top-level volume with a driver and its options
//! - `ServiceVolumeConfig`: a mount of a named volume into a service
//! - `RunVolumes`: both collections for a single-service project
//!
//! The records only carry data. Producing them from volume specifications is
//! the job of `azvol-spec`.
//!
//! # Example
//!
//! ```rust
//! use azvol_compose::{RunVolumes, ServiceVolumeConfig, VolumeConfig};
//!
//! let mut run = RunVolumes::default();
//! run.volumes.insert(
//!     "data".to_string(),
//!     VolumeConfig::new("data", "azure_file"),
//! );
//! run.service_volumes.push(ServiceVolumeConfig::new("azure_file", "data", "/data"));
//!
//! let mount = &run.service_volumes[0];
//! assert_eq!(run.volume_for(mount).unwrap().driver, "azure_file");
//! ```

mod volume;

pub use volume::{RunVolumes, ServiceVolumeConfig, VolumeConfig};
