//! Azure File volume specifications.
//!
//! A volume specification names a storage account, its access key, a file
//! share and where to mount it:
//!
//! ```text
//! username:key@share[:/target]
//! ```
//!
//! This crate turns a list of such strings into compose records:
//! - `ParsedVolume`: the four fields of one specification plus an assigned name
//! - `VolumeSetBuilder`: parses a list and assembles `RunVolumes`
//! - `DriverConfig`: driver name and option keys written into each volume
//!
//! # Example
//!
//! ```rust
//! use azvol_spec::get_run_volumes;
//!
//! let run = get_run_volumes(["user1:key1@share1:/mnt/a", "user2:key2@share2"]).unwrap();
//!
//! assert_eq!(run.volumes["volume-0"].driver_opts["share_name"], "share1");
//! assert_eq!(run.service_volumes[1].target, "/run/volumes/share2");
//! ```

mod builder;
mod driver;
mod error;
mod parser;

pub use builder::{get_run_volumes, volume_name, VolumeSetBuilder};
pub use driver::{
    DriverConfig, DriverConfigError, AZURE_FILE_DRIVER, DEFAULT_ACCOUNT_KEY_KEY,
    DEFAULT_ACCOUNT_NAME_KEY, DEFAULT_SHARE_NAME_KEY,
};
pub use error::{FormatIssue, ParseError};
pub use parser::{ParsedVolume, DEFAULT_TARGET_ROOT};

pub use azvol_compose::{RunVolumes, ServiceVolumeConfig, VolumeConfig};
