//! Assemble compose volumes from a list of specifications.

use std::collections::BTreeMap;

use azvol_compose::{RunVolumes, ServiceVolumeConfig, VolumeConfig};
use tracing::debug;

use crate::driver::DriverConfig;
use crate::error::ParseError;
use crate::parser::ParsedVolume;

/// Name assigned to the specification at `index`.
pub fn volume_name(index: usize) -> String {
    format!("volume-{}", index)
}

/// Volume configurations for a compose project of a single service, using
/// the Azure File driver.
pub fn get_run_volumes<I, S>(specs: I) -> Result<RunVolumes, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    VolumeSetBuilder::default().build(specs)
}

/// Builds `RunVolumes` from specifications for one driver.
#[derive(Debug, Clone, Default)]
pub struct VolumeSetBuilder {
    driver: DriverConfig,
}

impl VolumeSetBuilder {
    pub fn new(driver: DriverConfig) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &DriverConfig {
        &self.driver
    }

    /// Parse every specification in order.
    ///
    /// The specification at position `i` becomes `volume-<i>`. The first
    /// specification that fails to parse aborts the build and its error is
    /// returned; nothing is returned for the ones before it.
    pub fn build<I, S>(&self, specs: I) -> Result<RunVolumes, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let specs = specs.into_iter();
        let mut volumes = BTreeMap::new();
        let mut service_volumes = Vec::with_capacity(specs.size_hint().0);

        for (index, spec) in specs.enumerate() {
            let parsed = ParsedVolume::parse(volume_name(index), spec.as_ref())?;
            service_volumes.push(self.service_volume_config(&parsed));
            volumes.insert(parsed.name().to_string(), self.volume_config(&parsed));
        }

        debug!(
            driver = %self.driver.driver,
            count = service_volumes.len(),
            "built run volumes"
        );

        Ok(RunVolumes {
            volumes,
            service_volumes,
        })
    }

    /// The project volume for a parsed specification.
    pub fn volume_config(&self, volume: &ParsedVolume) -> VolumeConfig {
        VolumeConfig {
            name: volume.name().to_string(),
            driver: self.driver.driver.clone(),
            driver_opts: self.driver.driver_opts(volume),
        }
    }

    /// The service mount for a parsed specification.
    pub fn service_volume_config(&self, volume: &ParsedVolume) -> ServiceVolumeConfig {
        ServiceVolumeConfig::new(&self.driver.driver, volume.name(), volume.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_position() {
        assert_eq!(volume_name(0), "volume-0");
        assert_eq!(volume_name(12), "volume-12");
    }

    #[test]
    fn empty_input_builds_nothing() {
        let run = get_run_volumes(Vec::<String>::new()).unwrap();
        assert!(run.is_empty());
        assert!(run.volumes.is_empty());
    }

    #[test]
    fn volume_and_mount_share_name() {
        let run = get_run_volumes(["acct:key@files:/data"]).unwrap();
        let mount = &run.service_volumes[0];
        assert_eq!(mount.kind, "azure_file");
        assert_eq!(mount.source, "volume-0");
        assert_eq!(mount.target, "/data");
        assert_eq!(run.volume_for(mount).unwrap().driver, "azure_file");
    }

    #[test]
    fn custom_driver_is_used_everywhere() {
        let driver = DriverConfig {
            driver: "cifs".to_string(),
            account_name_key: "user".to_string(),
            account_key_key: "password".to_string(),
            share_name_key: "share".to_string(),
        };
        let builder = VolumeSetBuilder::new(driver);
        let run = builder.build(["acct:key@files"]).unwrap();

        let volume = &run.volumes["volume-0"];
        assert_eq!(volume.driver, "cifs");
        assert_eq!(volume.driver_opts["user"], "acct");
        assert_eq!(volume.driver_opts["password"], "key");
        assert_eq!(volume.driver_opts["share"], "files");
        assert_eq!(run.service_volumes[0].kind, "cifs");
        assert_eq!(builder.driver().driver, "cifs");
    }

    #[test]
    fn first_error_is_returned() {
        let err = get_run_volumes(["user@share", "no-at-sign"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingKey { .. }));
        assert_eq!(err.spec(), "user@share");
    }

    #[test]
    fn accepts_borrowed_strings() {
        let specs = vec!["a:b@c".to_string(), "d:e@f".to_string()];
        let run = VolumeSetBuilder::default().build(&specs).unwrap();
        assert_eq!(run.len(), 2);
    }
}
