//! Command-line front end for azvol.
//!
//! Each `--volume` flag is one `username:key@share[:/target]` specification.
//! The resulting project volumes and service mounts are printed as JSON.

use std::path::PathBuf;

use azvol_spec::{DriverConfig, DriverConfigError, ParseError, VolumeSetBuilder};
use clap::Parser;

/// azvol - Turn Azure File volume specifications into compose volumes
#[derive(Parser, Debug)]
#[command(name = "azvol")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Volume specification `username:key@share[:/target]`, repeat for more volumes
    #[arg(short = 'v', long = "volume", value_name = "SPEC", required = true)]
    pub volumes: Vec<String>,

    /// JSON file overriding the driver name and option keys
    #[arg(long, env = "AZVOL_DRIVER_CONFIG", value_name = "PATH")]
    pub driver_config: Option<PathBuf>,

    /// Print the JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    DriverConfig(#[from] DriverConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build the volumes named by `args` and render them as JSON.
pub fn run(args: &Args) -> Result<String, CliError> {
    let driver = match &args.driver_config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading driver config");
            DriverConfig::load(path)?
        }
        None => DriverConfig::default(),
    };

    let run_volumes = VolumeSetBuilder::new(driver).build(&args.volumes)?;

    let json = if args.compact {
        serde_json::to_string(&run_volumes)?
    } else {
        serde_json::to_string_pretty(&run_volumes)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("azvol").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn parses_repeated_volumes() {
        let args = args(&["-v", "a:b@c", "--volume", "d:e@f:/g"]);
        assert_eq!(args.volumes, vec!["a:b@c", "d:e@f:/g"]);
        assert!(!args.compact);
    }

    #[test]
    fn volume_is_required() {
        let result = Args::try_parse_from(["azvol", "--compact"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_prints_compose_json() {
        let output = run(&args(&["-v", "user1:key1@share1:/mnt/a", "-v", "user2:key2@share2"]))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["volumes"]["volume-0"]["driver"], "azure_file");
        assert_eq!(
            value["volumes"]["volume-1"]["driver_opts"]["share_name"],
            "share2"
        );
        assert_eq!(value["service_volumes"][0]["type"], "azure_file");
        assert_eq!(
            value["service_volumes"][1]["target"],
            "/run/volumes/share2"
        );
    }

    #[test]
    fn compact_output_is_one_line() {
        let output = run(&args(&["--compact", "-v", "a:b@c"])).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn parse_error_is_reported() {
        let err = run(&args(&["-v", "a:b@c", "-v", "bad"])).unwrap_err();
        assert!(matches!(err, CliError::Parse(ParseError::InvalidFormat { .. })));
        assert!(err.to_string().contains("invalid volume specification"));
    }

    #[test]
    fn driver_config_file_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"driver": "cifs"}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let output = run(&args(&["--driver-config", &path, "-v", "a:b@c"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["volumes"]["volume-0"]["driver"], "cifs");
        assert_eq!(value["service_volumes"][0]["type"], "cifs");
    }

    #[test]
    fn missing_driver_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let path = path.to_str().unwrap();

        let err = run(&args(&["--driver-config", path, "-v", "a:b@c"])).unwrap_err();
        assert!(matches!(err, CliError::DriverConfig(DriverConfigError::Io { .. })));
    }
}
