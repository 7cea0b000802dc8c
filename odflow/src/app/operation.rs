use super::{
    write_outputs, KdamProgress, OdFlowAppError, OdFlowConfiguration, OdFlowContext,
    OdFlowSummary,
};
use crate::gtfs::MissingStopLocationPolicy;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum OdFlowOperation {
    /// compute the OD matrix and edge flows for a GTFS feed and write them as CSV
    Run {
        /// a GTFS zip archive or unzipped GTFS directory
        #[arg(long)]
        gtfs: String,
        /// directory receiving od-matrix.csv and edge-flows.csv
        #[arg(long)]
        output_directory: String,
        /// optional .toml or .json run configuration
        #[arg(long)]
        configuration_file: Option<String>,
        /// overrides the configured handling of stops without a location
        #[arg(long, value_enum)]
        missing_stop_location_policy: Option<MissingStopLocationPolicy>,
    },
    /// print stop, trip and seed demand statistics for a GTFS feed as JSON
    Summary {
        #[arg(long)]
        gtfs: String,
        #[arg(long)]
        configuration_file: Option<String>,
        #[arg(long, value_enum)]
        missing_stop_location_policy: Option<MissingStopLocationPolicy>,
    },
    /// write the default run configuration as TOML
    DefaultConfig {
        #[arg(long, default_value_t = String::from("odflow.toml"))]
        output_file: String,
    },
}

impl OdFlowOperation {
    pub fn run(&self) -> Result<(), OdFlowAppError> {
        match self {
            OdFlowOperation::Run {
                gtfs,
                output_directory,
                configuration_file,
                missing_stop_location_policy,
            } => {
                let configuration = read_configuration(
                    configuration_file.as_deref(),
                    missing_stop_location_policy.as_ref(),
                )?;
                let output_path = Path::new(output_directory);
                if !output_path.is_dir() {
                    std::fs::create_dir_all(output_path).map_err(|e| {
                        OdFlowAppError::WriteError {
                            filepath: output_directory.clone(),
                            error: e.to_string(),
                        }
                    })?;
                }
                let (overwrite, gzip) = (configuration.overwrite, configuration.gzip);
                let ctx = OdFlowContext::build(gtfs, configuration)?;
                let mut progress = KdamProgress::new("edge flows");
                let output = ctx.run(&mut progress, None)?;
                let failures = write_outputs(&output, output_path, overwrite, gzip);
                if failures.is_empty() {
                    log::info!("finished writing results to {output_directory}");
                    Ok(())
                } else {
                    Err(OdFlowAppError::OutputFailures(failures.len()))
                }
            }
            OdFlowOperation::Summary {
                gtfs,
                configuration_file,
                missing_stop_location_policy,
            } => {
                let configuration = read_configuration(
                    configuration_file.as_deref(),
                    missing_stop_location_policy.as_ref(),
                )?;
                let ctx = OdFlowContext::build(gtfs, configuration)?;
                let summary = OdFlowSummary::from(&ctx);
                let json = serde_json::to_string_pretty(&summary).map_err(|e| {
                    OdFlowAppError::ConfigurationError(format!("failed encoding summary: {e}"))
                })?;
                println!("{json}");
                Ok(())
            }
            OdFlowOperation::DefaultConfig { output_file } => {
                let toml = toml::to_string_pretty(&OdFlowConfiguration::default()).map_err(
                    |e| OdFlowAppError::ConfigurationError(format!("failed encoding defaults: {e}")),
                )?;
                std::fs::write(output_file, toml).map_err(|e| OdFlowAppError::WriteError {
                    filepath: output_file.clone(),
                    error: e.to_string(),
                })?;
                log::info!("wrote default configuration to {output_file}");
                Ok(())
            }
        }
    }
}

fn read_configuration(
    configuration_file: Option<&str>,
    missing_stop_location_policy: Option<&MissingStopLocationPolicy>,
) -> Result<OdFlowConfiguration, OdFlowAppError> {
    let mut configuration = match configuration_file {
        Some(f) => OdFlowConfiguration::try_from(f)?,
        None => OdFlowConfiguration::from_environment()?,
    };
    if let Some(policy) = missing_stop_location_policy {
        configuration.missing_stop_location_policy = *policy;
    }
    Ok(configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{EDGE_FLOWS_FILENAME, OD_MATRIX_FILENAME};
    use std::path::PathBuf;

    fn feed() -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test")
            .join("mini-gtfs")
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_run_writes_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let output_directory = dir.path().join("out");
        let op = OdFlowOperation::Run {
            gtfs: feed(),
            output_directory: output_directory.to_string_lossy().to_string(),
            configuration_file: None,
            missing_stop_location_policy: None,
        };
        op.run().unwrap();
        let od = std::fs::read_to_string(output_directory.join(OD_MATRIX_FILENAME)).unwrap();
        assert_eq!(od.lines().count(), 1 + 25);
        let flows = std::fs::read_to_string(output_directory.join(EDGE_FLOWS_FILENAME)).unwrap();
        assert_eq!(flows.lines().count(), 1 + 20);
    }

    #[test]
    fn test_default_config_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let output_file = dir.path().join("odflow.toml").to_string_lossy().to_string();
        OdFlowOperation::DefaultConfig {
            output_file: output_file.clone(),
        }
        .run()
        .unwrap();
        let conf = OdFlowConfiguration::try_from(output_file.as_str()).unwrap();
        assert_eq!(conf, OdFlowConfiguration::default());
    }

    #[test]
    fn test_policy_flag_overrides_configuration() {
        let conf = read_configuration(None, Some(&MissingStopLocationPolicy::DropStop)).unwrap();
        assert_eq!(
            conf.missing_stop_location_policy,
            MissingStopLocationPolicy::DropStop
        );
    }
}
