use super::{OdFlowAppError, SeedDemandSource};
use crate::gtfs::MissingStopLocationPolicy;
use config::{Config, Environment, FileFormat};
use odflow_core::model::{
    progress::DEFAULT_PROGRESS_BATCH_SIZE, OdFlowParameters, DEFAULT_DISTANCE_DECAY,
    DEFAULT_FLOW_SCALE,
};
use serde::{Deserialize, Serialize};

/// prefix for environment variables overriding configuration values, e.g. `ODFLOW_DISTANCE_DECAY`
pub const ENV_PREFIX: &str = "ODFLOW";

/// defines behaviors for an odflow run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OdFlowConfiguration {
    /// exponential decay rate (per km) of the gravity model
    pub distance_decay: f64,
    /// multiplier converting OD shares into flows
    pub flow_scale: f64,
    /// number of pairs between progress updates
    pub progress_batch_size: usize,
    pub parallelize: bool,
    pub missing_stop_location_policy: MissingStopLocationPolicy,
    /// replace existing output files
    pub overwrite: bool,
    /// write .csv.gz instead of .csv
    pub gzip: bool,
    pub seed_demand: SeedDemandSource,
}

impl Default for OdFlowConfiguration {
    fn default() -> Self {
        Self {
            distance_decay: DEFAULT_DISTANCE_DECAY,
            flow_scale: DEFAULT_FLOW_SCALE,
            progress_batch_size: DEFAULT_PROGRESS_BATCH_SIZE,
            parallelize: false,
            missing_stop_location_policy: MissingStopLocationPolicy::Fail,
            overwrite: true,
            gzip: false,
            seed_demand: SeedDemandSource::default(),
        }
    }
}

impl OdFlowConfiguration {
    pub fn parameters(&self) -> OdFlowParameters {
        OdFlowParameters {
            distance_decay: self.distance_decay,
            flow_scale: self.flow_scale,
            progress_batch_size: self.progress_batch_size,
            parallelize: self.parallelize,
        }
    }

    /// default configuration with any `ODFLOW_*` environment overrides applied
    pub fn from_environment() -> Result<Self, OdFlowAppError> {
        build_configuration(None)
    }
}

impl TryFrom<&str> for OdFlowConfiguration {
    type Error = OdFlowAppError;

    fn try_from(f: &str) -> Result<Self, Self::Error> {
        let format = if f.ends_with(".toml") {
            FileFormat::Toml
        } else if f.ends_with(".json") {
            FileFormat::Json
        } else {
            return Err(OdFlowAppError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        build_configuration(Some((f, format)))
    }
}

/// layers the optional configuration file and then `ODFLOW_*` environment variables
/// over the defaults.
fn build_configuration(
    file: Option<(&str, FileFormat)>,
) -> Result<OdFlowConfiguration, OdFlowAppError> {
    let source_name = match file {
        Some((f, _)) => format!("'{f}'"),
        None => String::from("environment"),
    };
    let mut builder = Config::builder();
    if let Some((f, format)) = file {
        builder = builder.add_source(config::File::new(f, format));
    }
    let config = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .map_err(|e| OdFlowAppError::ConfigReadError {
            msg: format!("failed reading {source_name}"),
            source: e,
        })?;
    config
        .try_deserialize::<OdFlowConfiguration>()
        .map_err(|e| OdFlowAppError::ConfigReadError {
            msg: format!("failed decoding {source_name}"),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_matches_model_constants() {
        let conf = OdFlowConfiguration::default();
        assert_eq!(conf.distance_decay, 0.15);
        assert_eq!(conf.flow_scale, 1.0e7);
        assert_eq!(conf.progress_batch_size, 1000);
        assert_eq!(conf.parameters(), OdFlowParameters::default());
        assert_eq!(conf.seed_demand, SeedDemandSource::Uniform { value: 1.0 });
    }

    #[test]
    fn test_read_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odflow.toml");
        fs::write(
            &path,
            r#"
distance_decay = 0.25
parallelize = true
missing_stop_location_policy = "drop_stop"

[seed_demand]
type = "csv"
file = "seed.csv"
"#,
        )
        .unwrap();
        let conf = OdFlowConfiguration::try_from(path.to_str().unwrap()).unwrap();
        assert_eq!(conf.distance_decay, 0.25);
        assert!(conf.parallelize);
        assert_eq!(
            conf.missing_stop_location_policy,
            MissingStopLocationPolicy::DropStop
        );
        assert_eq!(
            conf.seed_demand,
            SeedDemandSource::Csv {
                file: String::from("seed.csv")
            }
        );
        // unspecified keys fall back to defaults
        assert_eq!(conf.flow_scale, DEFAULT_FLOW_SCALE);
    }

    #[test]
    fn test_read_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odflow.json");
        fs::write(
            &path,
            r#"{ "flow_scale": 1000.0, "gzip": true, "seed_demand": { "type": "uniform", "value": 2.0 } }"#,
        )
        .unwrap();
        let conf = OdFlowConfiguration::try_from(path.to_str().unwrap()).unwrap();
        assert_eq!(conf.flow_scale, 1000.0);
        assert!(conf.gzip);
        assert_eq!(conf.seed_demand, SeedDemandSource::Uniform { value: 2.0 });
    }

    #[test]
    fn test_unsupported_extension() {
        let result = OdFlowConfiguration::try_from("odflow.yaml");
        assert!(matches!(
            result,
            Err(OdFlowAppError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_default_roundtrips_through_toml() {
        let conf = OdFlowConfiguration::default();
        let encoded = toml::to_string_pretty(&conf).unwrap();
        let decoded: OdFlowConfiguration = toml::from_str(&encoded).unwrap();
        assert_eq!(conf, decoded);
    }
}
