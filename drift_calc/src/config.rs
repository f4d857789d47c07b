use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use directories::ProjectDirs;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::debug;
use tracing_unwrap::ResultExt;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

pub(crate) fn drift_calc_project_dir() -> Option<ProjectDirs> {
    ProjectDirs::from("", "meltinglava", "drift_calc")
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DriftConfig {
    local_time_zone: String,
    show_header: bool,
    default_true_airspeed: Option<f64>,
}

impl DriftConfig {
    /// Embedded defaults, overlaid by the user's config file. An explicitly
    /// given file must exist, the one in the project config dir may be absent.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        match explicit_path {
            Some(path) => {
                debug!(?path, "Reading config file");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
            None => {
                if let Some(path) = default_config_file_path() {
                    debug!(?path, "Reading config file if present");
                    builder = builder.add_source(
                        File::from(path)
                            .format(FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        builder.build()?.try_deserialize()
    }

    pub fn show_header(&self) -> bool {
        self.show_header
    }

    pub fn default_true_airspeed(&self) -> Option<f64> {
        self.default_true_airspeed
    }

    /// Falls back to UTC when the configured zone is unknown.
    pub fn local_time_zone(&self) -> TimeZone {
        TimeZone::get(&self.local_time_zone)
            .ok_or_log()
            .unwrap_or(TimeZone::UTC)
    }

    pub fn local_time_zone_name(&self) -> &str {
        &self.local_time_zone
    }
}

fn default_config_file_path() -> Option<PathBuf> {
    drift_calc_project_dir().map(|dirs| dirs.config_dir().join("config.toml"))
}
