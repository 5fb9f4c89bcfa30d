//! JSON run configuration.
//!
//! Declares the time step, grid layout and the source of each auxiliary soil
//! input. Validation runs on load and again in
//! [`EnergyBalanceEt::initialize`](super::EnergyBalanceEt::initialize).

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::support::model_input::{GridInfo, InputKind};

/// Run configuration for the energy-balance ET component.
///
/// Usually loaded from JSON:
///
/// ```
/// use evap_energy_balance::models::evaporation::energy_balance::EtConfig;
///
/// let config = EtConfig::from_json_str(r#"{
///     "in_directory": "input",
///     "dt": 3600.0,
///     "grid": { "ncols": 4, "nrows": 3, "cell_area": 900.0 },
///     "k_soil": { "kind": "scalar", "value": 0.45 },
///     "soil_x": { "kind": "scalar", "value": 0.5 },
///     "t_soil_x": { "kind": "time_series", "file": "T_soil_x.txt" }
/// }"#).unwrap();
///
/// assert_eq!(config.grid.n_cells(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtConfig {
    /// Directory that auxiliary input file paths are relative to.
    #[serde(default)]
    pub in_directory: PathBuf,

    /// Time step [s].
    pub dt: f64,

    /// Spatial layout of the run.
    pub grid: GridInfo,

    /// Soil thermal conductivity [W m-1 deg_C-1].
    pub k_soil: InputConfig,

    /// Depth of the reference soil temperature [m].
    pub soil_x: InputConfig,

    /// Soil temperature at the reference depth [deg_C].
    pub t_soil_x: InputConfig,
}

/// How one auxiliary input is supplied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub kind: InputKind,

    /// Constant value, required for [`InputKind::Scalar`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// File relative to `in_directory`, required for every other kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl InputConfig {
    /// A fixed scalar input.
    #[must_use]
    pub fn scalar(value: f64) -> Self {
        Self {
            kind: InputKind::Scalar,
            value: Some(value),
            file: None,
        }
    }

    /// An input read from `file`.
    #[must_use]
    pub fn file(kind: InputKind, file: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            value: None,
            file: Some(file.into()),
        }
    }
}

/// Errors raised while loading or validating an [`EtConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl EtConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the JSON is malformed or invalid.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks the time step, grid, and auxiliary input declarations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dt.is_nan() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "dt",
                reason: format!("time step must be positive, got {}", self.dt),
            });
        }
        if self.grid.n_cells() == 0 {
            return Err(ConfigError::InvalidValue {
                key: "grid",
                reason: "grid has no cells".into(),
            });
        }
        if self.grid.cell_area.is_nan() || self.grid.cell_area <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "grid.cell_area",
                reason: format!("cell area must be positive, got {}", self.grid.cell_area),
            });
        }

        for (key, input) in self.inputs() {
            match (input.kind, &input.value, &input.file) {
                (InputKind::Scalar, Some(_), _) => {}
                (InputKind::Scalar, None, _) => {
                    return Err(ConfigError::InvalidValue {
                        key,
                        reason: "scalar input needs a value".into(),
                    });
                }
                (_, _, Some(_)) => {}
                (kind, _, None) => {
                    return Err(ConfigError::InvalidValue {
                        key,
                        reason: format!("{kind:?} input needs a file"),
                    });
                }
            }
        }
        Ok(())
    }

    fn inputs(&self) -> [(&'static str, &InputConfig); 3] {
        [
            ("k_soil", &self.k_soil),
            ("soil_x", &self.soil_x),
            ("t_soil_x", &self.t_soil_x),
        ]
    }
}
