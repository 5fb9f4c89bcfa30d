//! Energy-balance evapotranspiration.
//!
//! [`EnergyBalanceEt`] is an exchangeable framework component. Sibling
//! components (meteorology, snow, saturated zone, channels) bind their
//! outputs to it by standardized identifier with
//! [`set_value`](EnergyBalanceEt::set_value); three auxiliary soil inputs
//! come from configuration or files through an injected [`InputReader`].
//! Each step it computes:
//!
//! 1. the conductive flux `Qc = K_soil * (T_soil_x - T_surf) / soil_x`,
//! 2. the evaporation rate `ET = max((Q_sum - Qe) / (rho_w * Lv), 0)`,
//! 3. the cumulative evaporated volume `vol_ET`.
//!
//! `Qc` is reported as an output but is not part of the energy available
//! for evaporation.
//!
//! [`EnergyBalancePoint`] exposes the same physics as a stateless
//! [`twine_core::Model`] over typed quantities.
//!
//! # Example
//!
//! ```
//! use evap_energy_balance::models::evaporation::energy_balance::{
//!     EnergyBalanceEt, EtConfig, InputConfig,
//! };
//! use evap_energy_balance::support::{field::Field, model_input::GridInfo};
//!
//! let mut et = EnergyBalanceEt::new().unwrap();
//! et.initialize(EtConfig {
//!     in_directory: ".".into(),
//!     dt: 3600.0,
//!     grid: GridInfo { ncols: 1, nrows: 1, cell_area: 900.0, byte_order: Default::default() },
//!     k_soil: InputConfig::scalar(0.45),
//!     soil_x: InputConfig::scalar(1.0),
//!     t_soil_x: InputConfig::scalar(15.0),
//! })
//! .unwrap();
//!
//! et.set_value("land_surface__net_irradiation_flux", Field::Scalar(300.0)).unwrap();
//! et.set_value("land_surface_air__latent_heat_flux", Field::Scalar(50.0)).unwrap();
//! et.set_value("land_surface__temperature", Field::Scalar(10.0)).unwrap();
//! et.update_et_rate().unwrap();
//!
//! let rate = et.get_value("land_water__evaporation_rate").unwrap();
//! assert_eq!(rate, &Field::Scalar(1.0e-7));
//! ```

mod config;
mod core;
mod error;
mod point;
mod vars;

pub use config::{ConfigError, EtConfig, InputConfig};
pub use error::EtError;
pub use point::{EnergyBalancePoint, PointInput, PointOutput};
pub use vars::{INPUT_VAR_NAMES, OUTPUT_VAR_NAMES, PASS_THROUGH_VAR_NAMES};

use log::{debug, info, warn};

use crate::support::{
    bmi::{AttributeTable, InputReadable, MetadataError, VarTable, VariableDescribed},
    field::Field,
    model_input::{FileInputReader, InputKind, InputReader},
};

/// Identifiers checked by [`EnergyBalanceEt::check_input_types`].
const TYPE_CHECKED_VARS: [&str; 7] = [
    "soil__reference_depth_temperature",
    "soil__temperature_reference_depth",
    "soil__thermal_conductivity",
    "snow__depth",
    "land_surface__net_irradiation_flux",
    "land_surface_air__latent_heat_flux",
    "air__temperature",
];

/// The three inputs read from configuration or files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auxiliary {
    KSoil,
    SoilX,
    TSoilX,
}

impl Auxiliary {
    const ALL: [Self; 3] = [Self::KSoil, Self::SoilX, Self::TSoilX];

    fn id(self) -> &'static str {
        match self {
            Self::KSoil => "soil__thermal_conductivity",
            Self::SoilX => "soil__temperature_reference_depth",
            Self::TSoilX => "soil__reference_depth_temperature",
        }
    }

    fn config(self, config: &EtConfig) -> &InputConfig {
        match self {
            Self::KSoil => &config.k_soil,
            Self::SoilX => &config.soil_x,
            Self::TSoilX => &config.t_soil_x,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-step component state, keyed by short internal name.
#[derive(Debug, Clone, Default)]
struct State {
    t_air: Option<Field>,
    depth: Option<Field>,
    qe: Option<Field>,
    q_sum: Option<Field>,
    t_surf: Option<Field>,
    p0: Option<Field>,
    y0: Option<Field>,
    h_table: Option<Field>,
    h_snow: Option<Field>,
    et: Option<Field>,
    vol_et: Option<Field>,
    dt: Option<Field>,
    qc: Option<Field>,
    dem: Option<Field>,
    t_soil_x: Option<Field>,
    soil_x: Option<Field>,
    k_soil: Option<Field>,
}

impl State {
    fn slot(&self, name: &str) -> Option<&Option<Field>> {
        Some(match name {
            "T_air" => &self.t_air,
            "depth" => &self.depth,
            "Qe" => &self.qe,
            "Q_sum" => &self.q_sum,
            "T_surf" => &self.t_surf,
            "p0" => &self.p0,
            "y0" => &self.y0,
            "h_table" => &self.h_table,
            "h_snow" => &self.h_snow,
            "ET" => &self.et,
            "vol_ET" => &self.vol_et,
            "dt" => &self.dt,
            "Qc" => &self.qc,
            "DEM" => &self.dem,
            "T_soil_x" => &self.t_soil_x,
            "soil_x" => &self.soil_x,
            "K_soil" => &self.k_soil,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<Field>> {
        Some(match name {
            "T_air" => &mut self.t_air,
            "depth" => &mut self.depth,
            "Qe" => &mut self.qe,
            "Q_sum" => &mut self.q_sum,
            "T_surf" => &mut self.t_surf,
            "p0" => &mut self.p0,
            "y0" => &mut self.y0,
            "h_table" => &mut self.h_table,
            "h_snow" => &mut self.h_snow,
            "ET" => &mut self.et,
            "vol_ET" => &mut self.vol_et,
            "dt" => &mut self.dt,
            "Qc" => &mut self.qc,
            "DEM" => &mut self.dem,
            "T_soil_x" => &mut self.t_soil_x,
            "soil_x" => &mut self.soil_x,
            "K_soil" => &mut self.k_soil,
            _ => return None,
        })
    }

    fn auxiliary_mut(&mut self, input: Auxiliary) -> &mut Option<Field> {
        match input {
            Auxiliary::KSoil => &mut self.k_soil,
            Auxiliary::SoilX => &mut self.soil_x,
            Auxiliary::TSoilX => &mut self.t_soil_x,
        }
    }
}

/// Energy-balance ET component.
///
/// The reader type `R` supplies file access for the auxiliary inputs and
/// defaults to [`FileInputReader`].
pub struct EnergyBalanceEt<R: InputReader = FileInputReader> {
    attributes: AttributeTable,
    vars: VarTable,
    reader: R,
    config: Option<EtConfig>,
    sources: [Option<R::Source>; 3],
    state: State,
    all_scalars: Option<bool>,
    time: f64,
}

impl EnergyBalanceEt<FileInputReader> {
    /// Creates a component that reads auxiliary inputs from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable tables are inconsistent.
    pub fn new() -> Result<Self, EtError> {
        Self::with_reader(FileInputReader)
    }
}

impl<R: InputReader> EnergyBalanceEt<R> {
    /// Creates a component that reads auxiliary inputs through `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable tables are inconsistent.
    pub fn with_reader(reader: R) -> Result<Self, EtError> {
        Ok(Self {
            attributes: vars::attribute_table(),
            vars: vars::var_table()?,
            reader,
            config: None,
            sources: [None, None, None],
            state: State::default(),
            all_scalars: None,
            time: 0.0,
        })
    }

    /// Prepares the component for a run.
    ///
    /// Seeds scalar auxiliary inputs from `config`, zeroes the outputs,
    /// opens the auxiliary input files and reads their first values.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or an input file cannot be
    /// opened or read.
    pub fn initialize(&mut self, config: EtConfig) -> Result<(), EtError> {
        config.validate()?;

        if self.sources.iter().any(Option::is_some) {
            debug!("re-initializing, closing sources from the previous run");
            self.close_input_files()?;
        }
        for input in Auxiliary::ALL {
            let input_config = input.config(&config);
            *self.state.auxiliary_mut(input) = match input_config.kind {
                InputKind::Scalar => input_config.value.map(Field::Scalar),
                _ => None,
            };
        }
        self.state.dt = Some(Field::Scalar(config.dt));
        self.state.et = Some(Field::Scalar(0.0));
        self.state.qc = Some(Field::Scalar(0.0));
        self.state.vol_et = Some(Field::Scalar(0.0));
        self.all_scalars = None;
        self.time = 0.0;

        info!(
            "initializing energy-balance ET: dt={}s, grid {}x{}",
            config.dt, config.grid.nrows, config.grid.ncols
        );
        self.config = Some(config);

        self.open_input_files()?;
        self.read_input_files()
    }

    /// Advances the component by one time step.
    ///
    /// Checks input types on the first step, computes `Qc` and `ET`, reads
    /// the next auxiliary input values, then accumulates `vol_ET`.
    ///
    /// `vol_ET` and the model time only change once every other step has
    /// succeeded. A failed read leaves the freshly computed `Qc` and `ET`
    /// in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the component is not initialized, an input is
    /// unbound or malformed, or a reference depth is zero or NaN.
    pub fn update(&mut self) -> Result<(), EtError> {
        let dt = self.config()?.dt;

        if self.all_scalars.is_none() {
            self.check_input_types()?;
        }
        self.update_et_rate()?;
        self.read_input_files()?;
        self.update_et_integral()?;
        self.time += dt;

        debug!("energy-balance ET advanced to t={}s", self.time);
        Ok(())
    }

    /// Releases the auxiliary input files.
    ///
    /// # Errors
    ///
    /// Returns an error if a source fails to close.
    pub fn finalize(&mut self) -> Result<(), EtError> {
        self.close_input_files()?;
        info!("finalized energy-balance ET at t={}s", self.time);
        Ok(())
    }

    /// Records whether every dependency input is a scalar.
    ///
    /// Checks reference-depth temperature, reference depth, thermal
    /// conductivity, snow depth, net irradiation, latent heat flux and air
    /// temperature. Returns the resulting flag.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Unbound`] if any of those inputs has no value.
    pub fn check_input_types(&mut self) -> Result<bool, EtError> {
        let mut all_scalars = true;
        for id in TYPE_CHECKED_VARS {
            all_scalars &= self.get_value(id)?.is_scalar();
        }

        debug!("energy-balance ET inputs all scalar: {all_scalars}");
        self.all_scalars = Some(all_scalars);
        Ok(all_scalars)
    }

    /// Computes the conductive flux `Qc` and the evaporation rate `ET`.
    ///
    /// Both outputs are overwritten together; on error neither changes.
    ///
    /// # Errors
    ///
    /// Returns an error if an input is unbound, grid shapes differ, or a
    /// reference depth is zero or NaN.
    pub fn update_et_rate(&mut self) -> Result<(), EtError> {
        let q_sum = self.get_value("land_surface__net_irradiation_flux")?;
        let qe = self.get_value("land_surface_air__latent_heat_flux")?;
        let t_surf = self.get_value("land_surface__temperature")?;
        let t_soil_x = self.get_value("soil__reference_depth_temperature")?;
        let soil_x = self.get_value("soil__temperature_reference_depth")?;
        let k_soil = self.get_value("soil__thermal_conductivity")?;

        let qc = core::conduction_flux(k_soil, t_soil_x, t_surf, soil_x)?;
        let et = core::et_rate(q_sum, qe)?;

        self.state.qc = Some(qc);
        self.state.et = Some(et);
        Ok(())
    }

    /// Adds this step's evaporated volume to `vol_ET`.
    ///
    /// # Errors
    ///
    /// Returns an error if the component is not initialized.
    pub fn update_et_integral(&mut self) -> Result<(), EtError> {
        let config = self.config()?;
        let et = self.get_value("land_water__evaporation_rate")?;
        let volume =
            core::evaporated_volume(et, config.dt, config.grid.cell_area, config.grid.n_cells());

        let total = match &self.state.vol_et {
            Some(Field::Scalar(v)) => v + volume,
            _ => volume,
        };
        self.state.vol_et = Some(Field::Scalar(total));
        Ok(())
    }

    /// Binds a value to an input or pass-through identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownVariable`] for unknown identifiers and
    /// [`MetadataError::ReadOnly`] for computed outputs.
    pub fn set_value(&mut self, id: &str, value: Field) -> Result<(), MetadataError> {
        let info = self.vars.info(id)?;
        if self.vars.is_output(id) {
            return Err(MetadataError::ReadOnly { id: id.to_owned() });
        }
        let slot = self
            .state
            .slot_mut(info.name)
            .ok_or_else(|| MetadataError::unknown(id))?;
        *slot = Some(value);
        Ok(())
    }

    /// Returns the current value of any known identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownVariable`] for unknown identifiers and
    /// [`MetadataError::Unbound`] if the value has not been set or computed.
    pub fn get_value(&self, id: &str) -> Result<&Field, MetadataError> {
        let info = self.vars.info(id)?;
        self.state
            .slot(info.name)
            .ok_or_else(|| MetadataError::unknown(id))?
            .as_ref()
            .ok_or_else(|| MetadataError::Unbound { id: id.to_owned() })
    }

    /// Whether every dependency input was scalar at the last type check.
    ///
    /// `None` until [`check_input_types`](Self::check_input_types) runs.
    #[must_use]
    pub fn all_scalars(&self) -> Option<bool> {
        self.all_scalars
    }

    /// Model time [s] since initialization.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Time step [s], once initialized.
    #[must_use]
    pub fn time_step(&self) -> Option<f64> {
        self.config.as_ref().map(|config| config.dt)
    }

    fn config(&self) -> Result<&EtConfig, EtError> {
        self.config.as_ref().ok_or(EtError::NotInitialized)
    }
}

impl<R: InputReader> VariableDescribed for EnergyBalanceEt<R> {
    fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    fn var_table(&self) -> &VarTable {
        &self.vars
    }
}

impl<R: InputReader> InputReadable for EnergyBalanceEt<R> {
    type Error = EtError;

    fn open_input_files(&mut self) -> Result<(), EtError> {
        let config = self.config.as_ref().ok_or(EtError::NotInitialized)?;

        for input in Auxiliary::ALL {
            let input_config = input.config(config);
            let Some(file) = input_config
                .file
                .as_ref()
                .filter(|_| input_config.kind != InputKind::Scalar)
            else {
                continue;
            };

            let path = config.in_directory.join(file);
            let source = self
                .reader
                .open(input_config.kind, &path)
                .map_err(|source| EtError::Input {
                    input: input.id(),
                    source,
                })?;
            self.sources[input.index()] = Some(source);
        }
        Ok(())
    }

    fn read_input_files(&mut self) -> Result<(), EtError> {
        let grid = self.config()?.grid;

        for input in Auxiliary::ALL {
            let Some(source) = self.sources[input.index()].as_mut() else {
                continue;
            };
            let value = self
                .reader
                .read_next(source, &grid)
                .map_err(|source| EtError::Input {
                    input: input.id(),
                    source,
                })?;

            match value {
                Some(value) => *self.state.auxiliary_mut(input) = Some(value),
                None => debug!("{} unchanged, keeping previous value", input.id()),
            }
        }
        Ok(())
    }

    fn close_input_files(&mut self) -> Result<(), EtError> {
        for input in Auxiliary::ALL {
            if let Some(source) = self.sources[input.index()].take() {
                self.reader.close(source).map_err(|source| EtError::Input {
                    input: input.id(),
                    source,
                })?;
            }
        }
        if self.config.is_none() {
            warn!("closing input files of an uninitialized component");
        }
        Ok(())
    }
}
