//! Attribute and variable tables.

use crate::support::bmi::{AttributeTable, MetadataError, VarTable};

pub(super) const ATTRIBUTES: &[(&str, &str)] = &[
    ("model_name", "TopoFlow_Evaporation_Energy_Balance"),
    ("version", "3.1"),
    ("author_name", "Scott D. Peckham"),
    ("grid_type", "uniform"),
    ("time_step_type", "fixed"),
    ("step_method", "explicit"),
    ("comp_name", "EvapEnergyBalance"),
    ("model_family", "TopoFlow"),
    ("cfg_template_file", "Evap_Energy_Balance.cfg.in"),
    ("cfg_extension", "_evap_energy_balance.cfg"),
    ("cmt_var_prefix", "/EvapEnergyBalance/Input/Var/"),
    ("gui_xml_file", "/home/csdms/cca/topoflow/3.1/src/share/cmt/gui/Evap_Energy_Balance.xml"),
    ("dialog_title", "Evaporation: Energy Balance Parameters"),
    ("time_units", "seconds"),
];

/// Identifiers supplied by sibling components.
pub const INPUT_VAR_NAMES: &[&str] = &[
    "air__temperature",
    "channel_water__depth",
    "land_surface_air__latent_heat_flux",
    "land_surface__net_irradiation_flux",
    "land_surface__temperature",
    "soil_model_top_layer__porosity",
    "soil_model_top_layer__wetted_thickness",
    "soil_water_table_surface__elevation",
    "snow__depth",
];

/// Identifiers computed by this component.
pub const OUTPUT_VAR_NAMES: &[&str] = &[
    "land_water__evaporation_rate",
    "land_water__area_time_integral_of_evaporation_rate",
    "model__time_step",
    "soil_surface__conduction_energy_flux",
];

/// Identifiers read from configuration or files that can also be queried.
pub const PASS_THROUGH_VAR_NAMES: &[&str] = &[
    "land_surface__elevation",
    "soil__reference_depth_temperature",
    "soil__temperature_reference_depth",
    "soil__thermal_conductivity",
];

/// `(identifier, short name, units)` for every known variable.
const VARS: &[(&str, &str, &str)] = &[
    ("air__temperature", "T_air", "deg_C"),
    ("channel_water__depth", "depth", "m"),
    ("land_surface_air__latent_heat_flux", "Qe", "W m-2"),
    ("land_surface__net_irradiation_flux", "Q_sum", "W m-2"),
    ("land_surface__temperature", "T_surf", "deg_C"),
    ("soil_model_top_layer__porosity", "p0", "1"),
    ("soil_model_top_layer__wetted_thickness", "y0", "m"),
    ("soil_water_table_surface__elevation", "h_table", "m"),
    ("snow__depth", "h_snow", "m"),
    // computed
    ("land_water__evaporation_rate", "ET", "m s-1"),
    ("land_water__area_time_integral_of_evaporation_rate", "vol_ET", "m3"),
    ("model__time_step", "dt", "s"),
    ("soil_surface__conduction_energy_flux", "Qc", "W m-2"),
    // from configuration or files
    ("land_surface__elevation", "DEM", "m"),
    ("soil__reference_depth_temperature", "T_soil_x", "deg_C"),
    ("soil__temperature_reference_depth", "soil_x", "m"),
    ("soil__thermal_conductivity", "K_soil", "W m-1 deg_C-1"),
];

pub(super) fn attribute_table() -> AttributeTable {
    AttributeTable::new(ATTRIBUTES)
}

pub(super) fn var_table() -> Result<VarTable, MetadataError> {
    VarTable::new(INPUT_VAR_NAMES, OUTPUT_VAR_NAMES, VARS)
}
