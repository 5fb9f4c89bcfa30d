//! Typed single-location energy balance.

use twine_core::Model;
use uom::si::{
    f64::{HeatFluxDensity, Length, ThermalConductivity, ThermodynamicTemperature, Velocity},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    velocity::meter_per_second,
};

use crate::support::{
    constraint::{Constrained, NonNegative, NonZero},
    units::TemperatureDifference,
};

use super::{EtError, core};

/// Energy-balance ET at a single location.
///
/// A stateless [`Model`] over typed quantities, for use outside the
/// component lifecycle (for example inside a larger Twine model graph).
/// It computes the same conductive flux and evaporation rate as
/// [`EnergyBalanceEt::update_et_rate`](super::EnergyBalanceEt::update_et_rate).
///
/// # Example
///
/// ```
/// use evap_energy_balance::models::evaporation::energy_balance::{
///     EnergyBalancePoint, PointInput,
/// };
/// use evap_energy_balance::support::constraint::NonZero;
/// use twine_core::Model;
/// use uom::si::{
///     f64::{HeatFluxDensity, Length, ThermalConductivity, ThermodynamicTemperature},
///     heat_flux_density::watt_per_square_meter,
///     length::meter,
///     thermal_conductivity::watt_per_meter_kelvin,
///     thermodynamic_temperature::degree_celsius,
///     velocity::meter_per_second,
/// };
///
/// let input = PointInput {
///     net_irradiation: HeatFluxDensity::new::<watt_per_square_meter>(300.0),
///     latent_heat_flux: HeatFluxDensity::new::<watt_per_square_meter>(50.0),
///     surface_temperature: ThermodynamicTemperature::new::<degree_celsius>(10.0),
///     reference_temperature: ThermodynamicTemperature::new::<degree_celsius>(15.0),
///     reference_depth: NonZero::new(Length::new::<meter>(1.0)).unwrap(),
///     thermal_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.45),
/// };
///
/// let output = EnergyBalancePoint.call(&input).unwrap();
/// let et = output.et_rate.into_inner().get::<meter_per_second>();
/// assert!((et - 1.0e-7).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyBalancePoint;

/// Surface and subsurface conditions at one location.
#[derive(Debug, Clone, Copy)]
pub struct PointInput {
    /// Net irradiation flux at the land surface.
    pub net_irradiation: HeatFluxDensity,

    /// Latent heat flux from the surface to the air.
    pub latent_heat_flux: HeatFluxDensity,

    /// Land surface temperature.
    pub surface_temperature: ThermodynamicTemperature,

    /// Soil temperature at the reference depth.
    pub reference_temperature: ThermodynamicTemperature,

    /// Depth of the reference soil temperature.
    pub reference_depth: Constrained<Length, NonZero>,

    /// Soil thermal conductivity.
    pub thermal_conductivity: ThermalConductivity,
}

/// Fluxes computed at one location.
#[derive(Debug, Clone, Copy)]
pub struct PointOutput {
    /// Conductive flux, positive toward the surface.
    pub conduction: HeatFluxDensity,

    /// Evaporation rate as a water depth per unit time.
    pub et_rate: Constrained<Velocity, NonNegative>,
}

impl Model for EnergyBalancePoint {
    type Input = PointInput;
    type Output = PointOutput;
    type Error = EtError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let delta_t = input
            .reference_temperature
            .minus(input.surface_temperature)
            .get::<delta_kelvin>();
        let k_soil = input.thermal_conductivity.get::<watt_per_meter_kelvin>();
        let soil_x = input.reference_depth.as_ref().get::<meter>();

        let qc = core::conduction(k_soil, delta_t, soil_x);
        let et = core::evaporation(
            input.net_irradiation.get::<watt_per_square_meter>(),
            input.latent_heat_flux.get::<watt_per_square_meter>(),
        );

        Ok(PointOutput {
            conduction: HeatFluxDensity::new::<watt_per_square_meter>(qc),
            et_rate: NonNegative::new(Velocity::new::<meter_per_second>(et))?,
        })
    }
}
