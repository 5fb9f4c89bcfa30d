//! Extensions to [`uom`].
//!
//! Typed quantities are used at the boundary of the point model, where
//! callers pass fluxes, temperatures and depths with explicit units.
//! This module provides what [`uom`] lacks for that purpose.
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait subtracts one absolute temperature
//! from another to get a temperature interval, as needed for a conduction
//! gradient between the soil surface and a reference depth:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::temperature_interval::degree_celsius as delta_celsius;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use evap_energy_balance::support::units::TemperatureDifference;
//!
//! let t_soil_x = ThermodynamicTemperature::new::<degree_celsius>(15.0);
//! let t_surf = ThermodynamicTemperature::new::<degree_celsius>(10.0);
//! let delta_t = t_soil_x.minus(t_surf);
//! assert!((delta_t.get::<delta_celsius>() - 5.0).abs() < 1e-9);
//! ```

mod temperature_difference;

pub use temperature_difference::TemperatureDifference;
