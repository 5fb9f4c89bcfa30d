//! # Evap Energy Balance
//!
//! An energy-balance evapotranspiration (ET) component for modular
//! land-surface simulations.
//!
//! Given the net irradiation and latent heat fluxes from a meteorology
//! component, and soil temperatures, depth and conductivity from
//! configuration or files, the component computes a conductive soil heat
//! flux and an evaporation rate once per time step. It describes its
//! inputs and outputs with standardized variable identifiers so a
//! framework can couple it to other components generically.
//!
//! ## Crate layout
//!
//! - [`models`]: The ET component and a stateless [`twine_core::Model`]
//!   adapter over the same physics.
//! - [`support`]: Supporting utilities used by models.
//!
//! Modules in [`support`] are part of the public API because they're
//! useful to other components, but their APIs are not stable.

pub mod models;
pub mod support;
