//! Evaporation and evapotranspiration models.
//!
//! Each model computes a water-loss rate from the surface energy budget
//! and exposes it to the coupling framework through the
//! [`support::bmi`](crate::support::bmi) capabilities.

pub mod energy_balance;
