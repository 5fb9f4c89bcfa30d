//! Public land-surface process models.
//!
//! Models are organized into process-specific submodules (e.g.,
//! `evaporation`). Each model keeps its computation in an internal `core`
//! module; the public component and [`twine_core::Model`] types are thin
//! adapters over it.

pub mod evaporation;
