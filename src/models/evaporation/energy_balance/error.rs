//! Error type for the energy-balance ET component and point model.

use thiserror::Error;

use crate::support::{
    bmi::MetadataError, constraint::ConstraintError, field::FieldError, model_input::InputError,
};

use super::ConfigError;

/// Errors that can occur while running the energy-balance ET component.
#[derive(Debug, Error)]
pub enum EtError {
    /// A reference depth of zero would make the conductive flux non-finite.
    #[error("soil temperature reference depth must not be zero")]
    ZeroReferenceDepth,

    /// A NaN reference depth leaves the conductive flux undefined.
    #[error("soil temperature reference depth is not a number")]
    NanReferenceDepth,

    /// A computed quantity violates its physical bound.
    #[error("non-physical result")]
    NonPhysical(#[from] ConstraintError),

    /// Gridded inputs could not be combined.
    #[error("incompatible input fields")]
    Field(#[from] FieldError),

    /// A variable lookup or binding failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// An auxiliary input file could not be opened or read.
    #[error("auxiliary input {input} failed")]
    Input {
        /// Standardized identifier of the input.
        input: &'static str,

        #[source]
        source: InputError,
    },

    /// The configuration is invalid.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    /// A run operation was called before [`initialize`](super::EnergyBalanceEt::initialize).
    #[error("component has not been initialized")]
    NotInitialized,
}
