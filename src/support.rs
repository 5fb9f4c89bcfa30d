//! Supporting utilities for framework components.
//!
//! - [`bmi`]: Capability traits and metadata tables.
//! - [`constraint`]: Numeric constraints checked at construction.
//! - [`field`]: Scalar-or-grid values.
//! - [`model_input`]: Reading auxiliary inputs from files.
//! - [`units`]: Extensions to [`uom`].

pub mod bmi;
pub mod constraint;
pub mod field;
pub mod model_input;
pub mod units;
