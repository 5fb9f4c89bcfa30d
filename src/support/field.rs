//! Scalar-or-grid state values.
//!
//! Land-surface components exchange quantities that are either spatially
//! uniform (a single `f64`) or distributed over a rectangular grid.
//! [`Field`] captures both cases so a component can carry either
//! representation without re-deriving shapes every time step.
//!
//! Binary operations combine fields elementwise:
//!
//! - scalar ⊗ scalar yields a scalar,
//! - scalar ⊗ grid applies the scalar uniformly to every cell,
//! - grid ⊗ grid requires identical shapes and fails with
//!   [`FieldError::ShapeMismatch`] otherwise.
//!
//! Grids are never reshaped or broadcast along an axis.
//!
//! # Example
//!
//! ```
//! use evap_energy_balance::support::field::Field;
//! use ndarray::array;
//!
//! let t_soil = Field::Grid(array![[15.0, 12.0], [9.0, 10.0]]);
//! let t_surf = Field::Scalar(10.0);
//!
//! let delta_t = t_soil.zip_with(&t_surf, |a, b| a - b).unwrap();
//! assert_eq!(delta_t, Field::Grid(array![[5.0, 2.0], [-1.0, 0.0]]));
//! ```

use ndarray::{Array2, Zip};
use thiserror::Error;

/// A value that is either spatially uniform or gridded.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A single value applying to the whole domain.
    Scalar(f64),

    /// One value per grid cell, indexed `[row, col]`.
    Grid(Array2<f64>),
}

/// Errors produced when combining fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Two grids with different shapes were combined.
    #[error("grid shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}

impl Field {
    /// Returns `true` if this field is a single uniform value.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns the grid shape as `(nrows, ncols)`, or `None` for scalars.
    #[must_use]
    pub fn shape(&self) -> Option<(usize, usize)> {
        match self {
            Self::Scalar(_) => None,
            Self::Grid(grid) => Some(grid.dim()),
        }
    }

    /// Returns the scalar value, if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match *self {
            Self::Scalar(value) => Some(value),
            Self::Grid(_) => None,
        }
    }

    /// Combines two fields elementwise with `f(self, other)`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if both fields are grids of
    /// different shapes.
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self, FieldError> {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => Ok(Self::Scalar(f(*a, *b))),
            (Self::Scalar(a), Self::Grid(b)) => Ok(Self::Grid(b.mapv(|b| f(*a, b)))),
            (Self::Grid(a), Self::Scalar(b)) => Ok(Self::Grid(a.mapv(|a| f(a, *b)))),
            (Self::Grid(a), Self::Grid(b)) => {
                if a.dim() != b.dim() {
                    return Err(FieldError::ShapeMismatch {
                        left: a.dim(),
                        right: b.dim(),
                    });
                }
                Ok(Self::Grid(Zip::from(a).and(b).map_collect(|&a, &b| f(a, b))))
            }
        }
    }

    /// Calls `f` on every value, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_for_each<E>(&self, mut f: impl FnMut(f64) -> Result<(), E>) -> Result<(), E> {
        match self {
            Self::Scalar(value) => f(*value),
            Self::Grid(grid) => grid.iter().try_for_each(|&v| f(v)),
        }
    }

    /// Sums all values.
    ///
    /// A scalar is treated as covering `cells` grid cells, so the sum of a
    /// uniform field matches the sum of the equivalent grid.
    #[must_use]
    pub fn total(&self, cells: usize) -> f64 {
        match self {
            Self::Scalar(value) => value * cells as f64,
            Self::Grid(grid) => grid.sum(),
        }
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Array2<f64>> for Field {
    fn from(grid: Array2<f64>) -> Self {
        Self::Grid(grid)
    }
}
