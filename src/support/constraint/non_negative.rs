use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is non-negative (zero or greater).
///
/// # Examples
///
/// ```
/// use evap_energy_balance::support::constraint::NonNegative;
/// use uom::si::{f64::Velocity, velocity::meter_per_second};
///
/// let et = NonNegative::new(Velocity::new::<meter_per_second>(1.0e-7)).unwrap();
/// assert_eq!(et.into_inner().get::<meter_per_second>(), 1.0e-7);
///
/// assert!(NonNegative::new(-1.0e-9).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Velocity, velocity::meter_per_second};

    #[test]
    fn floats() {
        assert!(Constrained::<f64, NonNegative>::new(2.0).is_ok());
        assert!(NonNegative::new(0.0).is_ok());
        assert_eq!(NonNegative::new(-2.0), Err(ConstraintError::Negative));
        assert_eq!(NonNegative::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn evaporation_rates() {
        let rate = Velocity::new::<meter_per_second>(3.0e-8);
        assert!(NonNegative::new(rate).is_ok());

        let zero = NonNegative::new(Velocity::new::<meter_per_second>(0.0)).unwrap();
        assert_eq!(zero.into_inner().get::<meter_per_second>(), 0.0);

        let rate = Velocity::new::<meter_per_second>(-3.0e-8);
        assert!(NonNegative::new(rate).is_err());
    }
}
