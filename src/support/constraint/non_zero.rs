use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is non-zero (not equal to zero).
///
/// Used for quantities that appear as divisors, such as the depth at which
/// a reference soil temperature is measured.
///
/// # Examples
///
/// ```
/// use evap_energy_balance::support::constraint::{Constraint, NonZero};
/// use uom::si::{f64::Length, length::meter};
///
/// let depth = NonZero::new(Length::new::<meter>(0.5)).unwrap();
/// assert_eq!(depth.into_inner().get::<meter>(), 0.5);
///
/// assert!(NonZero::check(&0.0).is_err());
/// assert!(NonZero::check(&f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonZero;

impl NonZero {
    /// Constructs a [`Constrained<T, NonZero>`] if the value is not zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(value: T) -> Result<Constrained<T, NonZero>, ConstraintError> {
        Constrained::<T, NonZero>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonZero {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Less) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Length, length::meter};

    #[test]
    fn floats() {
        assert!(NonZero::new(1.0).is_ok());
        assert!(NonZero::new(-0.25).is_ok());
        assert_eq!(NonZero::new(0.0), Err(ConstraintError::Zero));
        assert_eq!(NonZero::new(-0.0), Err(ConstraintError::Zero));
        assert_eq!(NonZero::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn depths() {
        assert!(NonZero::new(Length::new::<meter>(1.0)).is_ok());
        assert!(NonZero::new(Length::new::<meter>(0.0)).is_err());
    }
}
