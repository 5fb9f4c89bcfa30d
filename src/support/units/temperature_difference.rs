use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// [`uom`] does not allow subtracting two [`ThermodynamicTemperature`]
/// values, because the result is an interval rather than an absolute
/// temperature. See [#380](https://github.com/iliekturtles/uom/issues/380).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::degree_celsius as delta_celsius,
        thermodynamic_temperature::degree_celsius,
    };

    #[test]
    fn warmer_subsurface_gives_positive_interval() {
        let t_soil_x = ThermodynamicTemperature::new::<degree_celsius>(4.0);
        let t_surf = ThermodynamicTemperature::new::<degree_celsius>(-6.0);

        assert_relative_eq!(
            t_soil_x.minus(t_surf).get::<delta_celsius>(),
            10.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            t_surf.minus(t_soil_x).get::<delta_celsius>(),
            -10.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn equal_temperatures_give_zero() {
        let t = ThermodynamicTemperature::new::<degree_celsius>(12.5);
        assert_relative_eq!(t.minus(t).get::<delta_kelvin>(), 0.0);
    }
}
