//! Surface energy balance kernels.
//!
//! Conduction between the surface and a reference depth follows Fourier's
//! law. Evaporation converts the net energy left after the latent heat flux
//! into a water-depth rate, floored at zero since condensation is not
//! modeled. A NaN energy balance stays NaN rather than being floored.
//!
//! The conductive flux is reported but does not enter the energy available
//! for evaporation: `Qet = Q_sum - Qe`.

use crate::support::{
    constraint::{Constraint, ConstraintError, NonZero},
    field::Field,
};

use super::EtError;

/// Density of liquid water [kg m-3].
pub(crate) const RHO_WATER: f64 = 1000.0;

/// Latent heat of vaporization [J kg-1].
pub(crate) const LATENT_HEAT_VAPORIZATION: f64 = 2.5e6;

/// Energy needed to evaporate one cubic meter of water [J m-3].
pub(crate) const WATER_ENERGY_DENSITY: f64 = RHO_WATER * LATENT_HEAT_VAPORIZATION;

/// Conductive flux [W m-2] for a temperature difference `T_soil_x - T_surf`.
///
/// Positive when the subsurface is warmer than the surface.
pub(crate) fn conduction(k_soil: f64, delta_t: f64, soil_x: f64) -> f64 {
    k_soil * delta_t / soil_x
}

/// Evaporation rate [m s-1] from net irradiation and latent heat flux [W m-2].
pub(crate) fn evaporation(q_sum: f64, qe: f64) -> f64 {
    let rate = (q_sum - qe) / WATER_ENERGY_DENSITY;
    // `f64::max` would turn NaN into zero.
    if rate < 0.0 { 0.0 } else { rate }
}

/// Conductive flux over scalar or gridded inputs.
///
/// # Errors
///
/// Returns [`EtError::ZeroReferenceDepth`] if any reference depth is zero,
/// [`EtError::NanReferenceDepth`] if any is NaN, or [`EtError::Field`] if
/// grid shapes differ.
pub(crate) fn conduction_flux(
    k_soil: &Field,
    t_soil_x: &Field,
    t_surf: &Field,
    soil_x: &Field,
) -> Result<Field, EtError> {
    check_reference_depth(soil_x)?;

    let delta_t = t_soil_x.zip_with(t_surf, |t_x, t_s| t_x - t_s)?;
    let gradient = k_soil.zip_with(&delta_t, |k, dt| k * dt)?;
    Ok(gradient.zip_with(soil_x, |g, x| g / x)?)
}

/// Evaporation rate over scalar or gridded inputs.
///
/// # Errors
///
/// Returns [`EtError::Field`] if grid shapes differ.
pub(crate) fn et_rate(q_sum: &Field, qe: &Field) -> Result<Field, EtError> {
    Ok(q_sum.zip_with(qe, evaporation)?)
}

/// Volume of water evaporated over one step [m3].
pub(crate) fn evaporated_volume(et: &Field, dt: f64, cell_area: f64, n_cells: usize) -> f64 {
    et.total(n_cells) * dt * cell_area
}

fn check_reference_depth(soil_x: &Field) -> Result<(), EtError> {
    soil_x
        .try_for_each(|x| NonZero::check(&x))
        .map_err(|err| match err {
            ConstraintError::Zero => EtError::ZeroReferenceDepth,
            ConstraintError::NotANumber => EtError::NanReferenceDepth,
            other => EtError::NonPhysical(other),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    use crate::support::field::FieldError;

    #[test]
    fn scenario_a() {
        let qc = conduction(0.45, 15.0 - 10.0, 1.0);
        assert_relative_eq!(qc, 2.25, epsilon = 1e-12);

        let et = evaporation(300.0, 50.0);
        assert_relative_eq!(et, 1.0e-7, epsilon = 1e-20);
    }

    #[test]
    fn energy_deficit_gives_zero_et() {
        assert_eq!(evaporation(50.0, 100.0), 0.0);
        assert_eq!(evaporation(100.0, 100.0), 0.0);
        assert_eq!(evaporation(-20.0, 0.0), 0.0);
    }

    #[test]
    fn nan_energy_balance_is_not_floored() {
        assert!(evaporation(f64::NAN, 50.0).is_nan());
        assert!(evaporation(300.0, f64::NAN).is_nan());

        let et = et_rate(
            &Field::Grid(array![[f64::NAN, 300.0]]),
            &Field::Scalar(50.0),
        )
        .unwrap();
        let Field::Grid(et) = et else {
            panic!("expected a grid");
        };
        assert!(et[[0, 0]].is_nan());
        assert_relative_eq!(et[[0, 1]], 1.0e-7, epsilon = 1e-20);
    }

    #[test]
    fn conduction_sign_follows_temperature_gradient() {
        assert!(conduction(1.0, 5.0 - 2.0, 0.5) > 0.0);
        assert!(conduction(1.0, 2.0 - 5.0, 0.5) < 0.0);
        assert_eq!(conduction(1.0, 3.0 - 3.0, 0.5), 0.0);
    }

    #[test]
    fn conduction_does_not_enter_available_energy() {
        // Large upward conduction leaves ET unchanged.
        let q_sum = Field::Scalar(300.0);
        let qe = Field::Scalar(50.0);
        let warm = conduction_flux(
            &Field::Scalar(1.0),
            &Field::Scalar(40.0),
            &Field::Scalar(0.0),
            &Field::Scalar(0.5),
        )
        .unwrap();
        assert_eq!(warm, Field::Scalar(80.0));
        assert_eq!(et_rate(&q_sum, &qe).unwrap(), Field::Scalar(1.0e-7));
    }

    #[test]
    fn gridded_inputs_are_elementwise() {
        let qc = conduction_flux(
            &Field::Scalar(0.5),
            &Field::Grid(array![[10.0, 12.0], [8.0, 6.0]]),
            &Field::Grid(array![[10.0, 10.0], [10.0, 10.0]]),
            &Field::Grid(array![[1.0, 2.0], [0.5, 0.25]]),
        )
        .unwrap();
        assert_eq!(qc, Field::Grid(array![[0.0, 0.5], [-2.0, -8.0]]));

        let et = et_rate(
            &Field::Grid(array![[300.0, 10.0]]),
            &Field::Grid(array![[50.0, 20.0]]),
        )
        .unwrap();
        assert_eq!(et.shape(), Some((1, 2)));
        let Field::Grid(et) = et else {
            panic!("expected a grid");
        };
        assert_relative_eq!(et[[0, 0]], 1.0e-7, epsilon = 1e-20);
        assert_eq!(et[[0, 1]], 0.0);
    }

    #[test]
    fn mismatched_grids_are_rejected() {
        let err = et_rate(
            &Field::Grid(array![[1.0, 2.0]]),
            &Field::Grid(array![[1.0], [2.0]]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EtError::Field(FieldError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn zero_reference_depth_is_reported() {
        let err = conduction_flux(
            &Field::Scalar(0.45),
            &Field::Scalar(15.0),
            &Field::Scalar(10.0),
            &Field::Grid(array![[1.0, 0.0]]),
        )
        .unwrap_err();
        assert!(matches!(err, EtError::ZeroReferenceDepth));
    }

    #[test]
    fn nan_reference_depth_is_not_called_zero() {
        let err = conduction_flux(
            &Field::Scalar(0.45),
            &Field::Scalar(15.0),
            &Field::Scalar(10.0),
            &Field::Scalar(f64::NAN),
        )
        .unwrap_err();
        assert!(matches!(err, EtError::NanReferenceDepth));
        assert!(!err.to_string().contains("zero"));
    }

    #[test]
    fn volume_scales_scalar_rates_by_cell_count() {
        let et = Field::Scalar(1.0e-7);
        assert_relative_eq!(
            evaporated_volume(&et, 3600.0, 900.0, 4),
            1.0e-7 * 3600.0 * 900.0 * 4.0,
            epsilon = 1e-12
        );
    }
}
