use crate::constants::SINGULARITY_TOLERANCE;
use crate::error::{ensure_positive, Error, Result};
use crate::parallel::map_indexed;
use num_complex::Complex64;

/// Beyond this |Im(z)| the complex tangent equals ±i to double precision.
const TAN_SATURATION: f64 = 20.0;

/// `cos(z) / sin(z)` together with `sin(z)`, which callers only test for zero.
///
/// Saturates to ∓i (the `sin` slot then holds a unit value) instead of overflowing `cosh` for deeply attenuating
/// layers. The cotangent has no pole at odd multiples of π/2, only at
/// multiples of π where `sin(z)` vanishes.
fn cot_and_sin(z: Complex64) -> (Complex64, Complex64) {
    if z.im.abs() > TAN_SATURATION {
        let i_sign = Complex64::new(0.0, z.im.signum());
        (-i_sign, i_sign)
    } else {
        let sin = z.sin();
        (z.cos() / sin, sin)
    }
}

/// Normal-incidence absorption of one rigidly backed layer.
///
/// ```text
/// zs = -i·zc / tan(kc·d) = -i·zc·cos(kc·d) / sin(kc·d)
/// R  = (zs - Z₀) / (zs + Z₀)
/// α  = 1 - |R|²
/// ```
///
/// `index` is only used to label a singularity error.
pub fn evaluate_at(
    index: usize,
    zc: Complex64,
    kc: Complex64,
    thickness: f64,
    air_impedance: f64,
) -> Result<f64> {
    let j = Complex64::new(0.0, 1.0);
    let z0 = Complex64::new(air_impedance, 0.0);

    // tan(kc·d) vanishes exactly where sin(kc·d) does.
    let (cot_kd, sin_kd) = cot_and_sin(kc * thickness);
    if sin_kd.norm() <= SINGULARITY_TOLERANCE || !cot_kd.is_finite() {
        log::trace!("singular tan(kc·d) at index {index}: kc = {kc}, d = {thickness}");
        return Err(Error::NumericSingularity {
            index,
            quantity: "tan(kc·thickness)",
        });
    }

    let zs = -j * zc * cot_kd;
    let denom = zs + z0;
    if !denom.is_finite() || denom.norm() <= SINGULARITY_TOLERANCE * air_impedance {
        log::trace!("singular zs + Z0 at index {index}: zs = {zs}");
        return Err(Error::NumericSingularity {
            index,
            quantity: "zs + air_impedance",
        });
    }

    let reflex = (zs - z0) / denom;
    Ok(1.0 - reflex.norm_sqr())
}

/// Absorption coefficient for each `(zc, kc)` pair.
///
/// Values are not clamped; a valid passive material lands in `[0, 1]`.
pub fn evaluate(
    zc: &[Complex64],
    kc: &[Complex64],
    thickness: f64,
    air_impedance: f64,
) -> Result<Vec<f64>> {
    if zc.len() != kc.len() {
        return Err(Error::invalid(
            "wave_number",
            format!(
                "length {} does not match impedance length {}",
                kc.len(),
                zc.len()
            ),
        ));
    }
    ensure_positive("thickness", thickness)?;
    ensure_positive("air_impedance", air_impedance)?;

    log::debug!(
        "absorption: d={thickness} m, Z0={air_impedance}, {} frequencies",
        zc.len()
    );

    map_indexed(zc.len(), |i| {
        evaluate_at(i, zc[i], kc[i], thickness, air_impedance)
    })
}

/// Public entry point; identical to [`evaluate`].
pub fn compute_absorption(
    impedance: &[Complex64],
    wave_number: &[Complex64],
    thickness: f64,
    air_impedance: f64,
) -> Result<Vec<f64>> {
    evaluate(impedance, wave_number, thickness, air_impedance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impedance;
    use crate::model::ModelVariant;
    use crate::sweep::FrequencySweep;
    use crate::MaterialParameters;
    use std::f64::consts::PI;

    const RHO: f64 = 1.213;
    const C: f64 = 342.2;

    fn z0() -> f64 {
        RHO * C
    }

    #[test]
    fn test_known_value_default_variant() {
        let imp = impedance::compute_impedance(20000.0, RHO, C, &[1000.0], ModelVariant::Default)
            .unwrap();
        let alpha = evaluate(&imp.characteristic_impedance, &imp.wave_number, 0.05, z0()).unwrap();
        assert_eq!(alpha.len(), 1);
        let expected = 0.9417653891201795;
        assert!(
            (alpha[0] - expected).abs() < 1e-9,
            "alpha = {}, expected {expected}",
            alpha[0]
        );
    }

    #[test]
    fn test_known_values_other_variants() {
        for (variant, expected) in [
            (ModelVariant::Miki, 0.937293791083433),
            (ModelVariant::AllardChampoux, 0.9434408700857455),
        ] {
            let imp = impedance::compute_impedance(20000.0, RHO, C, &[1000.0], variant).unwrap();
            let alpha =
                evaluate(&imp.characteristic_impedance, &imp.wave_number, 0.05, z0()).unwrap();
            assert!(
                (alpha[0] - expected).abs() < 1e-9,
                "{variant}: alpha = {}, expected {expected}",
                alpha[0]
            );
        }
    }

    #[test]
    fn test_absorption_within_unit_interval() {
        let sweep = FrequencySweep::default();
        for variant in ModelVariant::ALL {
            for sigma in [5000.0, 20000.0, 80000.0] {
                let material = MaterialParameters::new(sigma, RHO, C);
                let imp = impedance::evaluate(&material, &sweep, variant).unwrap();
                for thickness in [0.05, 0.1, 0.2] {
                    let alpha =
                        evaluate(&imp.characteristic_impedance, &imp.wave_number, thickness, z0())
                            .unwrap();
                    assert_eq!(alpha.len(), sweep.len());
                    for (i, &a) in alpha.iter().enumerate() {
                        assert!(
                            (-1e-9..=1.0 + 1e-9).contains(&a),
                            "{variant}, sigma={sigma}, d={thickness}: alpha[{i}] = {a} at {} Hz",
                            sweep[i]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_thin_resistive_layer_not_clamped() {
        // Outside the fit's range the formula can dip just below zero.
        let material = MaterialParameters::new(80000.0, RHO, C);
        let imp = impedance::evaluate(&material, &[100.0], ModelVariant::Default).unwrap();
        let alpha = evaluate(&imp.characteristic_impedance, &imp.wave_number, 0.01, z0()).unwrap();
        assert!(
            (alpha[0] - (-0.008897269419205767)).abs() < 1e-9,
            "alpha = {}",
            alpha[0]
        );
    }

    #[test]
    fn test_thick_layer_matches_semi_infinite() {
        // Deep into the material tan(kc·d) → -i, so zs → zc.
        let material = MaterialParameters::new(20000.0, RHO, C);
        let (zc, kc) = impedance::evaluate_at(&material, 2000.0, ModelVariant::Default);
        let alpha = evaluate_at(0, zc, kc, 2.0, z0()).unwrap();
        let r = (zc - z0()) / (zc + z0());
        let expected = 1.0 - r.norm_sqr();
        assert!((alpha - expected).abs() < 1e-9, "alpha = {alpha}, expected {expected}");
    }

    #[test]
    fn test_very_thin_layer_reflects() {
        let material = MaterialParameters::new(20000.0, RHO, C);
        let (zc, kc) = impedance::evaluate_at(&material, 500.0, ModelVariant::Miki);
        let alpha = evaluate_at(0, zc, kc, 1e-6, z0()).unwrap();
        assert!((0.0..0.01).contains(&alpha), "alpha = {alpha}");
    }

    #[test]
    fn test_extreme_attenuation_stays_finite() {
        // |Im(kc·d)| far past the point where cosh overflows.
        let zc = Complex64::new(900.0, -700.0);
        let kc = Complex64::new(400.0, -600.0);
        let alpha = evaluate_at(0, zc, kc, 1.0, z0()).unwrap();
        let r = (zc - z0()) / (zc + z0());
        assert!((alpha - (1.0 - r.norm_sqr())).abs() < 1e-12, "alpha = {alpha}");
    }

    #[test]
    fn test_cot_saturation_is_continuous() {
        for re in [0.3, 1.0, 2.5] {
            let z = Complex64::new(re, -TAN_SATURATION);
            let below = z.cos() / z.sin();
            let (above, _) = cot_and_sin(Complex64::new(re, -TAN_SATURATION - 1e-9));
            assert!((below - above).norm() < 1e-15, "re = {re}: {below} vs {above}");
            assert!((below - 1.0 / z.tan()).norm() < 1e-15, "re = {re}");
        }
    }

    #[test]
    fn test_odd_quarter_wave_multiples_are_not_singular() {
        // tan(kc·d) has a pole here; the cotangent form goes to zero.
        let d = 0.05;
        let zc = Complex64::new(z0(), 0.0);
        for n in [1.0, 3.0, 5.0] {
            let kc = Complex64::new(n * PI / (2.0 * d), 0.0);
            let alpha = evaluate_at(0, zc, kc, d, z0()).unwrap();
            assert!(alpha.abs() < 1e-9, "n = {n}: alpha = {alpha}");
        }

        // Lossy kc with Re(kc·d) = π/2 stays in the unit interval.
        let kc = Complex64::new(PI / (2.0 * d), -4.0);
        let alpha = evaluate_at(0, Complex64::new(600.0, -300.0), kc, d, z0()).unwrap();
        assert!((0.0..=1.0).contains(&alpha), "alpha = {alpha}");
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let zc = vec![Complex64::new(600.0, -300.0); 3];
        let kc = vec![Complex64::new(30.0, -18.0); 2];
        let err = evaluate(&zc, &kc, 0.05, z0());
        assert!(matches!(
            err,
            Err(Error::InvalidParameter { name: "wave_number", .. })
        ));
    }

    #[test]
    fn test_non_positive_thickness_and_impedance_rejected() {
        let zc = [Complex64::new(600.0, -300.0)];
        let kc = [Complex64::new(30.0, -18.0)];
        for d in [0.0, -0.05] {
            assert!(matches!(
                compute_absorption(&zc, &kc, d, z0()),
                Err(Error::InvalidParameter { name: "thickness", .. })
            ));
        }
        assert!(matches!(
            compute_absorption(&zc, &kc, 0.05, 0.0),
            Err(Error::InvalidParameter { name: "air_impedance", .. })
        ));
    }

    #[test]
    fn test_tan_zero_is_singular() {
        // Lossless kc with kc·d = π.
        let d = 0.05;
        let zc = [Complex64::new(600.0, -300.0); 2];
        let kc = [Complex64::new(30.0, -18.0), Complex64::new(PI / d, 0.0)];
        match evaluate(&zc, &kc, d, z0()) {
            Err(Error::NumericSingularity { index, quantity }) => {
                assert_eq!(index, 1);
                assert_eq!(quantity, "tan(kc·thickness)");
            }
            other => panic!("expected NumericSingularity, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_reflection_denominator_is_singular() {
        // tan(π/4) = 1 and zc = -i·Z0 give zs = -Z0.
        let d = 0.05;
        let zc = Complex64::new(0.0, -z0());
        let kc = Complex64::new(PI / (4.0 * d), 0.0);
        let err = evaluate_at(7, zc, kc, d, z0());
        assert!(matches!(
            err,
            Err(Error::NumericSingularity {
                index: 7,
                quantity: "zs + air_impedance"
            })
        ));
    }

    #[test]
    fn test_near_quarter_wave_tends_to_zero_absorption() {
        // Lossless layer with kc·d = π/2: zs → 0, R → -1.
        let d = 0.05;
        let zc = Complex64::new(z0(), 0.0);
        let kc = Complex64::new(PI / (2.0 * d), 0.0);
        let alpha = evaluate_at(0, zc, kc, d, z0()).unwrap();
        assert!(alpha.abs() < 1e-9, "alpha = {alpha}");
    }

    #[test]
    fn test_lossless_layer_absorbs_nothing() {
        // Lossless real zc and kc never absorb: |R| = 1.
        let zc = Complex64::new(2.0 * z0(), 0.0);
        let kc = Complex64::new(11.0, 0.0);
        let alpha = evaluate_at(0, zc, kc, 0.05, z0()).unwrap();
        assert!(alpha.abs() < 1e-12, "alpha = {alpha}");
    }
}
