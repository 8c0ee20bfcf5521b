use crate::error::{Error, Result};
use crate::model::ModelVariant;
use crate::parallel::map_indexed;
use crate::sweep::validate_frequencies;
use crate::{ImpedanceResult, MaterialParameters};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Characteristic impedance `zc` and wave number `kc` at a single frequency.
///
/// Inputs are assumed valid; see [`evaluate`] for the checked form.
pub fn evaluate_at(
    material: &MaterialParameters,
    frequency: f64,
    variant: ModelVariant,
) -> (Complex64, Complex64) {
    let coeffs = variant.coefficients();
    let x = coeffs
        .normalization
        .apply(frequency, material.flow_resistivity, material.air_density);

    let r = 1.0 + coeffs.resistance.eval(x);
    let im = coeffs.reactance.eval(x);
    let zc = material.sound_speed * material.air_density * Complex64::new(r, im);

    let alpha = 1.0 + coeffs.attenuation.eval(x);
    let beta = coeffs.phase.eval(x);
    let kc = (2.0 * PI * frequency / material.sound_speed) * Complex64::new(alpha, beta);

    (zc, kc)
}

/// Evaluate `zc` and `kc` across a frequency sweep.
pub fn evaluate(
    material: &MaterialParameters,
    frequencies: &[f64],
    variant: ModelVariant,
) -> Result<ImpedanceResult> {
    material.validate()?;
    validate_frequencies(frequencies)?;

    log::debug!(
        "impedance: variant={variant}, sigma={}, {} frequencies",
        material.flow_resistivity,
        frequencies.len()
    );

    let pairs = map_indexed(frequencies.len(), |i| {
        let (zc, kc) = evaluate_at(material, frequencies[i], variant);
        if !(zc.is_finite() && kc.is_finite()) {
            return Err(Error::invalid(
                "frequencies",
                format!(
                    "entry {i} ({} Hz) overflows zc = {zc}, kc = {kc}",
                    frequencies[i]
                ),
            ));
        }
        Ok((zc, kc))
    })?;
    let (characteristic_impedance, wave_number) = pairs.into_iter().unzip();

    Ok(ImpedanceResult {
        characteristic_impedance,
        wave_number,
    })
}

/// Flat-argument entry point over [`evaluate`].
pub fn compute_impedance(
    flow_resistivity: f64,
    air_density: f64,
    sound_speed: f64,
    frequencies: &[f64],
    variant: ModelVariant,
) -> Result<ImpedanceResult> {
    let material = MaterialParameters::new(flow_resistivity, air_density, sound_speed);
    evaluate(&material, frequencies, variant)
}
