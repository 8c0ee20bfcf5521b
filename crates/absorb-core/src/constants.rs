/// Air density (kg/m³) used by the reference Delany-Bazley evaluations.
pub const REFERENCE_AIR_DENSITY: f64 = 1.213;

/// Speed of sound (m/s) used by the reference Delany-Bazley evaluations.
pub const REFERENCE_SOUND_SPEED: f64 = 342.2;

/// Default sweep: 100 Hz to 10 kHz in 1 Hz steps.
pub const DEFAULT_SWEEP_START: f64 = 100.0;
pub const DEFAULT_SWEEP_STOP: f64 = 10_000.0;
pub const DEFAULT_SWEEP_STEP: f64 = 1.0;

/// A complex denominator whose norm is at or below this is treated as zero.
/// The `zs + Z0` check scales it by Z0; the `sin(kc·d)` check uses it as is.
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Speed of sound in air (m/s) and density (kg/m³) as a function of
/// temperature in °C. Uses the ideal-gas approximation.
pub fn speed_of_sound_and_density(temperature_c: f64) -> (f64, f64) {
    let t_kelvin = temperature_c + 273.15;
    // c = 331.3 * sqrt(T/273.15)
    let c = 331.3 * (t_kelvin / 273.15).sqrt();
    // ρ = p / (R_specific * T), with p = 101325 Pa, R_specific = 287.05 J/(kg·K)
    let rho = 101325.0 / (287.05 * t_kelvin);
    (c, rho)
}

/// Characteristic impedance of air, ρ·c (Pa·s/m).
pub fn characteristic_impedance(sound_speed: f64, air_density: f64) -> f64 {
    air_density * sound_speed
}
