pub mod absorption;
pub mod config;
pub mod constants;
pub mod error;
pub mod impedance;
pub mod model;
mod parallel;
pub mod sweep;

pub use absorption::compute_absorption;
pub use config::{AbsorberConfig, SweepConfig};
pub use error::{Error, Result};
pub use impedance::compute_impedance;
pub use model::ModelVariant;
pub use sweep::FrequencySweep;

use constants::{REFERENCE_AIR_DENSITY, REFERENCE_SOUND_SPEED};
use error::ensure_positive;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared interface types
// ---------------------------------------------------------------------------

/// Bulk properties of the porous material and the air saturating it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParameters {
    /// Static airflow resistivity σ in Pa·s/m².
    #[serde(default = "MaterialParameters::default_flow_resistivity")]
    pub flow_resistivity: f64,
    /// Air density in kg/m³.
    #[serde(default = "MaterialParameters::default_air_density")]
    pub air_density: f64,
    /// Speed of sound in air in m/s.
    #[serde(default = "MaterialParameters::default_sound_speed")]
    pub sound_speed: f64,
}

impl MaterialParameters {
    pub fn new(flow_resistivity: f64, air_density: f64, sound_speed: f64) -> Self {
        Self {
            flow_resistivity,
            air_density,
            sound_speed,
        }
    }

    /// Material with air properties derived from temperature in °C.
    pub fn at_temperature(flow_resistivity: f64, temperature_c: f64) -> Self {
        let (c, rho) = constants::speed_of_sound_and_density(temperature_c);
        Self::new(flow_resistivity, rho, c)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("flow_resistivity", self.flow_resistivity)?;
        ensure_positive("air_density", self.air_density)?;
        ensure_positive("sound_speed", self.sound_speed)?;
        Ok(())
    }

    /// ρ·c of the saturating air.
    pub fn air_impedance(&self) -> f64 {
        constants::characteristic_impedance(self.sound_speed, self.air_density)
    }

    fn default_flow_resistivity() -> f64 {
        20000.0
    }
    fn default_air_density() -> f64 {
        REFERENCE_AIR_DENSITY
    }
    fn default_sound_speed() -> f64 {
        REFERENCE_SOUND_SPEED
    }
}

impl Default for MaterialParameters {
    fn default() -> Self {
        Self::new(
            Self::default_flow_resistivity(),
            Self::default_air_density(),
            Self::default_sound_speed(),
        )
    }
}

/// Per-frequency characteristic impedance and wave number, index-aligned
/// with the sweep that produced them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImpedanceResult {
    /// Complex characteristic impedance zc (Pa·s/m).
    pub characteristic_impedance: Vec<Complex64>,
    /// Complex wave number kc (rad/m).
    pub wave_number: Vec<Complex64>,
}

impl ImpedanceResult {
    pub fn len(&self) -> usize {
        self.characteristic_impedance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characteristic_impedance.is_empty()
    }
}

/// Results of a full absorber evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsorberResult {
    /// Frequency bins in Hz (length N).
    pub frequencies: Vec<f64>,
    /// zc and kc at each frequency bin.
    pub impedance: ImpedanceResult,
    /// Normal-incidence absorption coefficient at each frequency bin.
    pub absorption: Vec<f64>,
}

/// Slack allowed around [0, 1] before an absorption value is reported.
const ABSORPTION_RANGE_SLACK: f64 = 1e-9;

/// Run the full pipeline: build the sweep, evaluate the impedance model,
/// then the absorption of the rigidly backed layer.
pub fn compute(config: &AbsorberConfig) -> Result<AbsorberResult> {
    let sweep = config.sweep.build()?;
    let impedance = impedance::evaluate(&config.material, &sweep, config.variant)?;
    let absorption = absorption::evaluate(
        &impedance.characteristic_impedance,
        &impedance.wave_number,
        config.thickness,
        config.air_impedance(),
    )?;

    let outside = absorption
        .iter()
        .filter(|a| !(-ABSORPTION_RANGE_SLACK..=1.0 + ABSORPTION_RANGE_SLACK).contains(*a))
        .count();
    if outside > 0 {
        log::warn!(
            "{outside} of {} absorption values fall outside [0, 1] (variant={}, sigma={}, d={})",
            absorption.len(),
            config.variant,
            config.material.flow_resistivity,
            config.thickness
        );
    }

    Ok(AbsorberResult {
        frequencies: sweep.into_inner(),
        impedance,
        absorption,
    })
}
