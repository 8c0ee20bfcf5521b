use crate::constants::{
    characteristic_impedance, DEFAULT_SWEEP_START, DEFAULT_SWEEP_STEP, DEFAULT_SWEEP_STOP,
};
use crate::error::Result;
use crate::model::ModelVariant;
use crate::sweep::FrequencySweep;
use crate::MaterialParameters;
use serde::{Deserialize, Serialize};

/// Everything needed for one end-to-end absorber evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsorberConfig {
    #[serde(default)]
    pub variant: ModelVariant,
    /// Layer depth in metres.
    #[serde(default = "AbsorberConfig::default_thickness")]
    pub thickness: f64,
    /// Falls back to `air_density · sound_speed` when absent.
    #[serde(default)]
    pub air_impedance: Option<f64>,
    #[serde(default)]
    pub material: MaterialParameters,
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl AbsorberConfig {
    fn default_thickness() -> f64 {
        0.05
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn air_impedance(&self) -> f64 {
        self.air_impedance.unwrap_or_else(|| {
            characteristic_impedance(self.material.sound_speed, self.material.air_density)
        })
    }
}

impl Default for AbsorberConfig {
    fn default() -> Self {
        Self {
            variant: ModelVariant::default(),
            thickness: Self::default_thickness(),
            air_impedance: None,
            material: MaterialParameters::default(),
            sweep: SweepConfig::default(),
        }
    }
}

/// How the frequency sweep is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SweepConfig {
    Linear {
        #[serde(default = "SweepConfig::default_start")]
        start: f64,
        #[serde(default = "SweepConfig::default_stop")]
        stop: f64,
        #[serde(default = "SweepConfig::default_step")]
        step: f64,
    },
    Logarithmic {
        #[serde(default = "SweepConfig::default_start")]
        start: f64,
        #[serde(default = "SweepConfig::default_stop")]
        stop: f64,
        points: usize,
    },
    List {
        frequencies: Vec<f64>,
    },
}

impl SweepConfig {
    fn default_start() -> f64 {
        DEFAULT_SWEEP_START
    }
    fn default_stop() -> f64 {
        DEFAULT_SWEEP_STOP
    }
    fn default_step() -> f64 {
        DEFAULT_SWEEP_STEP
    }

    pub fn build(&self) -> Result<FrequencySweep> {
        match self {
            SweepConfig::Linear { start, stop, step } => {
                FrequencySweep::linear(*start, *stop, *step)
            }
            SweepConfig::Logarithmic {
                start,
                stop,
                points,
            } => FrequencySweep::logarithmic(*start, *stop, *points),
            SweepConfig::List { frequencies } => FrequencySweep::new(frequencies.clone()),
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig::Linear {
            start: Self::default_start(),
            stop: Self::default_stop(),
            step: Self::default_step(),
        }
    }
}
