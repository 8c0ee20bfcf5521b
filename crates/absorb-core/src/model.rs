//! Empirical coefficient sets for the Delany-Bazley family of models.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which empirical fit parameterizes the impedance formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelVariant {
    /// Original Delany-Bazley fit.
    #[default]
    Default,
    /// Miki's refit.
    Miki,
    /// Allard and Champoux's refit.
    AllardChampoux,
}

/// How the dimensionless frequency `X` is formed from `f` and σ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// `X = 1000·f / σ`
    PerKiloHertz,
    /// `X = ρ·f / σ`
    AirDensity,
}

impl Normalization {
    pub fn apply(self, frequency: f64, flow_resistivity: f64, air_density: f64) -> f64 {
        match self {
            Normalization::PerKiloHertz => 1e3 * frequency / flow_resistivity,
            Normalization::AirDensity => air_density * frequency / flow_resistivity,
        }
    }
}

/// A real-valued power law term `scale · X^exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub scale: f64,
    pub exponent: f64,
}

impl PowerLaw {
    const fn new(scale: f64, exponent: f64) -> Self {
        Self { scale, exponent }
    }

    /// `X` is positive for valid inputs, so `powf` stays in the real domain.
    pub fn eval(&self, x: f64) -> f64 {
        self.scale * x.powf(self.exponent)
    }
}

/// The four power laws of one variant.
///
/// ```text
/// zc = ρc · (1 + resistance(X) + i·reactance(X))
/// kc = (ω/c) · (1 + attenuation(X) + i·phase(X))
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmpiricalCoefficients {
    pub normalization: Normalization,
    pub resistance: PowerLaw,
    pub reactance: PowerLaw,
    pub attenuation: PowerLaw,
    pub phase: PowerLaw,
}

const DELANY_BAZLEY: EmpiricalCoefficients = EmpiricalCoefficients {
    normalization: Normalization::PerKiloHertz,
    resistance: PowerLaw::new(9.08, -0.75),
    reactance: PowerLaw::new(-11.9, -0.73),
    attenuation: PowerLaw::new(10.8, -0.7),
    phase: PowerLaw::new(-10.3, -0.59),
};

const MIKI: EmpiricalCoefficients = EmpiricalCoefficients {
    normalization: Normalization::PerKiloHertz,
    resistance: PowerLaw::new(5.50, -0.632),
    reactance: PowerLaw::new(-8.43, -0.632),
    attenuation: PowerLaw::new(7.81, -0.618),
    phase: PowerLaw::new(-11.41, -0.618),
};

// Normalized by air density rather than 1000, as published.
const ALLARD_CHAMPOUX: EmpiricalCoefficients = EmpiricalCoefficients {
    normalization: Normalization::AirDensity,
    resistance: PowerLaw::new(0.0571, -0.754),
    reactance: PowerLaw::new(-0.0870, -0.732),
    attenuation: PowerLaw::new(0.0978, -0.7),
    phase: PowerLaw::new(-0.1890, -0.595),
};

impl ModelVariant {
    pub const ALL: [ModelVariant; 3] = [
        ModelVariant::Default,
        ModelVariant::Miki,
        ModelVariant::AllardChampoux,
    ];

    pub fn coefficients(self) -> &'static EmpiricalCoefficients {
        match self {
            ModelVariant::Default => &DELANY_BAZLEY,
            ModelVariant::Miki => &MIKI,
            ModelVariant::AllardChampoux => &ALLARD_CHAMPOUX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelVariant::Default => "default",
            ModelVariant::Miki => "miki",
            ModelVariant::AllardChampoux => "allard-champoux",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelVariant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| Error::InvalidVariant(s.to_owned()))
    }
}

impl TryFrom<String> for ModelVariant {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ModelVariant> for String {
    fn from(v: ModelVariant) -> Self {
        v.as_str().to_owned()
    }
}
