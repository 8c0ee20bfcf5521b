use crate::constants::{DEFAULT_SWEEP_START, DEFAULT_SWEEP_STEP, DEFAULT_SWEEP_STOP};
use crate::error::{ensure_positive, Error, Result};
use std::ops::Deref;

/// A validated, ordered list of evaluation frequencies in Hz.
///
/// Non-empty, every entry finite and strictly positive. Ordering only
/// matters for index alignment with the outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySweep(Vec<f64>);

/// Check that `frequencies` is a usable sweep.
pub(crate) fn validate_frequencies(frequencies: &[f64]) -> Result<()> {
    if frequencies.is_empty() {
        return Err(Error::invalid("frequencies", "sweep is empty"));
    }
    for (i, &f) in frequencies.iter().enumerate() {
        if !(f.is_finite() && f > 0.0) {
            return Err(Error::invalid(
                "frequencies",
                format!("entry {i} must be finite and positive, got {f}"),
            ));
        }
    }
    Ok(())
}

impl FrequencySweep {
    pub fn new(frequencies: Vec<f64>) -> Result<Self> {
        validate_frequencies(&frequencies)?;
        Ok(Self(frequencies))
    }

    /// Evenly spaced bins `start, start + step, ...` up to and including
    /// `stop` when it falls on the grid.
    pub fn linear(start: f64, stop: f64, step: f64) -> Result<Self> {
        ensure_positive("start", start)?;
        ensure_positive("step", step)?;
        ensure_positive("stop", stop)?;
        if stop < start {
            return Err(Error::invalid(
                "stop",
                format!("must not be below start ({start}), got {stop}"),
            ));
        }

        // Small slack so that e.g. (10000 - 100) / 1 lands on the last bin.
        let num_bins = ((stop - start) / step + 1e-9).floor() as usize + 1;
        let frequencies = (0..num_bins).map(|i| start + i as f64 * step).collect();
        Ok(Self(frequencies))
    }

    /// `points` bins spaced evenly on a log axis from `start` to `stop`.
    pub fn logarithmic(start: f64, stop: f64, points: usize) -> Result<Self> {
        ensure_positive("start", start)?;
        ensure_positive("stop", stop)?;
        if stop < start {
            return Err(Error::invalid(
                "stop",
                format!("must not be below start ({start}), got {stop}"),
            ));
        }
        match points {
            0 => Err(Error::invalid("points", "must be at least 1")),
            1 => Ok(Self(vec![start])),
            n => {
                let ratio = stop / start;
                let last = (n - 1) as f64;
                let frequencies = (0..n)
                    .map(|i| start * ratio.powf(i as f64 / last))
                    .collect();
                Ok(Self(frequencies))
            }
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Default for FrequencySweep {
    /// 100 Hz to 10 kHz in 1 Hz steps.
    fn default() -> Self {
        let span = DEFAULT_SWEEP_STOP - DEFAULT_SWEEP_START;
        let num_bins = (span / DEFAULT_SWEEP_STEP) as usize + 1;
        Self(
            (0..num_bins)
                .map(|i| DEFAULT_SWEEP_START + i as f64 * DEFAULT_SWEEP_STEP)
                .collect(),
        )
    }
}

impl Deref for FrequencySweep {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for FrequencySweep {
    type Error = Error;

    fn try_from(frequencies: Vec<f64>) -> Result<Self> {
        Self::new(frequencies)
    }
}
