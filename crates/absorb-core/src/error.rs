use thiserror::Error;

/// Errors raised while evaluating an absorber.
///
/// Every error aborts the whole sweep; no partial results are returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("unknown model variant `{0}` (expected one of: default, miki, allard-champoux)")]
    InvalidVariant(String),

    #[error("numeric singularity at index {index}: {quantity} is zero or non-finite")]
    NumericSingularity { index: usize, quantity: &'static str },

    #[error("malformed configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Require `value` to be finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(name, format!("must be finite, got {value}")));
    }
    if value <= 0.0 {
        return Err(Error::invalid(name, format!("must be positive, got {value}")));
    }
    Ok(())
}
