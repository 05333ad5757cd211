/// Errors raised while assembling an actor or validating its tunables.
///
/// These are fatal: an actor that fails to build never ticks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required collaborator: {role}")]
    MissingCollaborator { role: &'static str },
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Fails unless `value` is finite and strictly positive.
    pub fn require_positive(name: &'static str, value: f32) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::invalid(name, format!("must be > 0, got {value}")))
        }
    }

    /// Fails unless `value` is finite and not negative.
    pub fn require_non_negative(name: &'static str, value: f32) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::invalid(name, format!("must be >= 0, got {value}")))
        }
    }

    /// Fails unless `min <= max` and both are finite.
    pub fn require_range(name: &'static str, min: f32, max: f32) -> Result<(), Self> {
        if min.is_finite() && max.is_finite() && min <= max {
            Ok(())
        } else {
            Err(Self::invalid(name, format!("empty range [{min}, {max}]")))
        }
    }
}
