use thiserror::Error;

use crate::profile::{Profile, PumpSetting};

/// A profile that breaks one of the schema rules.
///
/// Phase indices are zero-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("profile has no phases")]
    NoPhases,

    #[error("phase {index} has invalid duration {duration} (must be a positive number of seconds)")]
    InvalidDuration { index: usize, duration: f64 },

    #[error("phase {index} has pump power {power}% outside 0..=100")]
    PowerOutOfRange { index: usize, power: f64 },

    #[error("phase {index} has valve {valve} (expected 0 or 1)")]
    InvalidValve { index: usize, valve: u8 },
}

impl Profile {
    /// Check the schema rules, reporting the first violation found.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.phases.is_empty() {
            return Err(ProfileError::NoPhases);
        }
        for (index, phase) in self.phases.iter().enumerate() {
            if !(phase.duration.is_finite() && phase.duration > 0.0) {
                return Err(ProfileError::InvalidDuration {
                    index,
                    duration: phase.duration,
                });
            }
            if let PumpSetting::Power(power) = phase.pump {
                if !(0.0..=100.0).contains(&power) {
                    return Err(ProfileError::PowerOutOfRange { index, power });
                }
            }
            if phase.valve > 1 {
                return Err(ProfileError::InvalidValve {
                    index,
                    valve: phase.valve,
                });
            }
        }
        Ok(())
    }
}
