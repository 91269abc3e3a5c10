use crate::error::{ProfileError, Result};

/// Velocity and acceleration limits of a single axis.
///
/// Both limits are absolute values and apply in either direction of travel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    max_velocity: f64,
    max_acceleration: f64,
}

impl Constraints {
    /// Creates a new set of limits.
    ///
    /// Returns [`ProfileError::Domain`] for NaN/infinite limits and
    /// [`ProfileError::InvalidConstraints`] when either limit is not strictly positive.
    pub fn new(max_velocity: f64, max_acceleration: f64) -> Result<Self> {
        if !max_velocity.is_finite() || !max_acceleration.is_finite() {
            return Err(ProfileError::Domain("constraints must be finite"));
        }
        if max_velocity <= 0.0 || max_acceleration <= 0.0 {
            return Err(ProfileError::InvalidConstraints {
                max_velocity,
                max_acceleration,
            });
        }
        Ok(Self {
            max_velocity,
            max_acceleration,
        })
    }

    /// Re-runs the checks of [`Constraints::new`].
    ///
    /// Useful for values obtained through deserialization, which bypasses `new`.
    pub fn validate(self) -> Result<Self> {
        Self::new(self.max_velocity, self.max_acceleration)
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }
}
