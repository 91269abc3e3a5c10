use thiserror::Error;

/// Errors produced while planning or querying a motion profile.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProfileError {
    /// Both limits must be strictly positive.
    #[error("invalid constraints: max_velocity = {max_velocity}, max_acceleration = {max_acceleration}")]
    InvalidConstraints {
        max_velocity: f64,
        max_acceleration: f64,
    },

    /// An input was NaN/infinite or otherwise outside what the profile can represent.
    #[error("domain error: {0}")]
    Domain(&'static str),

    /// `target` is not on the position span traversed by the profile.
    #[error("target {target} is outside the traversed span [{min}, {max}]")]
    OutOfRange { target: f64, min: f64, max: f64 },
}

pub type Result<T> = core::result::Result<T, ProfileError>;
