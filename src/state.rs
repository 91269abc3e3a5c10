/// A point on a trajectory: position and velocity of the axis.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    pub position: f64,
    pub velocity: f64,
}

impl State {
    /// Creates a new State.
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    /// Returns a copy with position and velocity multiplied by `direction` (+1.0 or -1.0).
    pub(crate) fn directed(self, direction: f64) -> Self {
        Self {
            position: self.position * direction,
            velocity: self.velocity * direction,
        }
    }

    /// Returns a copy with the velocity clamped to `[-limit, limit]`.
    pub(crate) fn with_velocity_limit(self, limit: f64) -> Self {
        Self {
            position: self.position,
            velocity: self.velocity.clamp(-limit, limit),
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

impl From<(f64, f64)> for State {
    fn from((position, velocity): (f64, f64)) -> Self {
        Self::new(position, velocity)
    }
}
