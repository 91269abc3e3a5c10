//! Discrete linear state-space helpers used to follow a motion profile.
//!
//! The loop is split into three capabilities that a caller composes:
//! [`Control`] turns a state and a reference into an input, [`Advance`] steps a plant model
//! and [`Observe`] corrects an estimate from a measurement. Any of them can be swapped or
//! left out without touching the others.

mod controller;
mod observer;
mod plant;

use nalgebra::{SMatrix, SVector, Vector2};

use crate::state::State;

pub use controller::Controller;
pub use observer::Observer;
pub use plant::Plant;

/// Feedback + feedforward control law.
pub trait Control<const S: usize, const I: usize> {
    /// Returns the input driving `x` along the reference, `r` being the reference for the
    /// next step.
    fn control(&mut self, x: &SVector<f64, S>, r: &SVector<f64, S>) -> SVector<f64, I>;
}

/// Plant update `x' = A x + B u`.
pub trait Advance<const S: usize, const I: usize> {
    /// Applies `u` for one step and returns the new state.
    fn advance(&mut self, u: &SVector<f64, I>) -> SVector<f64, S>;
}

/// State estimation from measured outputs.
pub trait Observe<const S: usize, const I: usize, const O: usize> {
    /// Corrects the estimate with measurement `y`, applies `u` and returns the new estimate.
    fn observe(&mut self, u: &SVector<f64, I>, y: &SVector<f64, O>) -> SVector<f64, S>;
}

/// Clamps every element of `value` to `[min, max]`.
pub fn saturate<const R: usize, const C: usize>(
    value: &SMatrix<f64, R, C>,
    min: &SMatrix<f64, R, C>,
    max: &SMatrix<f64, R, C>,
) -> SMatrix<f64, R, C> {
    value.zip_zip_map(min, max, |v, lo, hi| {
        if v < lo {
            lo
        } else if v > hi {
            hi
        } else {
            v
        }
    })
}

impl From<State> for Vector2<f64> {
    fn from(state: State) -> Self {
        Vector2::new(state.position, state.velocity)
    }
}

impl From<Vector2<f64>> for State {
    fn from(x: Vector2<f64>) -> Self {
        State::new(x[0], x[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn saturate_clamps_each_element() {
        let v = Vector3::new(-20.0, 3.0, 20.0);
        let lo = Vector3::repeat(-12.0);
        let hi = Vector3::repeat(12.0);
        assert_eq!(saturate(&v, &lo, &hi), Vector3::new(-12.0, 3.0, 12.0));
    }

    #[test]
    fn state_round_trips_through_vector() {
        let x: Vector2<f64> = State::new(1.5, -0.25).into();
        assert_eq!(x, Vector2::new(1.5, -0.25));
        assert_eq!(State::from(x), State::new(1.5, -0.25));
    }
}
