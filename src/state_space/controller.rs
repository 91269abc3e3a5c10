use nalgebra::{SMatrix, SVector};

use super::{saturate, Control, Plant};
use crate::error::{ProfileError, Result};

/// State feedback with reference feedforward:
/// `u = K (r - x) + Kff (r' - A r)`, clamped to `[u_min, u_max]`.
///
/// `r` is the reference of the current step and `r'` the one requested for the next step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Controller<const S: usize, const I: usize> {
    pub k: SMatrix<f64, I, S>,
    pub kff: SMatrix<f64, I, S>,
    pub a: SMatrix<f64, S, S>,
    r: SVector<f64, S>,
    u_min: SVector<f64, I>,
    u_max: SVector<f64, I>,
}

impl<const S: usize, const I: usize> Controller<S, I> {
    /// Creates an unsaturated controller with a zero reference.
    pub fn new(k: SMatrix<f64, I, S>, kff: SMatrix<f64, I, S>, a: SMatrix<f64, S, S>) -> Self {
        Self {
            k,
            kff,
            a,
            r: SVector::zeros(),
            u_min: SVector::repeat(f64::NEG_INFINITY),
            u_max: SVector::repeat(f64::INFINITY),
        }
    }

    /// Creates a controller for `plant` with feedforward `Kff = (B^T B)^-1 B^T`.
    pub fn with_plant_feedforward<const O: usize>(
        k: SMatrix<f64, I, S>,
        plant: &Plant<S, I, O>,
    ) -> Result<Self> {
        let bt = plant.b.transpose();
        let kff = (bt * plant.b)
            .try_inverse()
            .ok_or(ProfileError::Domain("B^T B is not invertible"))?
            * bt;
        Ok(Self::new(k, kff, plant.a))
    }

    /// Bounds the produced input element-wise.
    pub fn with_input_limits(mut self, u_min: SVector<f64, I>, u_max: SVector<f64, I>) -> Self {
        self.u_min = u_min;
        self.u_max = u_max;
        self
    }

    pub fn reference(&self) -> SVector<f64, S> {
        self.r
    }

    /// Moves the reference without producing feedforward for the jump.
    pub fn set_reference(&mut self, r: SVector<f64, S>) {
        self.r = r;
    }

    pub fn input_limits(&self) -> (SVector<f64, I>, SVector<f64, I>) {
        (self.u_min, self.u_max)
    }
}

impl<const S: usize, const I: usize> Control<S, I> for Controller<S, I> {
    fn control(&mut self, x: &SVector<f64, S>, r: &SVector<f64, S>) -> SVector<f64, I> {
        let u = self.k * (self.r - x) + self.kff * (r - self.a * self.r);
        self.r = *r;
        saturate(&u, &self.u_min, &self.u_max)
    }
}
