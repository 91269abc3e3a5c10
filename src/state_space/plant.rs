use nalgebra::{SMatrix, SVector};

use super::Advance;

/// Linear discrete plant `x' = A x + B u`, `y = C x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plant<const S: usize, const I: usize, const O: usize> {
    pub a: SMatrix<f64, S, S>,
    pub b: SMatrix<f64, S, I>,
    pub c: SMatrix<f64, O, S>,
    x: SVector<f64, S>,
}

impl<const S: usize, const I: usize, const O: usize> Default for Plant<S, I, O> {
    /// Identity dynamics, no input or output coupling, zero state.
    fn default() -> Self {
        Self {
            a: SMatrix::identity(),
            b: SMatrix::zeros(),
            c: SMatrix::zeros(),
            x: SVector::zeros(),
        }
    }
}

impl<const S: usize, const I: usize, const O: usize> Plant<S, I, O> {
    /// Creates a plant with the given gains, starting at the zero state.
    pub fn new(a: SMatrix<f64, S, S>, b: SMatrix<f64, S, I>, c: SMatrix<f64, O, S>) -> Self {
        Self {
            a,
            b,
            c,
            x: SVector::zeros(),
        }
    }

    pub fn with_state(mut self, x: SVector<f64, S>) -> Self {
        self.x = x;
        self
    }

    pub fn state(&self) -> SVector<f64, S> {
        self.x
    }

    pub fn set_state(&mut self, x: SVector<f64, S>) {
        self.x = x;
    }

    /// Returns the output `C x` for the current state.
    pub fn output(&self) -> SVector<f64, O> {
        self.c * self.x
    }
}

impl<const S: usize, const I: usize, const O: usize> Advance<S, I> for Plant<S, I, O> {
    fn advance(&mut self, u: &SVector<f64, I>) -> SVector<f64, S> {
        self.x = self.a * self.x + self.b * u;
        self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix1x2, Matrix2, Vector1, Vector2};

    #[test]
    fn default_is_identity() {
        let plant = Plant::<2, 1, 1>::default();
        assert_eq!(plant.a, Matrix2::identity());
        assert_eq!(plant.state(), Vector2::zeros());
    }

    #[test]
    fn keeps_given_gains() {
        let a = Matrix2::new(0.0, 1.0, 2.0, 3.0);
        let b = Vector2::new(4.0, 5.0);
        let c = Matrix1x2::new(6.0, 7.0);
        let plant = Plant::new(a, b, c).with_state(Vector2::new(1.0, 1.0));
        assert_eq!(plant.a, a);
        assert_eq!(plant.b, b);
        assert_eq!(plant.c, c);
        assert_eq!(plant.output(), Vector1::new(13.0));
    }

    #[test]
    fn stable_plant_converges_to_zero() {
        let a = Matrix2::new(1.0, 0.01, -0.05, 0.95);
        let mut plant = Plant::<2, 1, 1>::new(a, Vector2::zeros(), Matrix1x2::zeros())
            .with_state(Vector2::new(1.0, 1.0));
        let u = Vector1::zeros();
        for _ in 0..2000 {
            plant.advance(&u);
        }
        assert_abs_diff_eq!(plant.state(), Vector2::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn unstable_plant_diverges() {
        let a = Matrix2::new(1.0, 0.01, 0.05, 0.99);
        let mut plant = Plant::<2, 1, 1>::new(a, Vector2::zeros(), Matrix1x2::zeros())
            .with_state(Vector2::new(1.0, 0.0));
        let u = Vector1::zeros();
        for _ in 0..1000 {
            plant.advance(&u);
        }
        assert!(plant.state()[0] > 1e6);
        assert!(plant.state()[1] > 1e6);
    }
}
