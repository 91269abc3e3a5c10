use nalgebra::{SMatrix, SVector};

use super::{Advance, Observe, Plant};

/// Luenberger observer running its own copy of the plant model.
///
/// Each step first corrects the estimate with the measurement,
/// `x_post = x_hat + L (y - C x_hat)`, then predicts `x_hat' = A x_post + B u`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observer<const S: usize, const I: usize, const O: usize> {
    model: Plant<S, I, O>,
    pub l: SMatrix<f64, S, O>,
}

impl<const S: usize, const I: usize, const O: usize> Observer<S, I, O> {
    /// Starts estimating from the current state of `model`.
    pub fn new(model: Plant<S, I, O>, l: SMatrix<f64, S, O>) -> Self {
        Self { model, l }
    }

    pub fn estimate(&self) -> SVector<f64, S> {
        self.model.state()
    }

    pub fn model(&self) -> &Plant<S, I, O> {
        &self.model
    }
}

impl<const S: usize, const I: usize, const O: usize> Observe<S, I, O> for Observer<S, I, O> {
    fn observe(&mut self, u: &SVector<f64, I>, y: &SVector<f64, O>) -> SVector<f64, S> {
        let x_hat = self.model.state();
        let x_post = x_hat + self.l * (y - self.model.output());
        self.model.set_state(x_post);
        self.model.advance(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix1x2, Matrix2, Vector1, Vector2};

    fn motor() -> Plant<2, 1, 1> {
        Plant::new(
            Matrix2::new(1.0, 9.9502e-3, 0.0, 9.9005e-1),
            Vector2::new(4.9834e-5, 9.9502e-3),
            Matrix1x2::new(1.0, 0.0),
        )
    }

    #[test]
    fn converges_from_initial_error() {
        let mut plant = motor();
        let mut observer = Observer::new(plant, Vector2::new(1e-1, 1.0));
        plant.set_state(Vector2::new(1.0, 0.0));

        let u = Vector1::zeros();
        for _ in 0..1000 {
            plant.advance(&u);
            observer.observe(&u, &plant.output());
        }
        assert_abs_diff_eq!(observer.estimate(), plant.state(), epsilon = 1e-5);
    }

    #[test]
    fn converges_while_moving() {
        let mut plant = motor();
        let mut observer = Observer::new(plant, Vector2::new(1e-1, 1.0));
        plant.set_state(Vector2::new(1.0, 0.0));

        let u = Vector1::new(1.0);
        for _ in 0..1000 {
            observer.observe(&u, &plant.output());
            plant.advance(&u);
        }
        assert_abs_diff_eq!(observer.estimate(), plant.state(), epsilon = 1e-5);
    }

    #[test]
    fn position_stays_close_with_model_error() {
        let mut plant = motor();
        let mut observer = Observer::new(plant, Vector2::new(2e-1, 3.0));
        plant.a[(1, 1)] *= 0.985;
        plant.a[(0, 1)] *= 0.995;

        let u = Vector1::new(1.0);
        for _ in 0..1000 {
            observer.observe(&u, &plant.output());
            plant.advance(&u);
        }
        let error = observer.estimate() - plant.state();
        assert!(error[0].abs() < 1e-2);
        assert!(error[1].abs() < 1e-1);
        assert_ne!(observer.model().a, plant.a);
    }
}
