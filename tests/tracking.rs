use approx::assert_abs_diff_eq;
use nalgebra::{Matrix1x2, Matrix2, Vector1, Vector2};
use trapezoid_motion::state_space::{Advance, Control, Controller, Observe, Observer, Plant};
use trapezoid_motion::{Constraints, ProfileExecutor, State, TrapezoidProfile};

const DT: f64 = 0.01;

/// Double integrator sampled at `DT`, input is the acceleration.
fn double_integrator() -> Plant<2, 1, 1> {
    Plant::new(
        Matrix2::new(1.0, DT, 0.0, 1.0),
        Vector2::new(0.5 * DT * DT, DT),
        Matrix1x2::new(1.0, 0.0),
    )
}

#[test]
fn follows_profile_exactly_from_rest() {
    let constraints = Constraints::new(1.0, 1.0).unwrap();
    let profile =
        TrapezoidProfile::new(constraints, State::new(0.0, 0.0), State::new(3.0, 0.0)).unwrap();

    let mut plant = double_integrator();
    let mut controller =
        Controller::with_plant_feedforward(Matrix1x2::new(20.0, 8.0), &plant).unwrap();
    controller.set_reference(profile.calculate(0.0).into());

    let steps = ((profile.total_time() + 1.0) / DT) as usize;
    for k in 0..steps {
        let r: Vector2<f64> = profile.calculate((k + 1) as f64 * DT).into();
        let u = controller.control(&plant.state(), &r);
        // feedforward alone asks for at most the acceleration limit
        assert!(u[0].abs() <= constraints.max_acceleration() + 1e-6);
        plant.advance(&u);
        assert_abs_diff_eq!(plant.state(), r, epsilon = 1e-6);
    }

    let end = State::from(plant.state());
    assert_abs_diff_eq!(end.position, 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(end.velocity, 0.0, epsilon = 1e-6);
}

#[test]
fn recovers_from_offset_with_saturated_input() {
    let constraints = Constraints::new(1.0, 1.0).unwrap();
    let mut executor =
        ProfileExecutor::<4>::new(constraints, State::new(0.0, 0.0), 100).unwrap();
    assert!(executor.add_goal(State::new(3.0, 0.0)));

    let mut plant = double_integrator().with_state(Vector2::new(0.2, 0.0));
    let mut controller = Controller::with_plant_feedforward(Matrix1x2::new(20.0, 8.0), &plant)
        .unwrap()
        .with_input_limits(Vector1::new(-5.0), Vector1::new(5.0));
    controller.set_reference(executor.state().into());

    for _ in 0..700 {
        let r: Vector2<f64> = executor.tick().unwrap().into();
        let u = controller.control(&plant.state(), &r);
        assert!(u[0].abs() <= 5.0);
        plant.advance(&u);
    }

    assert!(executor.is_idle());
    assert_abs_diff_eq!(plant.state(), Vector2::new(3.0, 0.0), epsilon = 1e-6);
}

#[test]
fn observer_estimate_closes_the_loop() {
    let constraints = Constraints::new(1.0, 1.0).unwrap();
    let profile =
        TrapezoidProfile::new(constraints, State::new(0.0, 0.0), State::new(-2.0, 0.0)).unwrap();

    let mut plant = double_integrator();
    let mut observer = Observer::new(plant, Vector2::new(0.5, 10.0));
    plant.set_state(Vector2::new(0.1, 0.0));
    let mut controller =
        Controller::with_plant_feedforward(Matrix1x2::new(20.0, 8.0), &plant).unwrap();

    let steps = ((profile.total_time() + 5.0) / DT) as usize;
    let mut u = Vector1::zeros();
    for k in 0..steps {
        let estimate = observer.observe(&u, &plant.output());
        plant.advance(&u);
        let r: Vector2<f64> = profile.calculate((k + 1) as f64 * DT).into();
        u = controller.control(&estimate, &r);
    }

    assert_abs_diff_eq!(observer.estimate()[0], plant.state()[0], epsilon = 1e-3);
    assert_abs_diff_eq!(plant.state()[0], -2.0, epsilon = 1e-2);
}
