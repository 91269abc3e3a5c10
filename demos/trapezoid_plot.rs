use std::error::Error;
use trapezoid_motion::{Constraints, ProfileExecutor, State};
use gnuplot::*;
fn main() -> Result<(), Box<dyn Error>> {
    // -----------------------
    // 1. Set up parameters
    // -----------------------
    let initial = State::new(0.0, 0.0);
    // Two goals: the second one starts from the state where the first one ends
    let goals = [State::new(50.0, 5.0), State::new(20.0, 0.0)];

    // Motion limits
    let v_lim = 20.0; // Maximum velocity
    let a_lim = 10.0; // Maximum acceleration

    // -------------------------
    // 2. Create and configure
    // -------------------------
    let constraints = Constraints::new(v_lim, a_lim)?;

    let sampling_rate = 1000; // ticks per second
    let mut executor = ProfileExecutor::<4>::new(constraints, initial, sampling_rate)?;
    for goal in goals {
        if !executor.add_goal(goal) {
            return Err("Goal queue is full.".into());
        }
    }

    // Prepare containers for results
    let mut time_axis = Vec::new();
    let mut positions = Vec::new();
    let mut velocities = Vec::new();

    // --------------------------------
    // 3. Tick until every goal is reached
    // --------------------------------
    let mut i = 0;
    while !executor.is_idle() {
        let state = executor.tick()?;
        time_axis.push(i as f64 / sampling_rate as f64);
        positions.push(state.position);
        velocities.push(state.velocity);
        i += 1;
    }

    let last = goals[goals.len() - 1];
    let position_error = (executor.state().position - last.position).abs();
    if position_error > 1e-9 {
        eprintln!("Warning: final position is off by {position_error}.");
    }

    // --------------
    // 4. Plot data
    // --------------
    let mut fg = Figure::new();
    {
        let axes = fg.axes2d();
        axes.set_title("Position and Velocity vs. Time", &[]);
        axes.set_x_label("Time (s)", &[]);
        axes.set_y_label("Position derivatives", &[]);
        axes.lines(&time_axis, &positions, &[Color("blue"), Caption("Position")]);
        axes.lines(&time_axis, &velocities, &[Color("red"), Caption("Velocity")]);
    }

    // Attempt to show in a pop-up window (might require gnuplot installed)
    fg.show().map_err(|e| format!("Failed to display plot: {e}"))?;

    println!("Plot generated. Total motion time: {:.3} seconds.", time_axis.len() as f64 / sampling_rate as f64);
    Ok(())
}
