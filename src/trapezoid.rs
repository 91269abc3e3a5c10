use log::debug;

use crate::constraints::Constraints;
use crate::error::{ProfileError, Result};
use crate::state::State;

/// Segment of a trapezoidal profile active at a given time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constant acceleration towards the cruise velocity.
    Accelerate,
    /// Constant velocity at the velocity limit.
    Cruise,
    /// Constant deceleration into the goal state.
    Decelerate,
    /// The goal has been reached.
    Finished,
}

/// A trapezoidal motion profile between two states of a single axis.
///
/// The profile is planned once in [`TrapezoidProfile::new`] and is immutable afterwards:
/// [`calculate`](TrapezoidProfile::calculate) and
/// [`time_left_until`](TrapezoidProfile::time_left_until) are pure queries.
/// To follow a different goal, plan a new profile from the current state.
///
/// Internally everything is stored in a canonical frame where the motion proceeds in the
/// positive sense; `direction` mirrors it back to the caller's frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrapezoidProfile {
    /// Velocity and acceleration limits.
    constraints: Constraints,

    /// Initial state in the canonical frame.
    initial: State,

    /// Goal state in the canonical frame.
    goal: State,

    /// +1.0 or -1.0, maps the canonical frame to the caller's frame.
    direction: f64,

    /// Time at which the acceleration phase ends.
    end_accel: f64,

    /// Time at which the cruise phase ends.
    end_cruise: f64,

    /// Time at which the deceleration phase ends and the goal is reached.
    end_decel: f64,
}

impl TrapezoidProfile {
    /// Distance below which a target is considered reached by the inverse query.
    const POS_EPSILON: f64 = 1e-6;

    /// Relative slack on `max_velocity` accepted for the endpoint states.
    const VEL_TOLERANCE: f64 = 1e-9;

    /// Plans a profile from `initial` to `goal`.
    ///
    /// # Planning steps:
    ///
    /// 1. **Direction**. If equalizing the velocities at full acceleration already carries the
    ///    axis past the goal, the motion must go the other way first: the profile is mirrored.
    ///
    /// 2. **Canonical frame**. Both states are multiplied by the direction, so the rest of the
    ///    planning always moves in the positive sense.
    ///
    /// 3. **Cutoffs**. A nonzero initial (goal) velocity is treated as a ramp that has already
    ///    been partially done: the virtual time and distance spent reaching it are added to
    ///    the trapezoid and then cut off again from the phase boundaries.
    ///
    /// 4. **Triangle**. If the full trapezoid is too short to ever reach `max_velocity`, the
    ///    ramp time is shrunk and the cruise phase disappears.
    pub fn new(constraints: Constraints, initial: State, goal: State) -> Result<Self> {
        if !initial.is_finite() || !goal.is_finite() {
            return Err(ProfileError::Domain("states must be finite"));
        }
        let v_max = constraints.max_velocity();
        let a_max = constraints.max_acceleration();
        if !Self::within_velocity_limit(&constraints, initial)
            || !Self::within_velocity_limit(&constraints, goal)
        {
            return Err(ProfileError::Domain("state velocity exceeds max_velocity"));
        }
        // Round-off may leave a sampled velocity a few ulps past the limit
        let initial = initial.with_velocity_limit(v_max);
        let goal = goal.with_velocity_limit(v_max);

        // 1) Direction
        let direction = if Self::should_flip(&constraints, initial, goal) {
            -1.0
        } else {
            1.0
        };

        // 2) Canonical frame
        let initial = initial.directed(direction);
        let goal = goal.directed(direction);

        // 3) Virtual ramps already spent on the endpoint velocities
        let cutoff_begin = initial.velocity / a_max;
        let cutoff_dist_begin = cutoff_begin * cutoff_begin * a_max * 0.5;

        let cutoff_end = goal.velocity / a_max;
        let cutoff_dist_end = cutoff_end * cutoff_end * a_max * 0.5;

        // 4) Size the full (rest to rest) trapezoid
        let full_trapezoid_dist =
            cutoff_dist_begin + (goal.position - initial.position) + cutoff_dist_end;
        let mut acceleration_time = v_max / a_max;
        let mut full_speed_dist =
            full_trapezoid_dist - acceleration_time * acceleration_time * a_max;

        // 5) Max velocity is never reached => triangular profile
        if full_speed_dist < 0.0 {
            acceleration_time = (full_trapezoid_dist / a_max).sqrt();
            full_speed_dist = 0.0;
            debug!(
                "triangular profile: peak velocity {:.6} below limit {:.6}",
                acceleration_time * a_max,
                v_max
            );
        }

        // 6) Phase boundaries
        let end_accel = acceleration_time - cutoff_begin;
        let end_cruise = end_accel + full_speed_dist / v_max;
        let end_decel = end_cruise + acceleration_time - cutoff_end;

        if !(end_accel.is_finite() && end_cruise.is_finite() && end_decel.is_finite()) {
            return Err(ProfileError::Domain("phase boundaries are not finite"));
        }

        debug!(
            "planned profile: direction {}, end_accel {:.6}, end_cruise {:.6}, end_decel {:.6}",
            direction, end_accel, end_cruise, end_decel
        );

        Ok(Self {
            constraints,
            initial,
            goal,
            direction,
            end_accel,
            end_cruise,
            end_decel,
        })
    }

    /// Samples the profile `t` seconds after its start.
    ///
    /// Times before the start are evaluated on the acceleration ramp, times after
    /// [`total_time`](Self::total_time) return the goal. The returned velocity never
    /// exceeds `max_velocity`.
    pub fn calculate(&self, t: f64) -> State {
        let a_max = self.constraints.max_acceleration();
        let v_max = self.constraints.max_velocity();
        let State {
            position: p0,
            velocity: v0,
        } = self.initial;

        let canonical = if t < self.end_accel {
            // Accelerating from the initial state
            State::new(p0 + (v0 + t * a_max * 0.5) * t, v0 + t * a_max)
        } else if t < self.end_cruise {
            // Cruising at max velocity from where the ramp ended
            let ramp_dist = (v0 + self.end_accel * a_max * 0.5) * self.end_accel;
            State::new(p0 + ramp_dist + v_max * (t - self.end_accel), v_max)
        } else if t <= self.end_decel {
            // Decelerating, computed backwards from the goal
            let time_left = self.end_decel - t;
            State::new(
                self.goal.position - (self.goal.velocity + time_left * a_max * 0.5) * time_left,
                self.goal.velocity + time_left * a_max,
            )
        } else {
            self.goal
        };

        canonical
            .with_velocity_limit(v_max)
            .directed(self.direction)
    }

    /// Returns the time after the start at which the profile reaches `target`.
    ///
    /// `target` must lie on the traversed span of positions; for other targets the result is
    /// numerically meaningless (possibly NaN or negative). See
    /// [`try_time_left_until`](Self::try_time_left_until) for a checked version.
    pub fn time_left_until(&self, target: f64) -> f64 {
        self.solve_inverse(target)
    }

    /// Checked variant of [`time_left_until`](Self::time_left_until).
    ///
    /// Fails with [`ProfileError::OutOfRange`] if `target` is outside the span of positions the
    /// profile visits, if the inverse does not yield a finite, non-negative time, or if the
    /// profile is not at `target` at that time. The last case covers targets that are only
    /// reached after a velocity reversal the inverse does not follow.
    pub fn try_time_left_until(&self, target: f64) -> Result<f64> {
        let (min, max) = self.traversed_span();
        let out_of_range = ProfileError::OutOfRange { target, min, max };

        if !target.is_finite()
            || target < min - Self::POS_EPSILON
            || target > max + Self::POS_EPSILON
        {
            return Err(out_of_range);
        }

        let time = self.solve_inverse(target);
        if !time.is_finite() || time < 0.0 {
            return Err(out_of_range);
        }
        let miss = (self.calculate(time).position - target).abs();
        if miss > Self::POS_EPSILON * target.abs().max(1.0) {
            return Err(out_of_range);
        }
        Ok(time)
    }

    /// Returns the phase active at time `t`.
    pub fn phase_at(&self, t: f64) -> Phase {
        if t < self.end_accel {
            Phase::Accelerate
        } else if t < self.end_cruise {
            Phase::Cruise
        } else if t <= self.end_decel {
            Phase::Decelerate
        } else {
            Phase::Finished
        }
    }

    /// Returns `(min, max)` of the positions visited between the start and the goal.
    pub fn traversed_span(&self) -> (f64, f64) {
        let a_max = self.constraints.max_acceleration();
        let mut times = [0.0, self.end_decel, 0.0, self.end_decel];

        // Velocity reversal during the ramp up
        let t_stop_begin = -self.initial.velocity / a_max;
        if t_stop_begin > 0.0 && t_stop_begin < self.end_accel {
            times[2] = t_stop_begin;
        }
        // Velocity reversal during the ramp down
        let t_stop_end = self.end_decel + self.goal.velocity / a_max;
        if t_stop_end >= self.end_cruise && t_stop_end <= self.end_decel {
            times[3] = t_stop_end;
        }

        times
            .iter()
            .map(|&t| self.calculate(t).position)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            })
    }

    // -----------------------------------------------------------------
    //  Getter methods
    // -----------------------------------------------------------------

    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// Initial state in the caller's frame.
    pub fn initial(&self) -> State {
        self.initial.directed(self.direction)
    }

    /// Goal state in the caller's frame.
    pub fn goal(&self) -> State {
        self.goal.directed(self.direction)
    }

    /// +1.0 if the profile was planned as is, -1.0 if it was mirrored.
    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn end_accel(&self) -> f64 {
        self.end_accel
    }

    pub fn end_cruise(&self) -> f64 {
        self.end_cruise
    }

    pub fn end_decel(&self) -> f64 {
        self.end_decel
    }

    /// Total duration of the profile.
    pub fn total_time(&self) -> f64 {
        self.end_decel
    }

    pub fn is_finished(&self, t: f64) -> bool {
        t > self.end_decel
    }

    // -----------------------------------------------------------------------------------------
    // Below are helper methods for internal calculations:
    // -----------------------------------------------------------------------------------------

    /// True when the trajectory has to be planned in the mirrored frame.
    fn should_flip(constraints: &Constraints, initial: State, goal: State) -> bool {
        let velocity_change = goal.velocity - initial.velocity;
        let distance_change = goal.position - initial.position;

        // Distance covered while equalizing the velocities at full acceleration
        let t = velocity_change.abs() / constraints.max_acceleration();
        t * (velocity_change * 0.5 + initial.velocity) > distance_change
    }

    /// `|velocity| <= max_velocity`, up to a relative round-off slack.
    pub(crate) fn within_velocity_limit(constraints: &Constraints, state: State) -> bool {
        state.velocity.abs() <= constraints.max_velocity() * (1.0 + Self::VEL_TOLERANCE)
    }

    /// Inverts the phase kinematics for `target`, returning the elapsed time.
    fn solve_inverse(&self, target: f64) -> f64 {
        let v_max = self.constraints.max_velocity();
        let accel = self.constraints.max_acceleration();
        let decel = -accel;

        // Work in the caller's frame, oriented towards the target
        let start = self.initial();
        let toward = if target < start.position { -1.0 } else { 1.0 };
        let orientation = self.direction * toward;
        let velocity = start.velocity * toward;

        // Phase durations, zero for phases that move away from the target
        let accel_duration = (self.end_accel * orientation).max(0.0);
        let cruise_duration = ((self.end_cruise - self.end_accel) * orientation).max(0.0);

        let dist_to_target = (target - start.position).abs();
        if dist_to_target < Self::POS_EPSILON {
            return 0.0;
        }

        // Distance and exit velocity of the acceleration phase
        let mut accel_dist = velocity * accel_duration + 0.5 * accel * accel_duration.powi(2);
        let decel_velocity = if accel_duration > 0.0 {
            Self::guarded_sqrt(velocity * velocity + 2.0 * accel * accel_dist)
        } else {
            velocity
        };

        let mut cruise_dist = v_max * cruise_duration;

        // Spread the distance over the phases, in order
        let decel_dist;
        if accel_dist >= dist_to_target {
            accel_dist = dist_to_target;
            cruise_dist = 0.0;
            decel_dist = 0.0;
        } else if accel_dist + cruise_dist >= dist_to_target {
            cruise_dist = dist_to_target - accel_dist;
            decel_dist = 0.0;
        } else {
            decel_dist = dist_to_target - cruise_dist - accel_dist;
        }

        let accel_time = if accel_duration > 0.0 {
            Self::positive_root(velocity, accel, accel_dist)
        } else {
            0.0
        };
        let cruise_time = cruise_dist / v_max;
        let decel_time = if decel_dist > 0.0 {
            Self::positive_root(decel_velocity, decel, decel_dist)
        } else {
            0.0
        };

        accel_time + cruise_time + decel_time
    }

    /// Smallest non-negative `t` with `v0*t + a*t^2/2 = d`.
    fn positive_root(v0: f64, a: f64, d: f64) -> f64 {
        (-v0 + Self::guarded_sqrt(v0 * v0 + 2.0 * a * d)) / a
    }

    /// Square root that tolerates tiny negative radicands from round-off.
    fn guarded_sqrt(value: f64) -> f64 {
        value.abs().sqrt()
    }
}
