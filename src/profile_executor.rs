use log::{trace, warn};

use crate::buffer_fifo::BufferFIFO;
use crate::constraints::Constraints;
use crate::error::{ProfileError, Result};
use crate::state::State;
use crate::trapezoid::TrapezoidProfile;

/// ProfileExecutor follows a queue of goal states and samples the active
/// profile discretely according to a set frequency.
///
/// Each goal is planned from the current reference state when the previous
/// profile has finished, so consecutive goals chain without discontinuities.
pub struct ProfileExecutor<const N: usize> {
    /// Limits used for every planned profile
    constraints: Constraints,

    /// Goals waiting to be planned
    goals: BufferFIFO<State, N>,

    /// The current "active" profile
    profile: Option<TrapezoidProfile>,

    /// The current reference state
    inst: State,

    /// Update frequency in Hz
    freq: f64,

    /// Ticks elapsed on the active profile
    time: u64,
}

impl<const N: usize> ProfileExecutor<N> {
    /// Creates an idle executor at `initial`, ticking at `freq` Hz.
    pub fn new(constraints: Constraints, initial: State, freq: u16) -> Result<Self> {
        if freq == 0 {
            return Err(ProfileError::Domain("executor frequency must be nonzero"));
        }
        if !initial.is_finite() {
            return Err(ProfileError::Domain("states must be finite"));
        }
        if !TrapezoidProfile::within_velocity_limit(&constraints, initial) {
            return Err(ProfileError::Domain("state velocity exceeds max_velocity"));
        }
        Ok(Self {
            constraints,
            goals: BufferFIFO::default(),
            profile: None,
            inst: initial,
            freq: freq as f64,
            time: 0,
        })
    }

    /// Queues a goal. Returns `false` if the queue is full and the goal was dropped.
    pub fn add_goal(&mut self, goal: State) -> bool {
        let queued = self.goals.push(goal);
        if !queued {
            warn!(
                "goal queue full ({} entries), dropping goal at {:.6}",
                N, goal.position
            );
        }
        queued
    }

    /// Drops the queued goals and immediately plans towards `goal` from the current
    /// reference state.
    ///
    /// If `goal` cannot be planned, the executor is left untouched.
    pub fn replan(&mut self, goal: State) -> Result<()> {
        let profile = TrapezoidProfile::new(self.constraints, self.inst, goal)?;
        self.goals.clear();
        self.install(profile, goal);
        Ok(())
    }

    /// Plans the next queued goal, skipping goals that are already reached.
    fn get_next(&mut self) -> Result<()> {
        self.profile = None;
        while let Some(goal) = self.goals.pop() {
            self.start(goal)?;
            if self.profile.is_some() {
                break;
            }
        }
        Ok(())
    }

    fn start(&mut self, goal: State) -> Result<()> {
        let profile = TrapezoidProfile::new(self.constraints, self.inst, goal)?;
        self.install(profile, goal);
        Ok(())
    }

    fn install(&mut self, profile: TrapezoidProfile, goal: State) {
        self.time = 0;
        if profile.total_time() > 0.0 {
            trace!(
                "planned ({:.6}, {:.6}) -> ({:.6}, {:.6}) over {:.6}s",
                self.inst.position,
                self.inst.velocity,
                goal.position,
                goal.velocity,
                profile.total_time()
            );
            self.profile = Some(profile);
        } else {
            self.inst = goal;
            self.profile = None;
        }
    }

    /// Advances by one tick and returns the new reference state.
    ///
    /// Once the active profile has finished, the next queued goal is planned. An error is
    /// returned if that goal cannot be planned; the goal is dropped in that case.
    pub fn tick(&mut self) -> Result<State> {
        let finished = match &self.profile {
            Some(profile) => profile.is_finished(self.elapsed()),
            None => true,
        };
        if finished {
            self.get_next()?;
        }

        if let Some(profile) = &self.profile {
            self.time += 1;
            self.inst = profile.calculate(self.time as f64 / self.freq);
        }
        Ok(self.inst)
    }

    /// Sets a new frequency in Hz, keeping the elapsed time on the active profile.
    pub fn set_freq(&mut self, freq: u16) -> Result<()> {
        if freq == 0 {
            return Err(ProfileError::Domain("executor frequency must be nonzero"));
        }
        let elapsed = self.elapsed();
        self.freq = freq as f64;
        self.time = (elapsed * self.freq).round() as u64;
        Ok(())
    }

    /// Returns the current reference state.
    pub fn state(&self) -> State {
        self.inst
    }

    /// Returns the time spent on the active profile, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.time as f64 / self.freq
    }

    pub fn profile(&self) -> Option<&TrapezoidProfile> {
        self.profile.as_ref()
    }

    /// Number of goals waiting behind the active profile.
    pub fn pending(&self) -> usize {
        self.goals.len()
    }

    /// True when there is neither an active profile nor a queued goal.
    pub fn is_idle(&self) -> bool {
        self.profile.is_none() && self.goals.is_empty()
    }

    /// Checks if the goal queue is full.
    pub fn is_full(&self) -> bool {
        self.goals.is_full()
    }
}
