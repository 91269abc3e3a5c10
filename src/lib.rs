//! # trapezoid_motion
//!
//! A small library for computing trapezoidal motion profiles in Rust.
//!
//! This library provides the following modules:
//! - `constraints` for the velocity and acceleration limits of an axis.
//! - `state` for a position/velocity pair on a trajectory.
//! - `trapezoid` for planning a profile, sampling it and inverting it back to time.
//! - `profile_executor` for following queued goals in discrete ticks.
//! - `state_space` for the plant, controller and observer that consume the samples.
//! - `buffer_fifo` for a simple FIFO buffer implementation.
//!
//! ```
//! use trapezoid_motion::{Constraints, State, TrapezoidProfile};
//!
//! let constraints = Constraints::new(1.0, 1.0)?;
//! let profile = TrapezoidProfile::new(constraints, State::new(0.0, 0.0), State::new(3.0, 0.0))?;
//!
//! assert_eq!(profile.total_time(), 4.0);
//! assert_eq!(profile.calculate(2.0), State::new(1.5, 1.0));
//! # Ok::<(), trapezoid_motion::ProfileError>(())
//! ```
//!
//! Author: Anton Khrustalev, creapunk

pub mod constraints;
pub mod error;
pub mod state;
pub mod trapezoid;
mod buffer_fifo;
pub mod profile_executor;
pub mod state_space;

// Re-export main structs for convenience:
pub use constraints::*;
pub use error::ProfileError;
pub use state::*;
pub use trapezoid::*;
pub use profile_executor::*;
