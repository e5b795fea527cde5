// src/timing/mod.rs

//! CPU and wall-clock timing for a single run.
//!
//! - [`timestamp`] holds the `(sec, nsec)` value type and the borrow-correct
//!   subtraction.
//! - [`source`] reads the clocks (`TimeSource` trait + the system
//!   implementation) and assembles a [`TimeReport`].

pub mod source;
pub mod timestamp;

pub use source::{SystemTimeSource, TimeReport, TimeSample, TimeSource};
pub use timestamp::Timestamp;
