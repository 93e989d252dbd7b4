#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod easing;
mod timeline;

pub use easing::apply_easing;
pub use timeline::{simulate, simulate_both, step, Accumulator, Sample, Timeline, Trajectory, TICK};
