#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod profile;
mod summary;
mod validate;

pub use profile::{
    Channel, Operator, Phase, PhaseKind, Profile, ProfileKind, PumpControl, PumpSetting, Target,
    TargetKind, Transition, TransitionKind, CARRY_OVER,
};
pub use summary::PhaseSummary;
pub use validate::ProfileError;
