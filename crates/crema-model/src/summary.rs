//! Duration totals and per-phase summaries used by reports.

use serde::Serialize;
use std::fmt;

use crate::profile::{PhaseKind, Profile, Target};

/// One row of a profile overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSummary {
    pub name: String,
    pub max_duration: f64,
    /// Rendered exit conditions, e.g. `"volumetric > 36, pressure < 2"`.
    pub targets: String,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.kind.as_str(),
            self.operator.symbol(),
            self.value
        )
    }
}

impl Profile {
    /// Sum of every phase's maximum duration, in seconds.
    pub fn total_duration(&self) -> f64 {
        self.phases.iter().map(|p| p.duration).sum()
    }

    /// Sum of the `brew` phases' maximum durations.
    pub fn brewing_duration(&self) -> f64 {
        self.phases
            .iter()
            .filter(|p| p.phase == PhaseKind::Brew)
            .map(|p| p.duration)
            .sum()
    }

    pub fn summary(&self) -> Vec<PhaseSummary> {
        self.phases
            .iter()
            .map(|p| {
                let targets = if p.targets.is_empty() {
                    "timeout only".to_string()
                } else {
                    p.targets
                        .iter()
                        .map(|t| t.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                PhaseSummary {
                    name: p.name.clone(),
                    max_duration: p.duration,
                    targets,
                }
            })
            .collect()
    }
}
