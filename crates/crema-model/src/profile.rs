//! Canonical brew profile schema.
//!
//! Every converter produces these types and the timeline simulator consumes
//! them. The serde attributes define the canonical JSON exchange format.

use serde::{Deserialize, Serialize};

/// Pump value meaning "hold whatever the previous phase ended at".
pub const CARRY_OVER: f64 = -1.0;

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Brew temperature in °C.
    #[serde(default)]
    pub temperature: f64,
    #[serde(rename = "type")]
    pub kind: ProfileKind,
    #[serde(default, skip_serializing_if = "is_false")]
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Standard,
    Pro,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub phase: PhaseKind,
    pub valve: u8,
    /// Maximum phase length in seconds.
    pub duration: f64,
    /// Temperature override; 0 inherits the profile temperature.
    #[serde(default)]
    pub temperature: f64,
    pub pump: PumpSetting,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    /// OR-combined exit conditions, evaluated by the machine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,
}

impl Phase {
    /// First volumetric target with a positive value.
    pub fn volumetric_target(&self) -> Option<&Target> {
        self.targets
            .iter()
            .find(|t| t.kind == TargetKind::Volumetric && t.value > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Preinfusion,
    Brew,
}

/// A controllable hydraulic channel. Doubles as the pump's control target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Pressure,
    Flow,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Pressure => "pressure",
            Channel::Flow => "flow",
        }
    }
}

/// Pump configuration: plain power percentage or a pressure/flow controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PumpSetting {
    /// Power in percent, 0 is off.
    Power(f64),
    Controlled(PumpControl),
}

/// Pressure and flow are both configured; `target` is the one being driven
/// and the other acts as a limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpControl {
    pub target: Channel,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub flow: f64,
}

impl PumpSetting {
    pub fn pressure(pressure: f64, flow_limit: f64) -> Self {
        PumpSetting::Controlled(PumpControl {
            target: Channel::Pressure,
            pressure,
            flow: flow_limit,
        })
    }

    pub fn flow(flow: f64, pressure_limit: f64) -> Self {
        PumpSetting::Controlled(PumpControl {
            target: Channel::Flow,
            pressure: pressure_limit,
            flow,
        })
    }

    /// Channel the pump drives, if it is a controller.
    pub fn driven_channel(&self) -> Option<Channel> {
        match self {
            PumpSetting::Power(_) => None,
            PumpSetting::Controlled(c) => Some(c.target),
        }
    }

    /// Configured value for `channel`. A power setting configures neither.
    pub fn channel_value(&self, channel: Channel) -> f64 {
        match self {
            PumpSetting::Power(_) => 0.0,
            PumpSetting::Controlled(c) => match channel {
                Channel::Pressure => c.pressure,
                Channel::Flow => c.flow,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    /// Ramp length in seconds. Ignored for `instant`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default)]
    pub adaptive: bool,
}

impl Transition {
    pub fn instant() -> Self {
        Transition {
            kind: TransitionKind::Instant,
            duration: None,
            adaptive: false,
        }
    }
}

/// Easing policy. Unrecognised names deserialize as `Instant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum TransitionKind {
    Instant,
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl TransitionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => TransitionKind::Linear,
            "ease-in" => TransitionKind::EaseIn,
            "ease-out" => TransitionKind::EaseOut,
            "ease-in-out" => TransitionKind::EaseInOut,
            _ => TransitionKind::Instant,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::Instant => "instant",
            TransitionKind::Linear => "linear",
            TransitionKind::EaseIn => "ease-in",
            TransitionKind::EaseOut => "ease-out",
            TransitionKind::EaseInOut => "ease-in-out",
        }
    }
}

impl From<String> for TransitionKind {
    fn from(name: String) -> Self {
        TransitionKind::from_name(&name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(rename = "type")]
    pub kind: TargetKind,
    #[serde(default)]
    pub operator: Operator,
    pub value: f64,
}

impl Target {
    pub fn new(kind: TargetKind, value: f64) -> Self {
        Target {
            kind,
            operator: Operator::Gte,
            value,
        }
    }

    pub fn below(kind: TargetKind, value: f64) -> Self {
        Target {
            kind,
            operator: Operator::Lte,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Water pumped during the phase, ml.
    Pumped,
    /// Beverage weight on the scale, g.
    Volumetric,
    Pressure,
    Flow,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Pumped => "pumped",
            TargetKind::Volumetric => "volumetric",
            TargetKind::Pressure => "pressure",
            TargetKind::Flow => "flow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[default]
    Gte,
    Lte,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Gte => ">",
            Operator::Lte => "<",
        }
    }
}
