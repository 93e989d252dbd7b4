//! Tcl settings-file profiles to canonical profiles.
//!
//! Two layouts exist in the wild. "Advanced" files (`settings_2c`) carry an
//! `advanced_shot` list with one brace group per step. Every other file is a
//! "simple" profile described by a fixed set of scalar keys, which maps onto
//! at most three phases: pre-infusion, hold and decline.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crema_model::{
    Phase, PhaseKind, PhaseSummary, Profile, ProfileKind, PumpSetting, Target, TargetKind,
    Transition, TransitionKind,
};

use crate::error::ConvertError;
use crate::number::number_or_zero;
use crate::parser::{parse_groups, parse_pairs, parse_script, Script};

const ADVANCED_MARKER: &str = "settings_2c";
const DEFAULT_LABEL: &str = "Converted Profile";
const PREINFUSION_KEYWORDS: [&str; 4] = ["fill", "preinfu", "soak", "bloom"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TclLayout {
    Advanced,
    Simple,
}

/// What the converter saw and produced, for display next to the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TclReport {
    pub parser: TclLayout,
    /// Value of `settings_profile_type`, or `"unknown"`.
    pub source_profile_type: String,
    pub phases_count: usize,
    pub total_max_duration: f64,
    pub brewing_max_duration: f64,
    pub phase_summary: Vec<PhaseSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TclConversion {
    pub profile: Profile,
    pub report: TclReport,
}

pub fn convert_tcl(text: &str) -> Result<Profile, ConvertError> {
    convert_tcl_with_report(text).map(|c| c.profile)
}

pub fn convert_tcl_with_report(text: &str) -> Result<TclConversion, ConvertError> {
    let clean = text.strip_prefix('\u{feff}').unwrap_or(text).trim();
    if clean.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    let script = parse_script(clean)?;

    let label = script
        .get("profile_title")
        .map(|a| a.text().trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_LABEL)
        .to_string();
    let description = script
        .get("profile_notes")
        .map(|a| a.text().split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let profile_type = script
        .get("settings_profile_type")
        .map(|a| a.text().trim().to_string());

    let layout = if profile_type.as_deref() == Some(ADVANCED_MARKER) {
        TclLayout::Advanced
    } else {
        TclLayout::Simple
    };
    let phases = match layout {
        TclLayout::Advanced => advanced_phases(&script)?,
        TclLayout::Simple => simple_phases(&script),
    };
    debug!(?layout, phases = phases.len(), "parsed Tcl profile");
    if phases.is_empty() {
        return Err(ConvertError::NoPhases);
    }

    let profile = Profile {
        id: None,
        label,
        description,
        temperature: number(&script, "espresso_temperature"),
        kind: ProfileKind::Pro,
        favorite: false,
        selected: false,
        phases,
    };
    let report = TclReport {
        parser: layout,
        source_profile_type: profile_type.unwrap_or_else(|| "unknown".to_string()),
        phases_count: profile.phases.len(),
        total_max_duration: round2(profile.total_duration()),
        brewing_max_duration: round2(profile.brewing_duration()),
        phase_summary: profile.summary(),
    };
    Ok(TclConversion { profile, report })
}

fn number(script: &Script, key: &str) -> f64 {
    script
        .get(key)
        .map(|a| number_or_zero(a.text()))
        .unwrap_or(0.0)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn phase(name: &str, kind: PhaseKind, duration: f64, pump: PumpSetting) -> Phase {
    Phase {
        name: name.to_string(),
        phase: kind,
        valve: 1,
        duration,
        temperature: 0.0,
        pump,
        transition: None,
        targets: Vec::new(),
    }
}

fn simple_phases(script: &Script) -> Vec<Phase> {
    let get = |key| number(script, key);
    let mut phases = Vec::new();

    let preinfusion_time = get("preinfusion_time");
    if preinfusion_time > 0.0 {
        let mut p = phase(
            "Pre-infusion",
            PhaseKind::Preinfusion,
            preinfusion_time,
            PumpSetting::flow(get("preinfusion_flow_rate"), 1.0),
        );
        let stop_pressure = get("preinfusion_stop_pressure");
        if stop_pressure > 0.0 {
            p.targets
                .push(Target::new(TargetKind::Pressure, stop_pressure));
        }
        phases.push(p);
    }

    let hold_time = get("espresso_hold_time");
    if hold_time > 0.0 {
        phases.push(phase(
            "Hold",
            PhaseKind::Brew,
            hold_time,
            PumpSetting::pressure(get("espresso_pressure"), 0.0),
        ));
    }

    let decline_time = get("espresso_decline_time");
    if decline_time > 0.0 {
        phases.push(phase(
            "Decline",
            PhaseKind::Brew,
            decline_time,
            PumpSetting::pressure(get("pressure_end"), 0.0),
        ));
    }

    let weight = get("final_desired_shot_weight");
    if weight > 0.0 {
        if let Some(last) = phases.last_mut() {
            last.targets.push(Target::new(TargetKind::Volumetric, weight));
        }
    }
    phases
}

fn advanced_phases(script: &Script) -> Result<Vec<Phase>, ConvertError> {
    let block = script
        .get("advanced_shot")
        .ok_or(ConvertError::MissingAdvancedBlock)?;

    let mut phases = Vec::new();
    for (i, group) in parse_groups(block.text())?.iter().enumerate() {
        let fields: HashMap<String, String> = parse_pairs(group)?.into_iter().collect();
        match advanced_phase(&fields) {
            Some(p) => phases.push(p),
            None => debug!(step = i, "skipping advanced step without a name"),
        }
    }
    Ok(phases)
}

fn advanced_phase(fields: &HashMap<String, String>) -> Option<Phase> {
    let field = |key: &str| fields.get(key).map(String::as_str).filter(|v| !v.is_empty());
    let num = |key: &str| field(key).map(number_or_zero).unwrap_or(0.0);

    let name = field("name")?;
    let lower = name.to_lowercase();
    let kind = if PREINFUSION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        PhaseKind::Preinfusion
    } else {
        PhaseKind::Brew
    };
    let duration = num("seconds");
    if duration <= 0.0 {
        // kept as-is; validate() rejects it
        debug!(step = %name, "advanced step has no positive duration");
    }

    let flow_mode = field("pump") == Some("flow");
    let pump = if flow_mode {
        PumpSetting::flow(num("max_flow_or_pressure"), num("pressure"))
    } else {
        PumpSetting::pressure(num("pressure"), 0.0)
    };

    let transition = if field("transition") == Some("smooth") {
        Transition {
            kind: TransitionKind::EaseInOut,
            duration: Some(duration),
            adaptive: true,
        }
    } else {
        Transition::instant()
    };

    let mut targets = Vec::new();
    let volume = num("volume");
    if volume > 0.0 {
        targets.push(Target::new(TargetKind::Volumetric, volume));
    }
    if field("exit_if") == Some("1") {
        if let Some(exit) = field("exit_type").and_then(|t| exit_target(t, &field)) {
            targets.push(exit);
        }
    }

    Some(Phase {
        name: name.to_string(),
        phase: kind,
        valve: 1,
        duration,
        temperature: num("temperature"),
        pump,
        transition: Some(transition),
        targets,
    })
}

/// Exit condition named by `exit_type`, e.g. `pressure_over` reads its
/// threshold from `exit_pressure_over`. When both channels are named, flow
/// wins.
fn exit_target<'f>(
    exit_type: &str,
    field: &impl Fn(&str) -> Option<&'f str>,
) -> Option<Target> {
    let kind = if exit_type.contains("flow") {
        TargetKind::Flow
    } else if exit_type.contains("pressure") {
        TargetKind::Pressure
    } else {
        return None;
    };
    let channel = kind.as_str();
    let (key, over) = if exit_type.contains("over") {
        (format!("exit_{channel}_over"), true)
    } else if exit_type.contains("under") {
        (format!("exit_{channel}_under"), false)
    } else {
        return None;
    };
    let value = number_or_zero(field(&key)?);
    Some(if over {
        Target::new(kind, value)
    } else {
        Target::below(kind, value)
    })
}
