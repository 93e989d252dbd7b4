//! Detection and conversion of the older JSON export schema.
//!
//! Legacy exports carry times in milliseconds, name the pump channel in
//! upper case (`"PRESSURE"`/`"FLOW"`), keep curve names like `EASE_IN_OUT`,
//! and describe exit conditions as a `stopConditions` object. They are
//! recognised by a top-level `waterTemperature` field.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crema_model::{
    Phase, PhaseKind, Profile, ProfileKind, PumpSetting, Target, TargetKind, Transition,
    TransitionKind,
};

use crate::error::ConvertError;

/// Which schema a profile JSON document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Canonical,
    LegacyV1,
}

pub fn detect_schema(doc: &Value) -> Schema {
    match doc.get("waterTemperature") {
        Some(v) if !v.is_null() => Schema::LegacyV1,
        _ => Schema::Canonical,
    }
}

/// Convert any profile JSON document to a canonical profile.
pub fn convert_json(doc: &Value) -> Result<Profile, ConvertError> {
    match detect_schema(doc) {
        Schema::Canonical => {
            let profile =
                Profile::deserialize(doc).map_err(|e| ConvertError::Json(e.to_string()))?;
            if profile.phases.is_empty() {
                return Err(ConvertError::NoPhases);
            }
            Ok(profile)
        }
        Schema::LegacyV1 => convert_legacy(doc),
    }
}

fn num(v: &Value, key: &str) -> f64 {
    v.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// `v[key]` if it is a finite number above zero.
fn positive(v: &Value, key: &str) -> Option<f64> {
    v.get(key)
        .and_then(Value::as_f64)
        .filter(|x| x.is_finite() && *x > 0.0)
}

fn curve_kind(curve: &str) -> TransitionKind {
    TransitionKind::from_name(&curve.to_lowercase().replace('_', "-"))
}

pub fn convert_legacy(doc: &Value) -> Result<Profile, ConvertError> {
    let global_weight = doc
        .get("globalStopConditions")
        .and_then(|g| positive(g, "weight"));

    let phases: Vec<Phase> = doc
        .get("phases")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .enumerate()
                .map(|(i, p)| legacy_phase(i, p, global_weight))
                .collect()
        })
        .unwrap_or_default();
    if phases.is_empty() {
        return Err(ConvertError::NoPhases);
    }

    Ok(Profile {
        id: None,
        label: doc
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        description: String::new(),
        temperature: num(doc, "waterTemperature"),
        kind: ProfileKind::Pro,
        favorite: false,
        selected: false,
        phases,
    })
}

fn legacy_phase(index: usize, p: &Value, global_weight: Option<f64>) -> Phase {
    let null = Value::Null;
    let target = p.get("target").unwrap_or(&null);
    let stop = p.get("stopConditions").unwrap_or(&null);

    let name = match p.get("name").and_then(Value::as_str) {
        Some(n) if !n.trim().is_empty() => n.to_string(),
        _ => format!("Phase {}", index + 1),
    };
    let target_ms = num(target, "time");
    // take the longer limit so the phase is not cut off early
    let duration = target_ms.max(num(stop, "time")) / 1000.0;

    let end = num(target, "end");
    let restriction = num(p, "restriction");
    let pump = if end <= 0.0 {
        PumpSetting::Power(0.0)
    } else if p.get("type").and_then(Value::as_str) == Some("PRESSURE") {
        PumpSetting::pressure(end, restriction)
    } else {
        PumpSetting::flow(end, restriction)
    };

    let transition = Transition {
        kind: curve_kind(target.get("curve").and_then(Value::as_str).unwrap_or("")),
        duration: Some(target_ms / 1000.0),
        adaptive: true,
    };

    let mut targets = Vec::new();
    if let Some(v) = positive(stop, "pressureAbove") {
        targets.push(Target::new(TargetKind::Pressure, v));
    }
    if let Some(v) = positive(stop, "pressureBelow") {
        targets.push(Target::below(TargetKind::Pressure, v));
    }
    if let Some(v) = positive(stop, "flowAbove") {
        targets.push(Target::new(TargetKind::Flow, v));
    }
    if let Some(v) = positive(stop, "flowBelow") {
        targets.push(Target::below(TargetKind::Flow, v));
    }
    if let Some(v) = positive(stop, "weight").or(global_weight) {
        targets.push(Target::new(TargetKind::Volumetric, v));
    }
    if let Some(v) = positive(stop, "waterPumpedInPhase") {
        targets.push(Target::new(TargetKind::Pumped, v));
    }
    debug!(phase = %name, targets = targets.len(), "converted legacy phase");

    Phase {
        name,
        phase: PhaseKind::Brew,
        valve: 1,
        duration,
        temperature: positive(p, "waterTemperature").unwrap_or(0.0),
        pump,
        transition: Some(transition),
        targets,
    }
}
