use crema_model::{
    Channel, Operator, PhaseKind, Profile, ProfileKind, PumpSetting, TargetKind, TransitionKind,
};

fn parse(src: &str) -> Profile {
    serde_json::from_str(src).expect("canonical profile should deserialize")
}

#[test]
fn reads_structured_pump_and_targets() {
    let p = parse(
        r#"{
            "label": "Lever",
            "description": "",
            "temperature": 92,
            "type": "pro",
            "phases": [{
                "name": "Ramp",
                "phase": "brew",
                "valve": 1,
                "duration": 8,
                "pump": {"target": "pressure", "pressure": 9, "flow": 4.5},
                "transition": {"type": "ease-out", "duration": 2, "adaptive": true},
                "targets": [{"type": "volumetric", "value": 36}]
            }]
        }"#,
    );
    assert_eq!(p.kind, ProfileKind::Pro);
    let phase = &p.phases[0];
    assert_eq!(phase.phase, PhaseKind::Brew);
    assert_eq!(phase.pump.driven_channel(), Some(Channel::Pressure));
    assert_eq!(phase.pump.channel_value(Channel::Flow), 4.5);
    let t = phase.transition.expect("transition present");
    assert_eq!(t.kind, TransitionKind::EaseOut);
    assert_eq!(t.duration, Some(2.0));
    // operator omitted in the input defaults to gte
    assert_eq!(phase.targets[0].operator, Operator::Gte);
    assert_eq!(phase.targets[0].kind, TargetKind::Volumetric);
}

#[test]
fn reads_scalar_pump_power() {
    let p = parse(
        r#"{"label":"Classic","type":"standard","temperature":93,
            "phases":[{"name":"Brew","phase":"brew","valve":1,"duration":30,"pump":100}]}"#,
    );
    assert_eq!(p.phases[0].pump, PumpSetting::Power(100.0));
    assert_eq!(p.phases[0].pump.driven_channel(), None);
    assert_eq!(p.phases[0].pump.channel_value(Channel::Pressure), 0.0);
    assert!(p.phases[0].transition.is_none());
    assert!(p.phases[0].targets.is_empty());
    assert_eq!(p.phases[0].temperature, 0.0);
}

#[test]
fn unknown_transition_name_reads_as_instant() {
    let p = parse(
        r#"{"label":"x","type":"pro","temperature":93,
            "phases":[{"name":"a","phase":"brew","valve":1,"duration":5,"pump":50,
                       "transition":{"type":"bounce","duration":1}}]}"#,
    );
    assert_eq!(
        p.phases[0].transition.map(|t| t.kind),
        Some(TransitionKind::Instant)
    );
}

#[test]
fn writes_canonical_field_names() {
    let p = parse(
        r#"{"label":"Turbo","type":"pro","temperature":94,
            "phases":[{"name":"Shot","phase":"brew","valve":1,"duration":15,
                       "pump":{"target":"flow","pressure":6,"flow":4},
                       "transition":{"type":"ease-in-out","duration":3,"adaptive":false},
                       "targets":[{"type":"pressure","operator":"lte","value":2}]}]}"#,
    );
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["type"], "pro");
    assert_eq!(v["phases"][0]["pump"]["target"], "flow");
    assert_eq!(v["phases"][0]["transition"]["type"], "ease-in-out");
    assert_eq!(v["phases"][0]["targets"][0]["operator"], "lte");
    // default flags and absent id stay out of the output
    assert!(v.get("id").is_none());
    assert!(v.get("favorite").is_none());
}

#[test]
fn rejects_unknown_phase_kind() {
    let res: Result<Profile, _> = serde_json::from_str(
        r#"{"label":"x","type":"pro","temperature":93,
            "phases":[{"name":"a","phase":"steam","valve":1,"duration":5,"pump":50}]}"#,
    );
    assert!(res.is_err());
}
