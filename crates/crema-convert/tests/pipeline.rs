//! Converted profiles feed straight into the timeline simulator.

use crema_convert::import;
use crema_model::Channel;
use crema_timeline::simulate;

#[test]
fn simple_tcl_profile_simulates_end_to_end() {
    let profile = import(
        "preinfusion_time 5\npreinfusion_flow_rate 4\nespresso_hold_time 20\nespresso_pressure 9\nfinal_desired_shot_weight 36",
    )
    .unwrap()
    .remove(0);
    assert_eq!(profile.validate(), Ok(()));

    let pressure = simulate(&profile.phases, Channel::Pressure);
    assert_eq!(pressure.len(), 250);
    // pre-infusion drives flow; pressure shows its 1 bar limit
    assert!(pressure[..50].iter().all(|s| s.value == 1.0 && !s.is_driven_channel));
    // hold ramps from that limit toward 9 bar
    assert_eq!(pressure[50].value, 1.0);
    assert!(pressure[50..].iter().all(|s| s.is_driven_channel));
    assert!((pressure[150].value - 5.0).abs() < 1e-9);

    let flow = simulate(&profile.phases, Channel::Flow);
    assert!((flow[25].value - 2.0).abs() < 1e-9);
}
