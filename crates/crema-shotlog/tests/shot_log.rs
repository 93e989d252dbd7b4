use crema_shotlog::{DecodeError, ShotLog, SHOT_HEADER_SIZE, SHOT_MAGIC, SHOT_SAMPLE_SIZE};

struct Header {
    interval: u16,
    count: u32,
    duration: u32,
    final_weight: u16,
}

fn header(h: &Header) -> Vec<u8> {
    let mut buf = vec![0u8; SHOT_HEADER_SIZE];
    buf[0..4].copy_from_slice(&SHOT_MAGIC.to_le_bytes());
    buf[4] = 5;
    buf[5] = SHOT_SAMPLE_SIZE as u8;
    buf[6..8].copy_from_slice(&(SHOT_HEADER_SIZE as u16).to_le_bytes());
    buf[8..10].copy_from_slice(&h.interval.to_le_bytes());
    buf[12..16].copy_from_slice(&0x0fffu32.to_le_bytes());
    buf[16..20].copy_from_slice(&h.count.to_le_bytes());
    buf[20..24].copy_from_slice(&h.duration.to_le_bytes());
    buf[24..28].copy_from_slice(&1_700_000_000u32.to_le_bytes());
    buf[28..28 + 6].copy_from_slice(b"p-0042");
    buf[60..60 + 10].copy_from_slice(b"Turbo Shot");
    buf[108..110].copy_from_slice(&h.final_weight.to_le_bytes());
    buf
}

/// tick, pressure x10, flow x100 (signed), weight x10
fn sample(tick: u16, pressure: u16, flow: i16, weight: u16) -> Vec<u8> {
    let fields: [u16; 12] = [
        tick,
        935,
        921,
        90,
        pressure,
        flow as u16,
        200,
        (flow / 2) as u16,
        150,
        weight,
        weight + 5,
        1234,
    ];
    fields.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn finished(count: u32) -> Vec<u8> {
    let mut buf = header(&Header {
        interval: 250,
        count,
        duration: 9_999,
        final_weight: 362,
    });
    for i in 0..count as u16 {
        buf.extend(sample(i, 80 + i, 250, i * 10));
    }
    buf
}

#[test]
fn decodes_header_and_samples() {
    let log = ShotLog::decode(&finished(4)).unwrap();
    assert_eq!(log.version, 5);
    assert_eq!(log.sample_interval_ms, 250);
    assert_eq!(log.fields_mask, 0x0fff);
    assert_eq!(log.samples_expected, 4);
    assert_eq!(log.start_epoch, 1_700_000_000);
    assert_eq!(log.profile_id, "p-0042");
    assert_eq!(log.profile_name, "Turbo Shot");
    assert!(!log.incomplete);
    assert_eq!(log.trailing_bytes, 0);
    assert_eq!(log.samples.len(), 4);

    let s = &log.samples[2];
    assert_eq!(s.t_ms, 500);
    assert!((s.target_temperature - 93.5).abs() < 1e-9);
    assert!((s.current_temperature - 92.1).abs() < 1e-9);
    assert!((s.target_pressure - 9.0).abs() < 1e-9);
    assert!((s.current_pressure - 8.2).abs() < 1e-9);
    assert!((s.pump_flow - 2.5).abs() < 1e-9);
    assert!((s.target_flow - 2.0).abs() < 1e-9);
    assert!((s.puck_flow - 1.25).abs() < 1e-9);
    assert!((s.scale_flow - 1.5).abs() < 1e-9);
    assert!((s.weight - 2.0).abs() < 1e-9);
    assert!((s.estimated_weight - 2.5).abs() < 1e-9);
    assert!((s.puck_resistance - 12.34).abs() < 1e-9);
}

#[test]
fn finished_shot_uses_header_duration_and_final_weight() {
    let log = ShotLog::decode(&finished(3)).unwrap();
    assert_eq!(log.duration_ms, 9_999);
    assert_eq!(log.volume, Some(36.2));
}

#[test]
fn negative_flows_decode_signed() {
    let mut buf = header(&Header {
        interval: 100,
        count: 1,
        duration: 100,
        final_weight: 0,
    });
    buf.extend(sample(0, 0, -150, 0));
    let log = ShotLog::decode(&buf).unwrap();
    assert!((log.samples[0].pump_flow + 1.5).abs() < 1e-9);
    assert!((log.samples[0].puck_flow + 0.75).abs() < 1e-9);
}

#[test]
fn zero_count_means_incomplete_and_reads_all_samples() {
    let mut buf = header(&Header {
        interval: 100,
        count: 0,
        duration: 0,
        final_weight: 0,
    });
    for i in 0..5 {
        buf.extend(sample(i, 90, 200, 100 + i));
    }
    let log = ShotLog::decode(&buf).unwrap();
    assert!(log.incomplete);
    assert_eq!(log.samples.len(), 5);
    assert_eq!(log.duration_ms, 400);
    // no final weight in the header: fall back to the last sample
    assert_eq!(log.volume, Some(10.4));
}

#[test]
fn partial_trailing_record_is_dropped_and_flagged() {
    let mut buf = finished(3);
    buf.extend_from_slice(&[1, 2, 3, 4, 5]);
    let log = ShotLog::decode(&buf).unwrap();
    assert!(log.incomplete);
    assert_eq!(log.trailing_bytes, 5);
    assert_eq!(log.samples.len(), 3);
    // incomplete: duration comes from the last sample, not the header
    assert_eq!(log.duration_ms, 500);
}

#[test]
fn header_promising_more_samples_than_present_is_incomplete() {
    let mut buf = finished(2);
    buf[16..20].copy_from_slice(&10u32.to_le_bytes());
    let log = ShotLog::decode(&buf).unwrap();
    assert!(log.incomplete);
    assert_eq!(log.samples.len(), 2);
}

#[test]
fn extra_samples_beyond_header_count_are_ignored() {
    let mut buf = finished(2);
    buf.extend(sample(2, 90, 200, 50));
    let log = ShotLog::decode(&buf).unwrap();
    assert!(!log.incomplete);
    assert_eq!(log.samples.len(), 2);
}

#[test]
fn no_weight_anywhere_means_no_volume() {
    let mut buf = header(&Header {
        interval: 100,
        count: 1,
        duration: 100,
        final_weight: 0,
    });
    buf.extend(sample(0, 90, 200, 0));
    assert_eq!(ShotLog::decode(&buf).unwrap().volume, None);
}

#[test]
fn header_only_file_decodes_empty() {
    let buf = header(&Header {
        interval: 100,
        count: 0,
        duration: 0,
        final_weight: 0,
    });
    let log = ShotLog::decode(&buf).unwrap();
    assert!(log.samples.is_empty());
    assert!(log.incomplete);
    assert_eq!(log.duration_ms, 0);
}

#[test]
fn rejects_short_buffer() {
    assert_eq!(
        ShotLog::decode(&[0u8; 10]),
        Err(DecodeError::TooSmall {
            expected: 128,
            actual: 10
        })
    );
}

#[test]
fn rejects_wrong_magic() {
    let mut buf = finished(1);
    buf[0..4].copy_from_slice(b"XXXX");
    assert!(matches!(
        ShotLog::decode(&buf),
        Err(DecodeError::BadMagic { expected: SHOT_MAGIC, .. })
    ));
}

#[test]
fn rejects_unexpected_record_sizes() {
    let mut buf = finished(1);
    buf[5] = 20;
    assert_eq!(
        ShotLog::decode(&buf),
        Err(DecodeError::RecordSize {
            expected: 24,
            found: 20
        })
    );

    let mut buf = finished(1);
    buf[6..8].copy_from_slice(&64u16.to_le_bytes());
    assert_eq!(
        ShotLog::decode(&buf),
        Err(DecodeError::HeaderSize {
            expected: 128,
            found: 64
        })
    );
}

#[test]
fn invalid_utf8_in_names_is_replaced() {
    let mut buf = finished(1);
    buf[60] = 0xff;
    let log = ShotLog::decode(&buf).unwrap();
    assert!(log.profile_name.starts_with('\u{fffd}'));
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn arbitrary_bodies_never_panic(body in proptest::collection::vec(any::<u8>(), 0..400)) {
            let mut buf = finished(0);
            buf.extend(body);
            let log = ShotLog::decode(&buf).unwrap();
            prop_assert_eq!(log.samples.len(), (buf.len() - SHOT_HEADER_SIZE) / SHOT_SAMPLE_SIZE);
            prop_assert!(log.incomplete);
        }

        #[test]
        fn arbitrary_bytes_decode_or_error(buf in proptest::collection::vec(any::<u8>(), 0..300)) {
            let _ = ShotLog::decode(&buf);
        }
    }
}
