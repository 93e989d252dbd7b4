//! Plain-text renderings for terminal output.

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crema_model::Profile;
use crema_shotlog::{ShotListing, ShotLog};
use crema_timeline::Sample;

/// Header line plus one row per phase summary.
pub fn profile_text(profile: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} phases, {:.1}s max, {:.1}s brewing, {} C)",
        profile.label,
        profile.phases.len(),
        profile.total_duration(),
        profile.brewing_duration(),
        profile.temperature
    );
    for (i, row) in profile.summary().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<20} {:>6.1}s  {}",
            i + 1,
            row.name,
            row.max_duration,
            row.targets
        );
    }
    out
}

pub fn series_csv(samples: &[Sample]) -> String {
    let mut out = String::from("time,value,driven\n");
    for s in samples {
        let _ = writeln!(out, "{:.1},{:.3},{}", s.time, s.value, s.is_driven_channel);
    }
    out
}

/// SHA-256 of the series' JSON encoding. Identical profiles hash identically.
pub fn series_digest(samples: &[Sample]) -> serde_json::Result<String> {
    let bytes = serde_json::to_vec(samples)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("sha256:{:x}", hasher.finalize()))
}

pub fn shot_text(log: &ShotLog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "profile:   {} ({})", log.profile_name, log.profile_id);
    let _ = writeln!(out, "started:   {}", log.start_epoch);
    let _ = writeln!(out, "duration:  {:.1}s", log.duration_ms as f64 / 1000.0);
    match log.volume {
        Some(v) => {
            let _ = writeln!(out, "volume:    {v:.1}g");
        }
        None => {
            let _ = writeln!(out, "volume:    -");
        }
    }
    let _ = writeln!(
        out,
        "samples:   {} every {}ms",
        log.samples.len(),
        log.sample_interval_ms
    );
    if log.incomplete {
        let _ = writeln!(out, "status:    incomplete");
    }
    out
}

pub fn shot_samples_csv(log: &ShotLog) -> String {
    let mut out = String::from("t_ms,pressure,target_pressure,flow,puck_flow,weight,temperature\n");
    for s in &log.samples {
        let _ = writeln!(
            out,
            "{},{:.1},{:.1},{:.2},{:.2},{:.1},{:.1}",
            s.t_ms,
            s.current_pressure,
            s.target_pressure,
            s.pump_flow,
            s.puck_flow,
            s.weight,
            s.current_temperature
        );
    }
    out
}

pub fn history_text(list: &[ShotListing]) -> String {
    if list.is_empty() {
        return "no shots recorded\n".to_string();
    }
    let mut out = String::new();
    for s in list {
        let volume = s
            .volume
            .map(|v| format!("{v:.1}g"))
            .unwrap_or_else(|| "-".to_string());
        let rating = s
            .rating
            .map(|r| "*".repeat(r as usize))
            .unwrap_or_default();
        let mut flags = String::new();
        if s.incomplete {
            flags.push_str(" [incomplete]");
        }
        if s.has_notes {
            flags.push_str(" [notes]");
        }
        let _ = writeln!(
            out,
            "#{:<5} {:>10}  {:<24} {:>6.1}s {:>7} {:<5}{}",
            s.id,
            s.timestamp,
            s.profile,
            s.duration_ms as f64 / 1000.0,
            volume,
            rating,
            flags
        );
    }
    out
}
