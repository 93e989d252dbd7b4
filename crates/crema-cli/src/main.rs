use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::{debug, info};

use crema_cli::input::{read_binary, read_text, MAX_SAMPLES};
use crema_cli::logging::init_logging;
use crema_cli::render;
use crema_convert::{convert_tcl_with_report, import};
use crema_model::{Channel, Profile};
use crema_shotlog::{ShotIndex, ShotLog};
use crema_timeline::{simulate, TICK};

#[derive(Parser, Debug)]
#[command(name = "crema")]
#[command(about = "Brew profile conversion, simulation and shot history tools")]
struct Cli {
    /// Increase log detail (-v info, -vv debug, -vvv trace). CREMA_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a Tcl or JSON profile to the canonical schema
    Convert {
        /// Profile source: Tcl settings file, legacy JSON, or canonical JSON
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Include the conversion report (Tcl input only)
        #[arg(long)]
        report: bool,
    },

    /// Import profiles and validate each one
    Check {
        file: PathBuf,
    },

    /// Print the expected pressure or flow curve of a profile
    Simulate {
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = ChannelArg::Pressure)]
        channel: ChannelArg,

        #[arg(long, value_enum, default_value_t = SeriesFormat::Csv)]
        format: SeriesFormat,

        /// Which profile to use when the file holds several
        #[arg(long, default_value_t = 0)]
        index: usize,

        /// Print only a SHA-256 digest of the series
        #[arg(long)]
        digest: bool,
    },

    /// Summarise a recorded shot log (.slog)
    Shot {
        file: PathBuf,

        /// Also print every sample as CSV
        #[arg(long)]
        samples: bool,
    },

    /// List the shots in a history index (index.bin)
    History {
        file: PathBuf,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Pretty,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SeriesFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChannelArg {
    Pressure,
    Flow,
}

impl From<ChannelArg> for Channel {
    fn from(c: ChannelArg) -> Self {
        match c {
            ChannelArg::Pressure => Channel::Pressure,
            ChannelArg::Flow => Channel::Flow,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            file,
            format,
            report,
        } => cmd_convert(&file, format, report),
        Commands::Check { file } => cmd_check(&file),
        Commands::Simulate {
            file,
            channel,
            format,
            index,
            digest,
        } => cmd_simulate(&file, channel.into(), format, index, digest),
        Commands::Shot { file, samples } => cmd_shot(&file, samples),
        Commands::History { file, json } => cmd_history(&file, json),
    }
}

fn load_profiles(path: &Path) -> Result<Vec<Profile>> {
    let src = read_text(path)?;
    let profiles =
        import(&src).with_context(|| format!("could not convert '{}'", path.display()))?;
    info!(file = %path.display(), count = profiles.len(), "imported profiles");
    Ok(profiles)
}

fn cmd_convert(path: &Path, format: Format, report: bool) -> Result<()> {
    if report {
        let src = read_text(path)?;
        if serde_json::from_str::<serde_json::Value>(&src).is_ok() {
            bail!("--report is only available for Tcl profiles");
        }
        let conv = convert_tcl_with_report(&src)
            .with_context(|| format!("could not convert '{}'", path.display()))?;
        match format {
            Format::Pretty => {
                print!("{}", render::profile_text(&conv.profile));
                println!(
                    "parser: {:?}, source type: {}",
                    conv.report.parser, conv.report.source_profile_type
                );
            }
            Format::Json => {
                let out = json!({ "profile": conv.profile, "report": conv.report });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
        }
        return Ok(());
    }

    let profiles = load_profiles(path)?;
    match format {
        Format::Pretty => {
            for p in &profiles {
                print!("{}", render::profile_text(p));
            }
        }
        Format::Json => match profiles.as_slice() {
            [one] => println!("{}", serde_json::to_string_pretty(one)?),
            many => println!("{}", serde_json::to_string_pretty(many)?),
        },
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let profiles = load_profiles(path)?;
    let mut failures = 0;
    for p in &profiles {
        match p.validate() {
            Ok(()) => println!(
                "ok: {} ({} phases, {:.1}s)",
                p.label,
                p.phases.len(),
                p.total_duration()
            ),
            Err(e) => {
                failures += 1;
                println!("invalid: {}: {}", p.label, e);
            }
        }
    }
    if failures > 0 {
        bail!("{failures} of {} profiles failed validation", profiles.len());
    }
    Ok(())
}

fn cmd_simulate(
    path: &Path,
    channel: Channel,
    format: SeriesFormat,
    index: usize,
    digest: bool,
) -> Result<()> {
    let profiles = load_profiles(path)?;
    let count = profiles.len();
    let profile = profiles
        .get(index)
        .with_context(|| format!("profile index {index} out of range ({count} in file)"))?;
    profile
        .validate()
        .with_context(|| format!("profile '{}' is not valid", profile.label))?;
    let ticks = (profile.total_duration() / TICK).ceil();
    if ticks > MAX_SAMPLES as f64 {
        bail!(
            "profile '{}' would produce {ticks} samples, over the {MAX_SAMPLES} limit",
            profile.label
        );
    }
    let samples = simulate(&profile.phases, channel);
    debug!(
        profile = %profile.label,
        channel = channel.as_str(),
        samples = samples.len(),
        "simulated"
    );

    if digest {
        println!("{}", render::series_digest(&samples)?);
        return Ok(());
    }
    match format {
        SeriesFormat::Csv => print!("{}", render::series_csv(&samples)),
        SeriesFormat::Json => println!("{}", serde_json::to_string_pretty(&samples)?),
    }
    Ok(())
}

fn cmd_shot(path: &Path, samples: bool) -> Result<()> {
    let bytes = read_binary(path)?;
    let log = ShotLog::decode(&bytes)
        .with_context(|| format!("could not decode shot log '{}'", path.display()))?;
    print!("{}", render::shot_text(&log));
    if samples {
        print!("{}", render::shot_samples_csv(&log));
    }
    Ok(())
}

fn cmd_history(path: &Path, json: bool) -> Result<()> {
    let bytes = read_binary(path)?;
    let index = ShotIndex::decode(&bytes)
        .with_context(|| format!("could not decode shot index '{}'", path.display()))?;
    let list = index.shot_list();
    info!(
        entries = index.entries.len(),
        listed = list.len(),
        "decoded shot index"
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        print!("{}", render::history_text(&list));
    }
    Ok(())
}
