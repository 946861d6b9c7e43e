use anyhow::{Context, Result};
use clap::Parser;
use cli::{Command, CommandLineArguments};
use courtship::{Config, TimeZone, TrackingSummary};
use log::LevelFilter;
use logger::Logger;
use std::path::Path;
use util::{framenumber_to_hhmmss, ScopedTimer};

mod cli;
mod logger;
mod util;

fn main() {
    let args = CommandLineArguments::parse();
    let level = match args.verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Info,
    };
    if let Err(e) = Logger::new(level).init() {
        eprintln!("{e}");
    }
    if let Err(e) = run(args) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: CommandLineArguments) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(seconds_east) = args.utc_offset {
        config.time_zone = TimeZone::FixedOffset { seconds_east };
    }

    match args.command {
        Command::New { output, values } => {
            let mut summary = TrackingSummary::new().with_time_zone(config.time_zone);
            summary.set_attributes(&values.into_iter().collect())?;
            summary
                .save(&output)
                .with_context(|| format!("Failed to save {}", output.display()))?;
            log::info!("Created {}", output.display());
        }
        Command::Set { summary: path, values } => {
            let mut summary = load(&path)?.with_time_zone(config.time_zone);
            summary.set_attributes(&values.into_iter().collect())?;
            summary
                .save(&path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            log::info!("Updated {}", path.display());
        }
        Command::Describe { summary } => {
            println!("{}", load(&summary)?);
        }
        Command::VideoStats { video } => {
            let _timer = ScopedTimer::new("video statistics");
            let mut summary = TrackingSummary::new().with_time_zone(config.time_zone);
            summary.video_file = Some(video.to_string_lossy().into_owned());
            let stats = summary.compute_video_statistics()?;
            println!("fps: {:.3}", stats.fps);
            println!("start_time: {}", stats.start_time);
            println!("end_time: {}", stats.end_time);
        }
        Command::Behaviors { summary } => {
            let summary = load(&summary)?;
            if let Err(e) = summary.check_behaviors(None) {
                log::warn!("{e}");
            }
            for (name, flags) in &summary.behaviors {
                let observed = flags.iter().filter(|flag| **flag).count();
                let percent = match flags.len() {
                    0 => 0.0,
                    n => 100.0 * observed as f64 / n as f64,
                };
                let duration = summary
                    .fps
                    .and_then(|fps| framenumber_to_hhmmss(observed as u64, fps));
                match duration {
                    Some(duration) => println!(
                        "{name}: {observed}/{} frames ({percent:.1}%), {duration}",
                        flags.len()
                    ),
                    None => println!("{name}: {observed}/{} frames ({percent:.1}%)", flags.len()),
                }
            }
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<TrackingSummary> {
    TrackingSummary::load(path).with_context(|| format!("Failed to load {}", path.display()))
}
