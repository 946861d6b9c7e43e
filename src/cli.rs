use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

/// Tracking summaries for fly courtship videos
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArguments {
    /// Path to configuration json
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Render video timestamps with this UTC offset (seconds east) instead of the configured zone
    #[arg(long, allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,
    /// Print debug output
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a summary file. Values are parsed as json, anything else is taken as a string.
    New {
        output: PathBuf,
        #[arg(value_parser = parse_key_value)]
        values: Vec<(String, Value)>,
    },
    /// Update attributes of an existing summary file
    Set {
        summary: PathBuf,
        #[arg(required = true, value_parser = parse_key_value)]
        values: Vec<(String, Value)>,
    },
    /// Print the metadata of a summary file
    Describe { summary: PathBuf },
    /// Print frame rate, start and end time of a video
    VideoStats { video: PathBuf },
    /// Print how often each behavior was observed
    Behaviors { summary: PathBuf },
}

pub fn parse_key_value(arg: &str) -> Result<(String, Value), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {arg}"))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}
