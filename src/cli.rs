//! Command line definitions using clap

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hackerbeeper")]
#[command(about = "Beep a melody on the speakers, one note per keypress")]
pub struct Cli {
    /// Name of the song to play
    #[arg(short, long)]
    pub song: Option<String>,

    /// JSON file with additional songs
    #[arg(long, value_name = "FILE")]
    pub songs: Option<PathBuf>,

    /// Output sample rate in Hz
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub sample_rate: Option<u32>,

    /// Settings file to use instead of the one in the config directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Play the whole song once without waiting for keys
    Autoplay,
    /// List the available songs
    List,
}
