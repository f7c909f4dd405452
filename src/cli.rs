use clap::Parser;
use std::path::PathBuf;

use crate::output::DEFAULT_JPEG_QUALITY;

#[derive(Parser, Debug)]
#[command(name = "squarepad")]
#[command(version, about = "Pad images onto square canvases without scaling the content")]
pub struct Cli {
    /// Directory of images to convert
    #[arg(default_value = "in")]
    pub input: PathBuf,

    /// Directory the timestamped output directories are created under
    #[arg(short, long, default_value = ".")]
    pub output_root: PathBuf,

    /// JPEG encode quality (1-100)
    #[arg(short = 'q', long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = parse_quality)]
    pub jpeg_quality: u8,

    /// Show canvas details per file
    #[arg(long)]
    pub verbose: bool,
}

fn parse_quality(s: &str) -> Result<u8, String> {
    let quality: u8 = s
        .parse()
        .map_err(|_| format!("Invalid quality value: {}", s))?;

    if !(1..=100).contains(&quality) {
        return Err("Quality must be between 1 and 100".to_string());
    }

    Ok(quality)
}
