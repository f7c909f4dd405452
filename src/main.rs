use anyhow::Result;
use chrono::Local;
use clap::Parser;

use squarepad::{run, BatchConfig, Cli, OutputLayout};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // One stamp per run, so every output of the batch lands in the same
    // pair of directories.
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let layout = OutputLayout::new(&cli.output_root, &stamp);

    let config = BatchConfig {
        input_dir: cli.input,
        layout,
        jpeg_quality: cli.jpeg_quality,
        verbose: cli.verbose,
    };

    let summary = run(&config)?;

    if summary.processed > 0 || summary.failed > 0 {
        eprintln!(
            "All images processed! {} converted ({} outputs), {} skipped, {} failed",
            summary.processed, summary.written, summary.skipped, summary.failed
        );
    }

    Ok(())
}
