use anyhow::{anyhow, Context, Result};
use image::ImageReader;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::canvas::{centered_offset, squared_canvas};
use crate::output::{encode, OutputLayout, OutputProfile};

/// Supported input formats, classified by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Jpeg,
    Png,
}

impl InputKind {
    /// Classify a file by its extension, ASCII case-insensitive. Returns
    /// `None` for extensions the tool does not convert.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?;
        if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else if ext.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else {
            None
        }
    }

    /// Output profiles for this input kind. JPEG sources get a single JPEG
    /// output; PNG sources get a JPEG output and a PNG output.
    pub fn profiles(self, jpeg_quality: u8) -> Vec<OutputProfile> {
        match self {
            Self::Jpeg => vec![OutputProfile::jpeg(jpeg_quality)],
            Self::Png => vec![OutputProfile::jpeg(jpeg_quality), OutputProfile::png()],
        }
    }
}

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub layout: OutputLayout,
    pub jpeg_quality: u8,
    pub verbose: bool,
}

/// Counts reported after a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Source files converted successfully.
    pub processed: usize,
    /// Output files written.
    pub written: usize,
    /// Files skipped because their extension is unsupported.
    pub skipped: usize,
    /// Files that could not be converted.
    pub failed: usize,
}

/// Decode `input`, composite it onto a square canvas per `profile`, and
/// write the encoded bytes to `output`. The output directory must already
/// exist.
pub fn squareify_file(
    input: &Path,
    output: &Path,
    profile: &OutputProfile,
    verbose: bool,
) -> Result<()> {
    let img = ImageReader::open(input)
        .with_context(|| format!("Failed to open input file: {:?}", input))?
        .decode()
        .with_context(|| format!("Failed to decode image: {:?}", input))?;
    let source = img.to_rgba8();

    if verbose {
        let (width, height) = source.dimensions();
        let size = width.max(height);
        let (x, y) = centered_offset(size, width, height);
        eprintln!(
            "Loaded image: {:?} ({}x{}), canvas {}x{}, offset ({}, {})",
            input, width, height, size, size, x, y
        );
    }

    let canvas = squared_canvas(&source, profile.background);
    let bytes = encode(canvas, profile)?;
    fs::write(output, bytes)
        .with_context(|| format!("Failed to save output: {:?}", output))?;

    Ok(())
}

/// Convert every supported image in the input directory.
///
/// Unsupported files are skipped with a notice. A file that fails to decode
/// or write is reported and does not stop the rest of the batch; the failure
/// shows up in the summary instead.
pub fn run(config: &BatchConfig) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    let mut queue = Vec::new();

    for path in collect_files(&config.input_dir)? {
        match InputKind::from_path(&path) {
            Some(kind) => queue.push((path, kind)),
            None => {
                eprintln!("Skipping unsupported file: {:?}", path);
                summary.skipped += 1;
            }
        }
    }

    if queue.is_empty() {
        eprintln!("No images found in {:?}", config.input_dir);
        return Ok(summary);
    }

    log::debug!("Queued {} files from {:?}", queue.len(), config.input_dir);

    for (path, kind) in queue {
        match process_file(&path, kind, config, &mut summary.written) {
            Ok(()) => summary.processed += 1,
            Err(e) => {
                eprintln!("Failed: {:?} - {:#}", path, e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Regular files directly inside `dir`, sorted for a stable processing
/// order. Subdirectories are not descended into.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    // Entry errors during the walk only skip that entry, so the directory
    // itself is checked up front.
    fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {:?}", dir))?;

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Convert one source file into every output its kind calls for. Each
/// output is counted as soon as it is written; outputs that land before a
/// failure stay counted.
fn process_file(
    path: &Path,
    kind: InputKind,
    config: &BatchConfig,
    written: &mut usize,
) -> Result<()> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("Non-unicode file name: {:?}", path))?;

    for profile in kind.profiles(config.jpeg_quality) {
        let output_path = config.layout.output_path(stem, profile.format)?;
        eprintln!("Processing: {:?} -> {:?}", path, output_path);
        squareify_file(path, &output_path, &profile, config.verbose)?;
        *written += 1;
    }

    Ok(())
}
