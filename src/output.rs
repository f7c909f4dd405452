use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Canvas background for PNG targets: fully transparent.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Canvas background for JPEG targets: opaque white.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Default JPEG encode quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Canonical file extension for the encoded output.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Per-target encoding configuration. Format, canvas background and JPEG
/// quality are selected together, so call sites never branch on the format
/// when filling or encoding a canvas.
#[derive(Debug, Clone, Copy)]
pub struct OutputProfile {
    pub format: OutputFormat,
    pub background: Rgba<u8>,
    /// Only read when `format` is JPEG.
    pub jpeg_quality: u8,
}

impl OutputProfile {
    /// PNG target: transparent canvas, alpha preserved in the output.
    pub fn png() -> Self {
        Self {
            format: OutputFormat::Png,
            background: TRANSPARENT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// JPEG target: opaque white canvas, flattened to three channels.
    pub fn jpeg(quality: u8) -> Self {
        Self {
            format: OutputFormat::Jpeg,
            background: WHITE,
            jpeg_quality: quality,
        }
    }
}

/// Encode a composited canvas according to the profile.
///
/// JPEG output is flattened to RGB first; the canvas background is already
/// opaque, so dropping the alpha channel loses nothing. PNG output keeps
/// all four channels.
pub fn encode(canvas: RgbaImage, profile: &OutputProfile) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();

    match profile.format {
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut bytes, profile.jpeg_quality);
            rgb.write_with_encoder(encoder)
                .context("Failed to encode JPEG")?;
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut bytes);
            canvas
                .write_with_encoder(encoder)
                .context("Failed to encode PNG")?;
        }
    }

    Ok(bytes)
}

/// Per-run output directories, one per format, created on demand.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    jpeg_dir: PathBuf,
    png_dir: PathBuf,
}

impl OutputLayout {
    /// Lay out `out_jpg_<stamp>` and `out_png_<stamp>` under `root`. The
    /// stamp is captured once per run by the caller, so every output of a
    /// batch lands in the same pair of directories.
    pub fn new(root: &Path, stamp: &str) -> Self {
        Self {
            jpeg_dir: root.join(format!("out_jpg_{}", stamp)),
            png_dir: root.join(format!("out_png_{}", stamp)),
        }
    }

    pub fn dir(&self, format: OutputFormat) -> &Path {
        match format {
            OutputFormat::Jpeg => &self.jpeg_dir,
            OutputFormat::Png => &self.png_dir,
        }
    }

    /// Output path for an input stem: `<dir>/<stem>.<ext>`. The directory
    /// is created on first use, so a run that never writes a format never
    /// creates its directory.
    pub fn output_path(&self, stem: &str, format: OutputFormat) -> Result<PathBuf> {
        let dir = self.dir(format);
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
        Ok(dir.join(format!("{}.{}", stem, format.extension())))
    }
}
