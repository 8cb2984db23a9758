use crate::contents_json::ContentsFile;
use crate::render::{render_icon, RenderedIcon, Variant};
use crate::sizes::{plan, RenderJob, MAX_PIXEL_SIZE};
use anyhow::{bail, Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder,
};
use std::{
    collections::HashMap,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Asset catalog location relative to the project root
pub const DEFAULT_MANIFEST: &str = "PodcastAssistant/Assets.xcassets/AppIcon.appiconset/Contents.json";

/// Transparent export location relative to the project root
pub const DEFAULT_TRANSPARENT_DIR: &str = "docs/AppIconTransparent";

/// Plain configuration mirrored from the command line for library use
#[derive(Debug, Clone)]
pub struct Config {
    /// Project root, used to report output paths relative to it
    pub root: PathBuf,
    /// The asset catalog's Contents.json; Normal icons land next to it
    pub manifest: PathBuf,
    /// Where Transparent icons are written
    pub transparent_dir: PathBuf,
    pub variant: Variant,
}

impl Config {
    /// Configuration with every path derived from `root`
    pub fn with_root(root: impl Into<PathBuf>, variant: Variant) -> Self {
        let root = root.into();
        Self {
            manifest: root.join(DEFAULT_MANIFEST),
            transparent_dir: root.join(DEFAULT_TRANSPARENT_DIR),
            root,
            variant,
        }
    }

    /// Directory the current variant writes its PNGs into
    pub fn output_dir(&self) -> PathBuf {
        match self.variant {
            Variant::Normal => self
                .manifest
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            Variant::Transparent => self.transparent_dir.clone(),
        }
    }

    /// `path` relative to the project root when possible, for progress output
    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Every file written, in the order it was written
    pub written: Vec<PathBuf>,
    /// Whether the asset catalog manifest was rewritten
    pub manifest_updated: bool,
}

pub fn generate_icons(config: &Config) -> Result<Summary> {
    info!(variant = %config.variant, manifest = %config.manifest.display(), "generating app icons");

    let mut contents = ContentsFile::read(&config.manifest)?;
    let jobs = plan(&contents.descriptors(), config.variant);
    check_pixel_sizes(&jobs)?;

    let output_dir = config.output_dir();
    create_dir_all(&output_dir)
        .with_context(|| format!("Can't create output directory {}", output_dir.display()))?;

    let written = write_icons(config, &output_dir, &jobs)?;

    let manifest_updated = match config.variant {
        Variant::Normal => {
            annotate_manifest(&mut contents, &jobs);
            contents.write(&config.manifest)?;
            println!("✓ Updated asset catalog metadata");
            true
        }
        Variant::Transparent => {
            println!(
                "Transparent icons available in {}",
                config.display_path(&output_dir)
            );
            false
        }
    };

    Ok(Summary {
        written,
        manifest_updated,
    })
}

/// Reject sizes too large to render, before anything touches the disk
fn check_pixel_sizes(jobs: &[RenderJob]) -> Result<()> {
    if let Some(job) = jobs.iter().find(|job| job.pixel_size > MAX_PIXEL_SIZE) {
        bail!(
            "Image entry {} asks for {}px, above the {}px limit",
            job.index,
            job.pixel_size,
            MAX_PIXEL_SIZE
        );
    }
    Ok(())
}

/// Render and save every job, rendering each distinct pixel size once
fn write_icons(config: &Config, output_dir: &Path, jobs: &[RenderJob]) -> Result<Vec<PathBuf>> {
    let mut rendered: HashMap<u32, RenderedIcon> = HashMap::new();
    let mut written = Vec::new();

    for job in jobs {
        let target_path = output_dir.join(&job.filename);
        if written.contains(&target_path) {
            debug!(filename = %job.filename, "already written, skipping");
            continue;
        }

        let icon = rendered
            .entry(job.pixel_size)
            .or_insert_with(|| render_icon(job.pixel_size, config.variant));
        save_png(icon, &target_path)?;
        println!(
            "✓ Saved {} ({}px) -> {}",
            job.filename,
            job.pixel_size,
            config.display_path(&target_path)
        );
        written.push(target_path);
    }

    Ok(written)
}

/// Record each job's filename on the manifest entry that asked for it
fn annotate_manifest(contents: &mut ContentsFile, jobs: &[RenderJob]) {
    for job in jobs {
        contents.set_filename(job.index, &job.filename);
    }
}

pub fn save_png(icon: &RenderedIcon, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(icon.image.as_raw(), &mut out_file, icon.image.width())
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}
