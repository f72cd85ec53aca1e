//! `lumen` - render a JSON scene description to an image file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::{load_scene, SceneOptions};
use lumen_renderer::{ImageBuffer, Scene};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None, disable_help_flag = true)]
struct Args {
    /// Scene description file (JSON)
    #[arg(short, long)]
    file: PathBuf,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(short, long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'h', long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Anti-aliasing grid size (overrides the scene file)
    #[arg(short = 'x', long)]
    aa_multiplier: Option<u32>,

    /// Aperture radius; 0 disables depth of field (overrides the scene file)
    #[arg(short = 'r', long)]
    aperture_radius: Option<f32>,

    /// Distance to the plane of perfect focus (overrides the scene file)
    #[arg(short = 'l', long)]
    focal_length: Option<f32>,

    /// Seed for depth-of-field sampling (overrides the scene file)
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

impl Args {
    /// Layer command line overrides on top of the scene file's options.
    fn scene_options(&self, base: Option<SceneOptions>) -> SceneOptions {
        let mut options = base.unwrap_or_default();
        if let Some(multiplier) = self.aa_multiplier {
            options.aa_multiplier = multiplier;
        }
        if let Some(radius) = self.aperture_radius {
            options.aperture_radius = radius;
        }
        if let Some(length) = self.focal_length {
            options.focal_length = length;
        }
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        options
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let description = load_scene(&args.file)
        .with_context(|| format!("failed to load scene {}", args.file.display()))?;

    let options = args.scene_options(description.options);
    options.validate().context("invalid render options")?;

    let scene = Scene::from_description(options, &description)?;

    let mut image = ImageBuffer::new(args.width, args.height);
    scene.render(&mut image);

    image
        .save(&args.output)
        .with_context(|| format!("failed to save image to {}", args.output.display()))?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}
