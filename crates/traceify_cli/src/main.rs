//! traceify - render a scene file or a built-in scene to an image.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use traceify_renderer::render;
use traceify_scene::{load_description, Preset, SamplingMode, SceneDescription};

/// Offline Whitted-style ray tracer
#[derive(Parser, Debug)]
#[command(
    name = "traceify",
    version,
    about = "Offline Whitted-style ray tracer",
    after_help = "EXAMPLES:\n  \
                  traceify scenes/mirror_spheres.json -o mirror.png\n  \
                  traceify --preset showcase --supersampling 4\n  \
                  traceify --preset mirror-box --mode uniform --no-jitter -o box.ppm"
)]
struct Args {
    /// Scene file (JSON). Ignored when --preset is given.
    scene: Option<PathBuf>,

    /// Built-in scene: single-sphere, occlusion, mirror-box or showcase
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Output image; `.ppm` is written directly, other extensions go through `image`
    #[arg(short, long, default_value = "traceify.png")]
    output: PathBuf,

    /// Override the image width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Override the image height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Supersampling level, 1 (one ray) to 4 (8x8 rays)
    #[arg(short, long)]
    supersampling: Option<u32>,

    /// How the sample count is chosen
    #[arg(short, long, value_enum)]
    mode: Option<CliSamplingMode>,

    #[arg(long)]
    no_shadows: bool,

    #[arg(long)]
    no_reflections: bool,

    /// Keep sub-samples on the regular grid at every level
    #[arg(long)]
    no_jitter: bool,

    /// Seed for the per-pixel jitter
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliSamplingMode {
    /// Start coarse and refine where samples disagree
    Adaptive,
    /// Always use the requested level
    Uniform,
}

impl From<CliSamplingMode> for SamplingMode {
    fn from(m: CliSamplingMode) -> Self {
        match m {
            CliSamplingMode::Adaptive => SamplingMode::Adaptive,
            CliSamplingMode::Uniform => SamplingMode::Uniform,
        }
    }
}

impl Args {
    fn description(&self) -> Result<SceneDescription> {
        match (&self.preset, &self.scene) {
            (Some(preset), _) => Ok(preset.description()),
            (None, Some(path)) => load_description(path)
                .with_context(|| format!("Failed to load scene {}", path.display())),
            (None, None) => {
                log::info!("No scene given, using preset '{}'", Preset::SingleSphere);
                Ok(Preset::SingleSphere.description())
            }
        }
    }

    /// Apply command line overrides on top of the scene's own settings.
    fn apply_overrides(&self, desc: &mut SceneDescription) {
        if let Some(width) = self.width {
            desc.image.width = width;
        }
        if let Some(height) = self.height {
            desc.image.height = height;
        }
        if let Some(level) = self.supersampling {
            desc.render.supersampling = level;
        }
        if let Some(mode) = self.mode {
            desc.render.mode = mode.into();
        }
        if let Some(seed) = self.seed {
            desc.render.seed = seed;
        }
        if self.no_shadows {
            desc.render.shadows = false;
        }
        if self.no_reflections {
            desc.render.reflections = false;
        }
        if self.no_jitter {
            desc.render.jitter = false;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    if args.preset.is_some() && args.scene.is_some() {
        log::warn!("Both a scene file and --preset given, rendering the preset");
    }

    let mut desc = args.description()?;
    args.apply_overrides(&mut desc);
    log::info!(
        "Scene '{}': {}x{}, {} objects, {} lights",
        desc.name,
        desc.image.width,
        desc.image.height,
        desc.objects.len(),
        desc.lights.len()
    );

    let world = desc.build_world().context("Failed to build scene")?;

    let start = Instant::now();
    let output = render(&world).context("Render failed")?;
    log::info!("Total time {:.2}s", start.elapsed().as_secs_f64());
    output.stats.log_summary();

    output
        .image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("traceify").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(args.scene.is_none());
        assert!(args.preset.is_none());
        assert_eq!(args.output, PathBuf::from("traceify.png"));

        let mut desc = args.description().unwrap();
        let before = desc.clone();
        args.apply_overrides(&mut desc);
        assert_eq!(desc, before);
        assert_eq!(desc.name, "single-sphere");
    }

    #[test]
    fn test_overrides_apply() {
        let args = parse(&[
            "--preset",
            "occlusion",
            "-W",
            "40",
            "-H",
            "30",
            "--supersampling",
            "4",
            "--mode",
            "uniform",
            "--seed",
            "9",
            "--no-shadows",
            "--no-reflections",
            "--no-jitter",
        ]);
        assert_eq!(args.preset, Some(Preset::Occlusion));

        let mut desc = args.description().unwrap();
        args.apply_overrides(&mut desc);
        assert_eq!((desc.image.width, desc.image.height), (40, 30));
        assert_eq!(desc.render.supersampling, 4);
        assert_eq!(desc.render.mode, SamplingMode::Uniform);
        assert_eq!(desc.render.seed, 9);
        assert!(!desc.render.shadows);
        assert!(!desc.render.reflections);
        assert!(!desc.render.jitter);
    }

    #[test]
    fn test_preset_wins_over_scene_file() {
        let args = parse(&["missing.json", "--preset", "mirror-box"]);
        let desc = args.description().unwrap();
        assert_eq!(desc.name, "mirror-box");
    }

    #[test]
    fn test_missing_scene_file_is_an_error() {
        let args = parse(&["definitely/not/here.json"]);
        let err = args.description().unwrap_err();
        assert!(err.to_string().contains("here.json"));
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let argv = ["traceify", "--preset", "teapot"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_override_reaches_world() {
        let args = parse(&["--preset", "single-sphere", "-W", "8", "-H", "6", "--mode", "uniform"]);
        let mut desc = args.description().unwrap();
        args.apply_overrides(&mut desc);

        let world = desc.build_world().unwrap();
        assert_eq!(world.viewport().width(), 8);
        assert_eq!(world.viewport().height(), 6);
        assert_eq!(
            world.config().supersampling.mode,
            traceify_renderer::SupersamplingMode::Uniform
        );
    }
}
