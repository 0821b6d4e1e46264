use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use stillcast::{
    AnimationType, OutputTarget, RenderOpts, RenderParameters, RenderRequest, render_to_mp4,
    resolve_script, validate_media,
};

#[derive(Parser, Debug)]
#[command(name = "stillcast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that input assets exist and are usable.
    Validate(ValidateArgs),
    /// Render an MP4 slideshow (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Image files in playback order.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Optional audio file.
    #[arg(long)]
    audio: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Image files in playback order.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Optional audio file, trimmed or looped to the video duration.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Script file (JSON or free-form text) to resolve parameters from.
    /// Explicit flags below override the script's values.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Output frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Seconds each image is displayed.
    #[arg(long)]
    duration: Option<f64>,

    /// Cross-fade length at clip boundaries in seconds.
    #[arg(long)]
    transition: Option<f64>,

    /// Animation style: fade, zoom, or pan.
    #[arg(long, value_parser = parse_animation)]
    animation: Option<AnimationType>,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Output MP4 path. Defaults to a uniquely named file in the system
    /// temp directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Overwrite the output file if it already exists.
    #[arg(long, default_value_t = true)]
    overwrite: bool,
}

fn parse_animation(s: &str) -> Result<AnimationType, String> {
    AnimationType::parse(s).ok_or_else(|| format!("unknown animation '{s}' (fade | zoom | pan)"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let report = validate_media(&args.images, args.audio.as_deref());
    if report.valid {
        println!("ok: {} image(s) ready", args.images.len());
        return Ok(());
    }
    for error in &report.errors {
        eprintln!("error: {error}");
    }
    anyhow::bail!("validation failed with {} error(s)", report.errors.len());
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut params = RenderParameters::default();

    if let Some(script_path) = &args.script {
        let script = std::fs::read_to_string(script_path)
            .with_context(|| format!("read script file '{}'", script_path.display()))?;
        params = resolve_script(&script, &params);
    }

    if let Some(fps) = args.fps {
        params.fps = fps;
    }
    if let Some(duration) = args.duration {
        params.duration_per_image = duration;
    }
    if let Some(transition) = args.transition {
        params.transition_duration = transition;
    }
    if let Some(animation) = args.animation {
        params.animation_type = animation;
    }
    if let Some(width) = args.width {
        params.target_width = width;
    }
    if let Some(height) = args.height {
        params.target_height = height;
    }

    let request = RenderRequest {
        images: args.images,
        audio: args.audio,
        params,
    };
    let opts = RenderOpts {
        output: match args.out {
            Some(path) => OutputTarget::Explicit(path),
            None => OutputTarget::UniqueIn(std::env::temp_dir()),
        },
        overwrite: args.overwrite,
        ..RenderOpts::default()
    };

    let out_path = render_to_mp4(&request, &opts)?;
    println!("{}", out_path.display());
    Ok(())
}
