//! Preview renderer: computes one turbulence field and writes it as a PNG.
//! Stands in for the interactive window; `--nudge` replays key presses.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use simplex_core::{Direction, FieldPipeline, Knob, SessionConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render a simplex turbulence field to a PNG")]
struct Args {
    /// Session config JSON; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output image path.
    #[arg(short, long, default_value = "simplex.png")]
    output: PathBuf,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(short, long)]
    frequency: Option<f32>,

    #[arg(short, long)]
    lacunarity: Option<f32>,

    #[arg(short, long)]
    gain: Option<f32>,

    #[arg(long)]
    octaves: Option<u32>,

    /// Worker threads (default: all cores).
    #[arg(short, long)]
    workers: Option<usize>,

    /// Key presses to replay after the first render, e.g. `o+`, `f-`, `g+`, `l-`.
    /// Each one triggers a full recompute.
    #[arg(short, long, value_parser = parse_nudge)]
    nudge: Vec<(Knob, Direction)>,
}

fn parse_nudge(s: &str) -> Result<(Knob, Direction)> {
    let mut chars = s.chars();
    let (Some(key), Some(sign), None) = (chars.next(), chars.next(), chars.next()) else {
        bail!("expected a key and a sign, e.g. `o+`, got `{s}`");
    };
    let knob = match key.to_ascii_lowercase() {
        'o' => Knob::Octaves,
        'f' => Knob::Frequency,
        'g' => Knob::Gain,
        'l' => Knob::Lacunarity,
        other => bail!("unknown key `{other}`, expected one of o, f, g, l"),
    };
    let dir = match sign {
        '+' => Direction::Up,
        '-' => Direction::Down,
        other => bail!("unknown sign `{other}`, expected + or -"),
    };
    Ok((knob, dir))
}

fn session(args: &Args) -> Result<SessionConfig> {
    let mut cfg = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(f) = args.frequency {
        cfg.params.frequency = f;
    }
    if let Some(l) = args.lacunarity {
        cfg.params.lacunarity = l;
    }
    if let Some(g) = args.gain {
        cfg.params.gain = g;
    }
    if let Some(o) = args.octaves {
        cfg.params.octaves = o;
    }
    if args.workers.is_some() {
        cfg.workers = args.workers;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let cfg = session(&args)?;
    let mut params = cfg.params;

    let mut pipeline = FieldPipeline::from_config(&cfg)?;
    pipeline.render(&params)?;

    for &(knob, dir) in &args.nudge {
        params.nudge(knob, dir);
        info!(?knob, ?dir, ?params, "parameter nudged");
        pipeline.render(&params)?;
    }

    let dims = pipeline.dims();
    let img = image::RgbaImage::from_raw(
        dims.width as u32,
        dims.height as u32,
        pipeline.into_pixels().into_bytes(),
    )
    .context("pixel buffer does not match image size")?;
    img.save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(path = %args.output.display(), "wrote image");

    Ok(())
}
