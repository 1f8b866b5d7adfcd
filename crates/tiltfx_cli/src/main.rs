//! tiltfx CLI
//!
//! Inspect card variants, simulate tilt cards headlessly and convert gradient
//! utility classes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tiltfx_animation::FrameScheduler;
use tiltfx_cards::{CardFeatures, EntranceDirection, GradientClasses, TiltCard, TiltConfig};
use tiltfx_core::{Point, PointerEvent, Rect, Size};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::TiltfxConfig;

#[derive(Parser)]
#[command(name = "tiltfx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pointer-reactive 3D card toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./tiltfx.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List card variants, including configured ones
    Variants,

    /// Run a card headlessly and print its per-frame transforms
    Simulate {
        /// Variant key
        #[arg(long, default_value = "default")]
        variant: String,

        /// Card size as WIDTHxHEIGHT
        #[arg(long, default_value = "240x160")]
        size: String,

        /// Pointer position relative to the card origin, as X,Y
        #[arg(long, default_value = "120,-40", allow_hyphen_values = true)]
        pointer: String,

        /// Number of frames to run
        #[arg(long, default_value = "60")]
        frames: u32,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: f32,

        /// Frame at which the pointer leaves the card
        #[arg(long)]
        leave_at: Option<u32>,

        /// Play an entrance (up, down, left, right, fade, scale) from frame 0
        #[arg(long)]
        entrance: Option<String>,

        /// Print one JSON object per frame
        #[arg(long)]
        json: bool,
    },

    /// Parse gradient utility classes and print the CSS
    Gradient {
        /// Classes such as "from-[#ff0000] to-purple-500/20"
        classes: String,

        /// Fail instead of falling back to the default gradient
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let (config, source) = TiltfxConfig::discover(cli.config.as_deref())?;
    match &source {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file, using defaults"),
    }

    match cli.command {
        Commands::Variants => cmd_variants(&config),

        Commands::Simulate {
            variant,
            size,
            pointer,
            frames,
            fps,
            leave_at,
            entrance,
            json,
        } => {
            let options = SimulateOptions {
                variant,
                size: parse_size(&size)?,
                pointer: parse_point(&pointer)?,
                frames,
                fps,
                leave_at,
                entrance: entrance.as_deref().map(parse_entrance).transpose()?,
                json,
            };
            cmd_simulate(&config, &options)
        }

        Commands::Gradient { classes, strict } => cmd_gradient(&classes, strict),
    }
}

fn cmd_variants(config: &TiltfxConfig) -> Result<()> {
    let registry = config.registry()?;

    println!("{:<14} {:<5} {:>7}  layers", "variant", "size", "padding");
    for key in registry.keys() {
        let variant = registry.lookup(key);
        let layers: Vec<&str> = variant.layer_kinds().map(|k| k.name()).collect();
        println!(
            "{:<14} {:<5} {:>5}px  {}",
            key,
            format!("{:?}", variant.size).to_lowercase(),
            variant.padding(),
            layers.join(", ")
        );
    }
    Ok(())
}

struct SimulateOptions {
    variant: String,
    size: Size,
    pointer: Point,
    frames: u32,
    fps: f32,
    leave_at: Option<u32>,
    entrance: Option<EntranceDirection>,
    json: bool,
}

#[derive(Debug, Serialize)]
struct LayerReport {
    kind: &'static str,
    z_index: i32,
    opacity: f32,
}

#[derive(Debug, Serialize)]
struct FrameReport {
    frame: u32,
    time: f64,
    rotate_x: f32,
    rotate_y: f32,
    hover: f32,
    opacity: f32,
    transform: String,
    layers: Vec<LayerReport>,
    ripples: usize,
}

fn cmd_simulate(config: &TiltfxConfig, options: &SimulateOptions) -> Result<()> {
    if !options.fps.is_finite() || options.fps <= 0.0 {
        anyhow::bail!("--fps must be a positive number, got {}", options.fps);
    }

    let registry = config.registry()?;
    let tilt: TiltConfig = config.tilt_config()?;
    if !registry.contains(&options.variant) {
        info!(
            "Unknown variant '{}', falling back to default",
            options.variant
        );
    }

    let features = match options.entrance {
        Some(direction) => CardFeatures::interactive().with_entrance(direction, 0.0),
        None => CardFeatures {
            entrance: None,
            ..CardFeatures::interactive()
        },
    };
    let rect = Rect::new(0.0, 0.0, options.size.width, options.size.height);

    let scheduler = FrameScheduler::new();
    let mut card = TiltCard::from_registry(&registry, &options.variant, tilt, features, rect);
    card.mount(&scheduler.handle());
    card.set_visible(true);
    card.handle_event(&PointerEvent::Enter {
        client: options.pointer,
    });

    info!(
        "Simulating {} frames of '{}' at {} fps",
        options.frames,
        card.variant_key(),
        options.fps
    );

    let dt = 1.0 / options.fps;
    for frame in 0..options.frames {
        if options.leave_at == Some(frame) {
            card.handle_event(&PointerEvent::Leave);
        }
        scheduler.tick(dt);

        let report = frame_report(frame, scheduler.now(), &card);
        if options.json {
            println!(
                "{}",
                serde_json::to_string(&report).context("Failed to serialize frame")?
            );
        } else {
            println!(
                "{:>4}  t={:>6.3}s  rx={:>7.3}  ry={:>7.3}  hover={:.2}  {}",
                report.frame,
                report.time,
                report.rotate_x,
                report.rotate_y,
                report.hover,
                report.transform
            );
        }
    }

    card.unmount();
    Ok(())
}

fn frame_report(frame: u32, time: f64, card: &TiltCard) -> FrameReport {
    let angles = card.angles();
    let composed = card.frame();
    FrameReport {
        frame,
        time,
        rotate_x: angles.rotate_x,
        rotate_y: angles.rotate_y,
        hover: composed.card.hover_progress,
        opacity: composed.card.opacity,
        transform: composed.card.root.to_css(),
        layers: composed
            .card
            .layers
            .iter()
            .map(|layer| LayerReport {
                kind: layer.kind.name(),
                z_index: layer.z_index,
                opacity: layer.opacity,
            })
            .collect(),
        ripples: composed.ripples.len(),
    }
}

fn cmd_gradient(classes: &str, strict: bool) -> Result<()> {
    let parsed = if strict {
        GradientClasses::try_parse(classes)
            .with_context(|| format!("Invalid gradient classes '{classes}'"))?
    } else {
        GradientClasses::parse(classes)
    };

    println!("from:  {}", parsed.from);
    println!("to:    {}", parsed.to);
    println!("class: {}", parsed.to_class());
    println!("css:   {}", parsed.to_css());
    Ok(())
}

fn parse_size(input: &str) -> Result<Size> {
    let (w, h) = input
        .split_once(['x', 'X'])
        .with_context(|| format!("Size '{input}' must look like 240x160"))?;
    let size = Size::new(
        w.trim().parse().with_context(|| format!("Invalid width in '{input}'"))?,
        h.trim().parse().with_context(|| format!("Invalid height in '{input}'"))?,
    );
    if size.is_empty() {
        anyhow::bail!("Size '{input}' must be positive");
    }
    Ok(size)
}

fn parse_point(input: &str) -> Result<Point> {
    let (x, y) = input
        .split_once(',')
        .with_context(|| format!("Pointer '{input}' must look like 120,-40"))?;
    let point = Point::new(
        x.trim().parse().with_context(|| format!("Invalid x in '{input}'"))?,
        y.trim().parse().with_context(|| format!("Invalid y in '{input}'"))?,
    );
    if !point.is_finite() {
        anyhow::bail!("Pointer '{input}' must be finite");
    }
    Ok(point)
}

fn parse_entrance(input: &str) -> Result<EntranceDirection> {
    EntranceDirection::from_name(input).with_context(|| {
        format!("Unknown entrance '{input}' (up, down, left, right, fade, scale)")
    })
}
