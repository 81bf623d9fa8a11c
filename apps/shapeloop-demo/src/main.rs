use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use shapeloop_app::{OutputTarget, ShapeLoopAppBuilder};
use shapeloop_core::AnimationStatus;
use shapeloop_graphics::Motion;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MotionArg {
    Rotate,
    Translate,
}

impl From<MotionArg> for Motion {
    fn from(arg: MotionArg) -> Self {
        match arg {
            MotionArg::Rotate => Motion::Rotate,
            MotionArg::Translate => Motion::Translate,
        }
    }
}

/// Animates a rotating or sliding square as a stream of SVG frames.
#[derive(Debug, Parser)]
#[command(name = "shapeloop-demo", version)]
struct Args {
    /// How the animated parameter moves the square.
    #[arg(long, value_enum, default_value_t = MotionArg::Rotate)]
    motion: MotionArg,

    /// Parameter of the first frame (degrees or offset).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    start: f32,

    /// Total animation time in milliseconds.
    #[arg(long, default_value_t = 5000, allow_negative_numbers = true)]
    duration: i64,

    /// Delay between frames in milliseconds.
    #[arg(long, default_value_t = 50, allow_negative_numbers = true)]
    interval: i64,

    /// Parameter increment per frame.
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    step: f32,

    /// Wait for the next multiple of this many milliseconds before the first frame.
    #[arg(long)]
    align: Option<u64>,

    /// Overwrite this file with every frame instead of printing to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// SVG canvas width.
    #[arg(long, default_value_t = 200)]
    width: u32,

    /// SVG canvas height.
    #[arg(long, default_value_t = 200)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut builder = ShapeLoopAppBuilder::new()
        .motion(args.motion.into())
        .initial_parameter(args.start)
        .duration_millis(args.duration)
        .interval_millis(args.interval)
        .step(args.step)
        .canvas(args.width, args.height);
    if let Some(align) = args.align {
        builder = builder.align_first_tick(align);
    }
    if let Some(path) = args.output {
        builder = builder.output(OutputTarget::File(path));
    }

    let summary = builder.run().context("animation failed")?;
    match summary.status {
        AnimationStatus::Finished => log::info!("painted {} frames", summary.ticks),
        status => log::warn!("animation ended as {status:?} after {} frames", summary.ticks),
    }
    Ok(())
}
