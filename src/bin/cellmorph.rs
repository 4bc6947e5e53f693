use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use cellmorph::{
    CpuSurface, CpuSurfaceOpts, FfmpegSink, LogStatusSink, MorphConfig, MorphSession,
    PngSequenceSink, render_still, render_transition, write_frame_png,
};

#[derive(Parser, Debug)]
#[command(name = "cellmorph", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full transformation as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render the full transformation as numbered PNG frames.
    Frames(FramesArgs),
    /// Render a single moment of the transformation as a PNG.
    Still(StillArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Image the particles start from.
    #[arg(long)]
    source: PathBuf,

    /// Image the particles settle into.
    #[arg(long)]
    target: PathBuf,

    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling grid step in pixels.
    #[arg(long)]
    cell_size: Option<u32>,

    /// Side of the square canvas in pixels.
    #[arg(long)]
    canvas_size: Option<u32>,

    /// Output frame rate (integer frames per second).
    #[arg(long)]
    fps: Option<u32>,

    /// RNG seed for a reproducible shuffle.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Directory receiving `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct StillArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Seconds since the transformation began.
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Still(args) => cmd_still(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &CommonArgs) -> anyhow::Result<MorphConfig> {
    let mut cfg = match &args.config {
        Some(path) => MorphConfig::from_path(path)?,
        None => MorphConfig::default(),
    };
    if let Some(cell_size) = args.cell_size {
        cfg.cell_size = cell_size;
    }
    if let Some(canvas_size) = args.canvas_size {
        cfg.canvas_size = canvas_size;
    }
    if let Some(fps) = args.fps {
        cfg.fps = cellmorph::Fps::new(fps, 1)?;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Load both images and start the transformation.
fn start_session(
    args: &CommonArgs,
) -> anyhow::Result<(MorphSession<LogStatusSink>, CpuSurface)> {
    let cfg = load_config(args)?;
    let surface = CpuSurface::new(
        cfg.canvas_size,
        cfg.canvas_size,
        CpuSurfaceOpts {
            clear_rgba: cfg.background,
        },
    )?;
    let mut session = MorphSession::new(cfg, LogStatusSink::new())?;
    session
        .load_target_file(&args.target)
        .with_context(|| format!("load target '{}'", args.target.display()))?;
    let particles = session
        .begin_file(&args.source)
        .with_context(|| format!("load source '{}'", args.source.display()))?;
    tracing::debug!(particles, "session started");
    Ok((session, surface))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (mut session, mut surface) = start_session(&args.common)?;
    let mut sink = FfmpegSink::from_config(&args.out, session.config());
    let stats = render_transition(&mut session, &mut surface, &mut sink)?;
    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames);
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (mut session, mut surface) = start_session(&args.common)?;
    let mut sink = PngSequenceSink::new(&args.out_dir, session.config().background);
    let stats = render_transition(&mut session, &mut surface, &mut sink)?;
    eprintln!("wrote {} frames to {}", stats.frames, args.out_dir.display());
    Ok(())
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let (mut session, mut surface) = start_session(&args.common)?;
    let frame = render_still(&mut session, &mut surface, args.at)?;
    write_frame_png(&args.out, &frame, session.config().background)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
