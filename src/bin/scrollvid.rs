use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollvid", version, about = "Render scrolling videos from tall SVG drawings")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the scroll as numbered PNG frames.
    Frames(FramesArgs),
    /// Print the frame plan (drawing height, advance, frame count) without rendering.
    Plan(PlanArgs),
    /// Encode a directory of PNG frames into an MP4 (requires `ffmpeg` on PATH).
    Encode(EncodeArgs),
}

#[derive(Args, Debug)]
struct ScrollArgs {
    /// JSON scroll config; replaces the flags below.
    #[arg(long, conflicts_with = "svg")]
    config: Option<PathBuf>,

    /// Input SVG drawing.
    #[arg(long, required_unless_present = "config")]
    svg: Option<PathBuf>,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Seconds needed to scroll one full screen.
    #[arg(long, default_value_t = 8.0)]
    pace: f64,

    /// Vector rasterizer backend.
    #[arg(long, value_enum, default_value_t = RasterizerChoice::Inkscape)]
    rasterizer: RasterizerChoice,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scroll: ScrollArgs,

    /// Output directory for the frames.
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    out: Option<PathBuf>,

    /// Full-drawing cache strategy.
    #[arg(long, value_enum, default_value_t = CacheChoice::Memory)]
    cache: CacheChoice,

    /// Export frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    scroll: ScrollArgs,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Directory where the PNG frames are stored.
    indir: PathBuf,

    /// Video file to write. Defaults to `<indir>/rendered.mp4`.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Video frames per second; should match the value used to render the frames.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Common prefix of the PNG files, e.g. `render_`.
    #[arg(long, default_value = "")]
    prefix: String,

    /// Number of zero-padded digits in the PNG sequence.
    #[arg(long, short = 'd', default_value_t = 6)]
    digits: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CacheChoice {
    None,
    Memory,
    Png,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RasterizerChoice {
    Inkscape,
    Resvg,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Encode(args) => cmd_encode(args),
    }
}

/// Config from `--config`, or from the flags. `out` and `cache` only matter when rendering.
fn scroll_config(
    args: &ScrollArgs,
    out: Option<PathBuf>,
    cache: CacheChoice,
) -> anyhow::Result<scrollvid::ScrollConfig> {
    if let Some(path) = &args.config {
        return Ok(scrollvid::ScrollConfig::from_path(path)?);
    }
    let svg = args.svg.clone().context("--svg is required")?;
    let out = out.unwrap_or_else(|| PathBuf::from("."));
    let cache = match cache {
        CacheChoice::None => scrollvid::CacheMode::None,
        CacheChoice::Memory => scrollvid::CacheMode::Memory,
        CacheChoice::Png => scrollvid::CacheMode::Png,
    };
    Ok(scrollvid::ScrollConfig::new(
        svg,
        out,
        args.width,
        args.height,
        args.fps,
        args.pace,
        cache,
    )?)
}

fn make_rasterizer(choice: RasterizerChoice) -> Box<dyn scrollvid::VectorRasterizer> {
    let kind = match choice {
        RasterizerChoice::Inkscape => scrollvid::RasterizerKind::Inkscape,
        RasterizerChoice::Resvg => scrollvid::RasterizerKind::Resvg,
    };
    scrollvid::create_rasterizer(kind)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let config = scroll_config(&args.scroll, args.out.clone(), args.cache)?;
    let rasterizer = make_rasterizer(args.scroll.rasterizer);
    let opts = scrollvid::RenderOpts {
        parallel: args.parallel,
        threads: args.threads,
    };

    let mut scroller = scrollvid::Scroller::with_opts(config, rasterizer.as_ref(), opts);
    let report = scroller
        .render()
        .with_context(|| format!("render frames with {}", rasterizer.name()))?;

    eprintln!(
        "wrote {} frames to {}",
        report.frames,
        report.outdir.display()
    );
    eprintln!("next step: scrollvid encode {}", report.outdir.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    // Planning never writes frames, so no output directory is needed.
    let config = scroll_config(&args.scroll, None, CacheChoice::None)?;
    let rasterizer = make_rasterizer(args.scroll.rasterizer);
    if !config.svg().exists() {
        return Err(scrollvid::ScrollError::SourceNotFound(config.svg().to_path_buf()).into());
    }
    let scroller = scrollvid::Scroller::new(config, rasterizer.as_ref());
    let seq = scroller.sequence()?;
    let last = seq.last_frame_rect();

    println!("drawing_height_px: {}", seq.drawing_height_px());
    println!("advance_px:        {}", seq.advance_px());
    println!("frames:            {}", seq.estimated_frame_count());
    println!("last_frame:        {last}");
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let opts = scrollvid::EncodeOpts {
        output: args.output,
        fps: args.fps,
        prefix: args.prefix,
        digits: args.digits,
        ..scrollvid::EncodeOpts::new(args.indir)
    };
    let out = scrollvid::encode_frames(&opts)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
