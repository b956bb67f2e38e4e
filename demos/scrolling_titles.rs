//! Render the frames of a scrolling-titles video.
//!
//! Usage: `cargo run --example scrolling_titles -- <titles.svg> [inkscape|resvg]`

use std::path::PathBuf;

use anyhow::Context as _;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args_os().skip(1);
    let svg = args
        .next()
        .map(PathBuf::from)
        .context("usage: scrolling_titles <titles.svg> [inkscape|resvg]")?;
    let kind = match args.next().as_deref().and_then(|s| s.to_str()) {
        Some("resvg") => scrollvid::RasterizerKind::Resvg,
        _ => scrollvid::RasterizerKind::Inkscape,
    };

    let outdir = std::env::temp_dir().join("rendered");
    let config = scrollvid::ScrollConfig::new(
        svg,
        &outdir,
        1920,
        1080,
        30,
        8.0,
        scrollvid::CacheMode::Memory,
    )?;

    let rasterizer = scrollvid::create_rasterizer(kind);
    let report = scrollvid::Scroller::new(config, rasterizer.as_ref()).render()?;

    println!(
        "Generated {} video frames to {}",
        report.frames,
        outdir.display()
    );
    println!("Next step: scrollvid encode {}", outdir.display());
    Ok(())
}
