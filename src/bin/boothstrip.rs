use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "boothstrip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite photos into a strip or grid and save the PNG.
    Render(RenderArgs),
    /// Composite photos and print a data URL preview to stdout.
    Preview(PreviewArgs),
    /// List the available layouts.
    Layouts,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input photo files, in capture order.
    #[arg(required = true)]
    photos: Vec<PathBuf>,

    /// Layout id (see `boothstrip layouts`).
    #[arg(long, default_value = "strip-3")]
    layout: String,

    /// Background color, `#RRGGBB` or `#RGB`.
    #[arg(long, default_value = "#FF6B9D")]
    background: String,

    /// Output PNG path; defaults to a timestamped filename in the working
    /// directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input photo files, in capture order.
    #[arg(required = true)]
    photos: Vec<PathBuf>,

    /// Layout id (see `boothstrip layouts`).
    #[arg(long, default_value = "strip-3")]
    layout: String,

    /// Background color, `#RRGGBB` or `#RGB`.
    #[arg(long, default_value = "#FF6B9D")]
    background: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Layouts => cmd_layouts(),
    }
}

fn read_photos(paths: &[PathBuf]) -> anyhow::Result<Vec<boothstrip::CapturedPhoto>> {
    paths
        .iter()
        .map(|p| {
            boothstrip::CapturedPhoto::from_path(p)
                .with_context(|| format!("load photo '{}'", p.display()))
        })
        .collect()
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let layout = boothstrip::layout_by_id(&args.layout)?;
    let photos = read_photos(&args.photos)?;

    let surface = boothstrip::render_photos(&photos, &layout, &args.background)?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(boothstrip::timestamped_filename()));
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    boothstrip::save_png(&surface, &out)?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let layout = boothstrip::layout_by_id(&args.layout)?;
    let photos = read_photos(&args.photos)?;

    let surface = boothstrip::render_photos(&photos, &layout, &args.background)?;
    println!("{}", boothstrip::preview_data_url(&surface)?);
    Ok(())
}

fn cmd_layouts() -> anyhow::Result<()> {
    for entry in boothstrip::layout::registry() {
        println!(
            "{:<10} {:<14} {} pose(s), {}",
            entry.id,
            entry.name,
            entry.poses,
            entry.grid.as_str()
        );
    }
    Ok(())
}
