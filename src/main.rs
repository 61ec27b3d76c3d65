use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::execute;
use crossterm::style;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mxquadtree::Coord;
use mxquadtree::config::Config;
use mxquadtree::config::parse_point;
use mxquadtree::document;
use mxquadtree::preview::Preview;
use mxquadtree::quadtree::MxQuadTree;
use mxquadtree::writer::Format;

/// Largest preview drawn, in cells on a side
const MAX_PREVIEW: usize = 128;

/// Build an MX-QuadTree from a list of points and export its structure.
#[derive(Parser, Debug)]
#[command(name = "mxquadtree")]
struct Args {
    /// Path to configuration TOML file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side length of the grid (a power of two).
    #[arg(short, long)]
    width: Option<Coord>,

    /// Point to insert, as `x,y`. Replaces the points of the config file. Repeatable.
    #[arg(short, long = "point", value_parser = parse_point)]
    points: Vec<[Coord; 2]>,

    /// Output file, `-` for stdout. Defaults to `mxquadtree.json`, or `mxquadtree.txt` for the
    /// outline format.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Print a braille preview of the occupied cells.
    #[arg(long)]
    preview: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if !args.points.is_empty() {
        config.points = args.points;
    }
    if let Some(output) = args.output {
        config.output = Some(output);
    }
    if let Some(format) = args.format {
        config.format = format;
    }

    let mut tree = MxQuadTree::new(config.width).context("Failed to create quadtree")?;

    for &[x, y] in &config.points {
        tree.insert(x, y)
            .with_context(|| format!("Failed to insert ({x},{y})"))?;
    }

    info!(
        width = tree.width(),
        points = tree.len(),
        nodes = tree.node_count(),
        "built quadtree"
    );

    let doc = document::serialize(&tree);
    debug!(depth = doc.depth(), "serialized quadtree");

    let output = config.output_path();
    write_document(&doc, &config, &output)?;

    let mut stdout = io::stdout();

    if args.preview {
        let mut preview = Preview::fitting(&tree, MAX_PREVIEW);
        preview.draw(&tree);

        execute!(stdout, style::Print(preview.render()))?;
    }

    if output != Path::new("-") {
        execute!(
            stdout,
            style::Print(format!("Structure exported to {}", output.display())),
            cursor::MoveToNextLine(1)
        )?;
    }

    Ok(())
}

fn write_document(
    doc: &document::Document,
    config: &Config,
    path: &Path,
) -> anyhow::Result<()> {
    if path == Path::new("-") {
        let mut stdout = io::stdout().lock();
        config.format.write(doc, &mut stdout, config.pretty)?;
        stdout.flush()?;

        return Ok(());
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    let mut w = BufWriter::new(file);
    config
        .format
        .write(doc, &mut w, config.pretty)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    w.flush()?;

    Ok(())
}
