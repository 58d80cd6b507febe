//! lithophane - convert an image into a printable relief block
//!
//! Dark pixels become tall columns, bright pixels thin ones. The result is a
//! closed solid written as binary (default) or ASCII STL.
//!
//! ```bash
//! lithophane -i photo.png
//! lithophane -i photo.jpg -o photo.stl --ascii
//! lithophane -i anim.gif -c lithophane.toml --levels 10
//! ```

use anyhow::Result;
use clap::Parser;
use litho_common::StlFormat;
use std::path::PathBuf;

use litho_export::{ConvertOptions, ExportConfig, convert_image, load_config};

#[derive(Parser)]
#[command(name = "lithophane")]
#[command(about = "Convert an image into a lithophane STL")]
#[command(version)]
struct Cli {
    /// Path to image file (PNG, JPEG or GIF)
    #[arg(short, long)]
    image: PathBuf,

    /// STL output file (defaults to lithophane.stl)
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Export STL as ASCII instead of binary
    #[arg(short, long)]
    ascii: bool,

    /// Configuration file (lithophane.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of relief levels
    #[arg(long)]
    levels: Option<u16>,

    /// Solid thickness under the brightest pixels (mm)
    #[arg(long)]
    base: Option<f64>,

    /// Height of one level and width of one pixel (mm)
    #[arg(long)]
    scale: Option<f64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ExportConfig::default(),
    };

    if let Some(levels) = cli.levels {
        config.quantize.levels = levels;
    }
    if let Some(base) = cli.base {
        config.relief.base = base;
    }
    if let Some(scale) = cli.scale {
        config.relief.scale = scale;
    }
    if cli.ascii {
        config.output.format = StlFormat::Ascii;
    }
    if let Some(output) = cli.output_file {
        config.output.path = output;
    }
    config.validate()?;

    let options = ConvertOptions {
        quantizer: config.quantize,
        relief: config.relief,
        format: config.output.format,
    };

    tracing::info!("Converting {:?} -> {:?}", cli.image, config.output.path);
    convert_image(&cli.image, &config.output.path, &options)?;
    tracing::info!("Done!");

    Ok(())
}
