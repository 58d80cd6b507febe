//! Image -> lithophane STL conversion

use anyhow::{Context, Result};
use litho_common::{
    Heightmap, PixelSource, Quantizer, ReliefConfig, ReliefGenerator, StlFormat, write_stl,
};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::image_source::load_pixel_source;

/// Settings for one conversion
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub quantizer: Quantizer,
    pub relief: ReliefConfig,
    pub format: StlFormat,
}

/// What a conversion produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub width: usize,
    pub height: usize,
    pub triangles: usize,
}

/// Stream the relief for `source` into `w`
///
/// Triangles are generated on the fly; only the heightmap is held in memory.
pub fn write_lithophane<W: Write>(
    source: &dyn PixelSource,
    options: &ConvertOptions,
    w: &mut W,
) -> Result<ConvertSummary> {
    options.quantizer.validate()?;
    options.relief.validate()?;

    let heightmap = Heightmap::from_pixels(source, &options.quantizer)
        .context("Failed to build heightmap")?;
    let generator = ReliefGenerator::new(&heightmap, options.relief);

    let triangles = generator.triangle_count();
    tracing::debug!(
        "Relief {}x{}: max level {}, {} triangles",
        heightmap.width(),
        heightmap.height(),
        heightmap.max_level(),
        triangles
    );

    write_stl(w, options.format, triangles, generator.triangles())
        .context("Failed to encode STL")?;

    Ok(ConvertSummary {
        width: heightmap.width(),
        height: heightmap.height(),
        triangles,
    })
}

/// Convert an image file to an STL file
///
/// The STL is written to a temporary file next to `output` and only moved
/// into place once encoding succeeded, so failures never leave partial files.
pub fn convert_image(input: &Path, output: &Path, options: &ConvertOptions) -> Result<ConvertSummary> {
    let image = load_pixel_source(input)?;

    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;

    let summary = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let summary = write_lithophane(image.as_source(), options, &mut writer)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write output: {:?}", output))?;
        summary
    };

    temp.persist(output)
        .with_context(|| format!("Failed to create output: {:?}", output))?;

    tracing::info!(
        "Converted {}x{} image: {} triangles, {:?} STL",
        summary.width,
        summary.height,
        summary.triangles,
        options.format
    );

    Ok(summary)
}
