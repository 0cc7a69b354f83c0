mod cells;
mod image_pipeline;
mod source;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, trace};

pub use cells::{Glyph, Rgb, TerminalCell};
pub use image_pipeline::{loader::load_rgba, resize::ResizePlan};
pub use source::{is_image_name, resolve_input, IMAGE_SUFFIXES};

#[derive(Debug, thiserror::Error)]
pub enum SlimeError {
    #[error("{} does not exist", .0.display())]
    PathNotFound(PathBuf),
    #[error("{} does not contain any image files", .0.display())]
    EmptyDirectory(PathBuf),
    #[error("failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
    #[error("image cannot be fit into at least one cell with the given limits")]
    InvalidLayout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Maximum number of terminal rows; each row holds two pixel rows.
    pub height_limit: u32,
    /// Maximum number of terminal columns.
    pub width_limit: u32,
    /// Blank lines written before the image.
    pub begin_padding: usize,
    /// Blank lines written after the image.
    pub end_padding: usize,
    /// Spaces written at the start of every image row.
    pub left_padding: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height_limit: 500,
            width_limit: 1000,
            begin_padding: 1,
            end_padding: 0,
            left_padding: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOutput {
    pub plan: ResizePlan,
    pub source_width: u32,
    pub source_height: u32,
    /// Terminal rows written, excluding padding.
    pub rows: u32,
}

#[derive(Default)]
pub struct SlimeRenderer;

impl SlimeRenderer {
    pub fn render_path<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        config: &RenderConfig,
        out: &mut W,
    ) -> Result<RenderOutput, SlimeError> {
        let image = load_rgba(path.as_ref())?;
        self.render_image(&image, config, out)
    }

    pub fn render_image<W: Write>(
        &self,
        image: &RgbaImage,
        config: &RenderConfig,
        out: &mut W,
    ) -> Result<RenderOutput, SlimeError> {
        let (width, height) = image.dimensions();
        let plan = ResizePlan::derive(width, height, config)?;
        debug!(
            "resizing {}x{} by ratio {} to {}x{}",
            width, height, plan.ratio, plan.width, plan.height
        );

        let resized = plan.apply(image);
        let rows = emit(&resized, config, out)?;
        trace!("wrote {} rows of {} cells", rows, resized.width());

        Ok(RenderOutput { plan, source_width: width, source_height: height, rows })
    }
}

fn emit<W: Write>(
    image: &RgbaImage,
    config: &RenderConfig,
    out: &mut W,
) -> Result<u32, SlimeError> {
    let (width, height) = image.dimensions();

    pad(out, b'\n', config.begin_padding)?;

    let mut rows = 0;
    for x in (0..height).step_by(2) {
        pad(out, b' ', config.left_padding)?;
        for y in 0..width {
            let cell = TerminalCell::compose(*image.get_pixel(y, x), *image.get_pixel(y, x + 1));
            cell.write_to(out)?;
        }
        out.write_all(b"\n")?;
        rows += 1;
    }

    pad(out, b'\n', config.end_padding)?;
    out.flush()?;

    Ok(rows)
}

fn pad<W: Write>(out: &mut W, byte: u8, count: usize) -> io::Result<()> {
    io::copy(&mut io::repeat(byte).take(count as u64), out)?;
    Ok(())
}
