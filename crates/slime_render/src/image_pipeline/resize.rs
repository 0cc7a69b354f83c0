use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::{RenderConfig, SlimeError};

/// Target size of the image once shrunk to fit the terminal.
///
/// Each terminal row shows two pixel rows, so `height` is always even. The
/// ratio never drops below 1: images are shrunk, never magnified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizePlan {
    pub ratio: f64,
    pub width: u32,
    pub height: u32,
}

impl ResizePlan {
    /// Derives the plan from the source dimensions.
    ///
    /// Height is constrained first against `height_limit * 2` pixel rows. If
    /// the width produced by that ratio is still over `width_limit`, the
    /// ratio is replaced by `width / width_limit` and height is not checked
    /// again. A plan that leaves no columns or no rows is rejected.
    pub fn derive(
        source_width: u32,
        source_height: u32,
        config: &RenderConfig,
    ) -> Result<Self, SlimeError> {
        if source_width == 0 || source_height == 0 {
            return Err(SlimeError::InvalidLayout);
        }
        if config.height_limit == 0 || config.width_limit == 0 {
            return Err(SlimeError::InvalidLayout);
        }

        let width = f64::from(source_width);
        let height = f64::from(source_height);
        let pixel_rows = f64::from(config.height_limit) * 2.0;
        let width_limit = f64::from(config.width_limit);

        let mut ratio = if height > pixel_rows { height / pixel_rows } else { 1.0 };
        if (width / ratio).trunc() > width_limit {
            ratio = width / width_limit;
        }

        let target_width = (width / ratio).trunc() as u32;
        let target_height = ((height / ratio / 2.0).trunc() as u32) * 2;
        if target_width == 0 || target_height == 0 {
            return Err(SlimeError::InvalidLayout);
        }

        Ok(Self { ratio, width: target_width, height: target_height })
    }

    pub fn is_identity(&self) -> bool {
        self.ratio == 1.0
    }

    /// Nearest-neighbor resample to the planned size.
    pub fn apply(&self, image: &RgbaImage) -> RgbaImage {
        imageops::resize(image, self.width, self.height, FilterType::Nearest)
    }
}
