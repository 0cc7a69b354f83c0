use std::path::Path;

use image::io::Reader;
use image::RgbaImage;
use log::debug;

use crate::SlimeError;

/// Decodes the image at `path` into 8-bit RGBA.
///
/// The format is sniffed from the file contents, falling back to the
/// extension. The file handle lives inside the reader and is closed once
/// `decode` returns, whether or not decoding succeeded.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, SlimeError> {
    let io_error = |source| SlimeError::Io { path: path.to_path_buf(), source };

    let reader = Reader::open(path).map_err(io_error)?.with_guessed_format().map_err(io_error)?;
    debug!("decoding {} as {:?}", path.display(), reader.format());

    let image = reader
        .decode()
        .map_err(|source| SlimeError::Decode { path: path.to_path_buf(), source })?;

    Ok(image.into_rgba8())
}
