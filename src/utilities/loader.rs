use std::path::Path;

use image::RgbImage;

use crate::Result;

/// Opens and decodes the image at `path` and converts it to 8-bit RGB.
///
/// The format is sniffed from the file contents, so extensions like `.JPEG`
/// or a missing extension are fine.
pub fn load_img_rgb(path: &Path) -> Result<RgbImage> {
    Ok(image::io::Reader::open(path)?
        .with_guessed_format()?
        .decode()?
        .into_rgb8())
}
