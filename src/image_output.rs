use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb32FImage, RgbImage};

use super::error::RenderError;

/// Writes the traced buffer, row 0 first. Float formats keep the raw
/// values, everything else is quantised to 8 bits per channel.
pub fn save_image(image: &Rgb32FImage, path: &Path) -> Result<(), RenderError> {
    let format = ImageFormat::from_path(path)?;

    match format {
        ImageFormat::OpenExr | ImageFormat::Hdr => image.save_with_format(path, format)?,
        _ => to_rgb8(image).save_with_format(path, format)?,
    }

    log::info!("wrote {}x{} image to {}", image.width(), image.height(), path.display());

    Ok(())
}

pub fn to_rgb8(image: &Rgb32FImage) -> RgbImage {
    DynamicImage::ImageRgb32F(image.clone()).to_rgb8()
}
