use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::path::Path;

use crate::error::{Result, ViewerError};

// ---------------------------------------------------------------------------
// Decoded image data (CPU side)
// ---------------------------------------------------------------------------

pub struct DecodedImage {
    pub pixels: RgbaImage,
    /// Container format the pixels were read from; saving writes it back.
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// 90° clockwise.
    Right,
    /// 90° counter-clockwise.
    Left,
}

/// The format is sniffed from content first and falls back to the extension,
/// so names like `scanjpeg` still decode.
pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    let decode_err = |source: image::ImageError| ViewerError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_err(e.into()))?;
    let format = reader
        .format()
        .ok_or_else(|| decode_err(unsupported(path)))?;
    let img = reader.decode().map_err(decode_err)?;

    Ok(DecodedImage {
        pixels: img.to_rgba8(),
        format,
    })
}

fn unsupported(path: &Path) -> image::ImageError {
    image::ImageError::Unsupported(image::error::UnsupportedError::from_format_and_kind(
        image::error::ImageFormatHint::PathExtension(path.to_path_buf()),
        image::error::UnsupportedErrorKind::Format(image::error::ImageFormatHint::Unknown),
    ))
}

/// Overwrite `path` with the image in its original container format.
pub fn encode_image(image: &DecodedImage, path: &Path) -> Result<()> {
    let result = match image.format {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(image.pixels.clone())
            .to_rgb8()
            .save_with_format(path, image.format),
        _ => image.pixels.save_with_format(path, image.format),
    };
    result.map_err(|source| ViewerError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn rotate(image: &mut DecodedImage, rotation: Rotation) {
    image.pixels = match rotation {
        Rotation::Right => imageops::rotate90(&image.pixels),
        Rotation::Left => imageops::rotate270(&image.pixels),
    };
}

pub fn scale_to(pixels: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    imageops::resize(pixels, width.max(1), height.max(1), FilterType::Triangle)
}

// ---------------------------------------------------------------------------
// User event for waking the UI
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum UserEvent {
    /// A catalog rescan finished with this many entries.
    CatalogScanned(usize),
}
