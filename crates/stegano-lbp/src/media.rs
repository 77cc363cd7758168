//! Reading carrier images from and writing stego images to files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};
use log::{error, warn};

use crate::codec_options::ChannelOrder;
use crate::error::{Result, StegoError};
use crate::pixels::{PixelBuffer, CHANNELS};

/// Loads any supported image file as a 3 channel pixel buffer.
///
/// Alpha is dropped, gray images are expanded to 3 equal channels.
pub fn load_image(path: &Path, order: ChannelOrder) -> Result<PixelBuffer> {
    if !path.is_file() {
        error!("Image file {path:?} does not exist");
        return Err(StegoError::ImageNotFound(path.to_path_buf()));
    }
    let image = image::open(path)
        .map_err(|e| {
            error!("Error decoding image {path:?}: {e}");
            StegoError::InvalidImageMedia(path.to_path_buf())
        })?
        .to_rgb8();

    from_rgb_image(image, order)
}

/// Stores a pixel buffer as PNG, whatever the file extension says.
pub fn save_image(pixels: &PixelBuffer, path: &Path, order: ChannelOrder) -> Result<()> {
    if is_lossy_extension(path) {
        warn!("{path:?} names a lossy format, the file is written as PNG anyway");
    }
    let image = to_rgb_image(pixels, order)?;

    let file = File::create(path).map_err(|e| {
        error!("Error creating file {path:?}: {e}");
        StegoError::WriteError { source: e }
    })?;
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|e| {
            error!("Error saving image: {e}");
            StegoError::ImageEncodingError
        })?;
    writer
        .flush()
        .map_err(|source| StegoError::WriteError { source })
}

/// Converts a decoded RGB image, reordering channels to `order`.
pub fn from_rgb_image(image: RgbImage, order: ChannelOrder) -> Result<PixelBuffer> {
    let (width, height) = image.dimensions();
    let mut samples = image.into_raw();
    if order == ChannelOrder::Bgr {
        swap_red_and_blue(&mut samples);
    }

    PixelBuffer::from_raw(height as usize, width as usize, CHANNELS, samples)
}

/// Converts back to an RGB image, undoing the channel order of `order`.
pub fn to_rgb_image(pixels: &PixelBuffer, order: ChannelOrder) -> Result<RgbImage> {
    let mut samples = pixels.as_raw().to_vec();
    if order == ChannelOrder::Bgr {
        swap_red_and_blue(&mut samples);
    }

    RgbImage::from_raw(pixels.width() as u32, pixels.height() as u32, samples)
        .ok_or(StegoError::ImageEncodingError)
}

/// `true` if the image has exactly `height x width` pixels.
pub fn validate_image_size(pixels: &PixelBuffer, (height, width): (usize, usize)) -> bool {
    pixels.dimensions() == (height, width)
}

fn swap_red_and_blue(samples: &mut [u8]) {
    for pixel in samples.chunks_exact_mut(CHANNELS) {
        pixel.swap(0, 2);
    }
}

pub(crate) fn is_lossy_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "jpg" | "jpeg" | "webp"))
        .unwrap_or(false)
}
