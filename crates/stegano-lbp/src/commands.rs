use std::path::Path;

use log::info;

use crate::media::{load_image, save_image, validate_image_size};
use crate::payload::HEADER_BITS;
use crate::pipeline::{analyze, bits_per_pixel, embed_message, unveil_message};
use crate::{CodecOptions, PixelBuffer, Result, StegoError};

pub use crate::pipeline::HideReport;

/// Texture statistics and capacity of a carrier image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub height: usize,
    pub width: usize,
    pub smooth_pixels: usize,
    pub rough_pixels: usize,
    pub capacity_bits: u64,
}

impl CapacityReport {
    /// The longest message in characters that still fits next to the header.
    pub fn max_message_chars(&self) -> u64 {
        self.capacity_bits.saturating_sub(HEADER_BITS) / 8
    }

    /// Capacity in bits per pixel.
    pub fn bits_per_pixel(&self) -> f64 {
        bits_per_pixel(self.capacity_bits, self.height, self.width)
    }
}

/// Hides `message` in the image at `carrier` and stores the result as PNG at `target`.
pub fn hide(
    carrier: &Path,
    target: &Path,
    message: &str,
    password: &str,
    options: &CodecOptions,
) -> Result<HideReport> {
    let cover = load_carrier(carrier, options)?;
    let (stego, report) = embed_message(&cover, message, password)?;
    save_image(&stego, target, options.channel_order)?;

    info!(
        "hid {} bits in {target:?} ({:.4} bpp)",
        report.payload_bits,
        report.bits_per_pixel()
    );

    Ok(report)
}

/// Unveils the message hidden in the image at `secret_media`.
pub fn unveil(secret_media: &Path, password: &str, options: &CodecOptions) -> Result<String> {
    let stego = load_carrier(secret_media, options)?;
    unveil_message(&stego, password)
}

/// Analyzes the texture of the image at `carrier`.
pub fn capacity(carrier: &Path, options: &CodecOptions) -> Result<CapacityReport> {
    let pixels = load_carrier(carrier, options)?;
    let texture = analyze(&pixels)?;
    let (height, width) = pixels.dimensions();

    Ok(CapacityReport {
        height,
        width,
        smooth_pixels: texture.count_smooth(),
        rough_pixels: texture.count_rough(),
        capacity_bits: texture.capacity(),
    })
}

fn load_carrier(path: &Path, options: &CodecOptions) -> Result<PixelBuffer> {
    let pixels = load_image(path, options.channel_order)?;
    if let Some((expected_height, expected_width)) = options.expected_dimensions {
        if !validate_image_size(&pixels, (expected_height, expected_width)) {
            let (height, width) = pixels.dimensions();
            return Err(StegoError::UnexpectedDimensions {
                height,
                width,
                expected_height,
                expected_width,
            });
        }
    }
    Ok(pixels)
}
