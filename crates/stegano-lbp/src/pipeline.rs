//! In-memory hide / unveil, wiring classifier, order and codec together.
//!
//! Nothing besides the stego image and the password is needed to unveil:
//! texture map and coordinate order are recomputed on both sides. Writing
//! LSBs can move the grayscale value of a pixel into another 3-MSB band, so
//! hiding checks that the stego image really unveils to the message.

use log::debug;

use crate::codec;
use crate::error::{Result, StegoError};
use crate::grayscale::to_grayscale;
use crate::payload::HEADER_BITS;
use crate::permutation::CoordinateOrder;
use crate::pixels::PixelBuffer;
use crate::texture::{classify_image, TextureMap};

/// Outcome of hiding a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideReport {
    pub height: usize,
    pub width: usize,
    /// Bits the carrier could hold.
    pub capacity_bits: u64,
    /// Header and message bits that were written.
    pub payload_bits: u64,
}

impl HideReport {
    /// Embedded bits per pixel (BPP).
    pub fn bits_per_pixel(&self) -> f64 {
        bits_per_pixel(self.payload_bits, self.height, self.width)
    }
}

/// Computes the texture map of an image.
pub fn analyze(pixels: &PixelBuffer) -> Result<TextureMap> {
    classify_image(&to_grayscale(pixels))
}

/// Hides `message` in `cover`, visiting pixels in the order derived from `password`.
///
/// Fails with [`StegoError::TextureDrift`] instead of handing out an image
/// that would not unveil to `message`.
pub fn hide_message(cover: &PixelBuffer, message: &str, password: &str) -> Result<PixelBuffer> {
    embed_message(cover, message, password).map(|(stego, _)| stego)
}

/// Like [`hide_message`], also reporting capacity and payload size.
pub fn embed_message(
    cover: &PixelBuffer,
    message: &str,
    password: &str,
) -> Result<(PixelBuffer, HideReport)> {
    let (height, width) = cover.dimensions();
    let order = CoordinateOrder::from_password(height, width, password)?;
    let texture = analyze(cover)?;
    debug!(
        "cover {height}x{width}: {} smooth, {} rough, capacity {} bits",
        texture.count_smooth(),
        texture.count_rough(),
        texture.capacity()
    );

    let stego = codec::embed(cover, message, &texture, &order)?;
    verify_unveils(&stego, message, &texture, &order)?;

    let report = HideReport {
        height,
        width,
        capacity_bits: texture.capacity(),
        // embedding succeeded, so every character took exactly 8 bits
        payload_bits: HEADER_BITS + message.chars().count() as u64 * 8,
    };
    Ok((stego, report))
}

/// Recovers a message hidden by [`hide_message`] with the same password.
pub fn unveil_message(stego: &PixelBuffer, password: &str) -> Result<String> {
    let (height, width) = stego.dimensions();
    let order = CoordinateOrder::from_password(height, width, password)?;
    let texture = analyze(stego)?;

    codec::extract(stego, &texture, &order)
}

/// Checks that the receiver, who only sees `stego`, reads back `message`.
fn verify_unveils(
    stego: &PixelBuffer,
    message: &str,
    cover_texture: &TextureMap,
    order: &CoordinateOrder,
) -> Result<()> {
    let texture = analyze(stego)?;
    if texture == *cover_texture {
        return Ok(());
    }

    let changed_pixels = cover_texture
        .to_raw()
        .iter()
        .zip(texture.to_raw())
        .filter(|(before, after)| **before != *after)
        .count();
    match codec::extract(stego, &texture, order) {
        Ok(unveiled) if unveiled == message => {
            debug!("{changed_pixels} pixels changed their texture off the payload path");
            Ok(())
        }
        _ => Err(StegoError::TextureDrift { changed_pixels }),
    }
}

pub(crate) fn bits_per_pixel(bits: u64, height: usize, width: usize) -> f64 {
    let pixels = height * width;
    if pixels == 0 {
        return 0.0;
    }
    bits as f64 / pixels as f64
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::pixels::PixelBuffer;

    /// Gray pixels whose values keep a distance of at least 4 to the next
    /// 3-MSB band border, so LSB changes never alter the texture map.
    ///
    /// Tiles alternate between diagonal stripes (smooth) and a checkerboard
    /// of two bands (half of it rough).
    pub fn banded_cover(height: usize, width: usize) -> PixelBuffer {
        PixelBuffer::from_fn(height, width, |row, col| {
            let band = if (row / 4 + col / 4) % 2 == 0 {
                ((row / 3 + col / 2) % 8) as u8
            } else {
                (((row + col) % 2) * 5) as u8
            };
            let offset = 4 + ((row * 7 + col * 13) % 20) as u8;
            let v = band * 32 + offset;
            [v, v, v]
        })
    }

    /// Uniform random samples, most pixels end up rough.
    pub fn noisy_cover(height: usize, width: usize, seed: u64) -> PixelBuffer {
        let mut rng = fastrand::Rng::with_seed(seed);
        PixelBuffer::from_fn(height, width, |_, _| [rng.u8(..), rng.u8(..), rng.u8(..)])
    }
}
