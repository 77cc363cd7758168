//! Grayscale reduction that feeds the texture classifier.

use image::{GrayImage, Luma};

use crate::pixels::{PixelBuffer, CHANNELS};

/// Channel weights, applied to channel 0, 1 and 2 in that order.
const WEIGHTS: [f64; CHANNELS] = [0.11, 0.59, 0.30];

/// Converts a pixel buffer to luminance.
///
/// Every sample is `floor(0.11 * c0 + 0.59 * c1 + 0.30 * c2)`, summed left
/// to right in `f64`. Embedder and extractor depend on this exact rounding,
/// e.g. `(0, 10, 87)` sums to `31.999999999999996` and maps to 31.
pub fn to_grayscale(pixels: &PixelBuffer) -> GrayImage {
    let mut samples = pixels.pixels();
    // row-major on both sides, so the pixel iterator lines up with from_fn
    GrayImage::from_fn(pixels.width() as u32, pixels.height() as u32, |_, _| {
        let pixel = samples.next().unwrap_or_default();
        Luma([luminance(pixel)])
    })
}

fn luminance(pixel: [u8; CHANNELS]) -> u8 {
    let weighted = pixel
        .iter()
        .zip(WEIGHTS.iter())
        .fold(0.0f64, |sum, (&c, &w)| sum + w * c as f64);
    // `as` truncates towards zero and saturates, the sum is never negative
    weighted as u8
}

/// Keeps the 3 most significant bits, `162 (0b1010_0010)` becomes `5`.
#[inline]
pub fn extract_3msb(value: u8) -> u8 {
    value >> 5
}

/// Applies [`extract_3msb`] to every sample.
pub fn reduce_to_3msb(gray: &GrayImage) -> GrayImage {
    let mut reduced = gray.clone();
    for Luma([v]) in reduced.pixels_mut() {
        *v = extract_3msb(*v);
    }
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_the_grid_dimensions() {
        let gray = to_grayscale(&PixelBuffer::filled(10, 7, [0, 0, 0]));
        assert_eq!(gray.dimensions(), (7, 10));
    }

    #[test]
    fn should_weight_the_first_channel_with_11_percent() {
        let gray = to_grayscale(&PixelBuffer::filled(1, 1, [100, 0, 0]));
        assert_eq!(gray.get_pixel(0, 0)[0], 11);
    }

    #[test]
    fn should_keep_neutral_gray_unchanged() {
        let gray = to_grayscale(&PixelBuffer::filled(2, 2, [128, 128, 128]));
        assert!(gray.pixels().all(|p| p[0] == 128));

        let gray = to_grayscale(&PixelBuffer::filled(1, 1, [255, 255, 255]));
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn should_floor_the_floating_point_sum() {
        // 0.59*10 + 0.30*87 = 31.999999999999996
        assert_eq!(luminance([0, 10, 87]), 31);
        // 0.59*10 + 0.30*57 = 22.999999999999996
        assert_eq!(luminance([0, 10, 57]), 22);
        let gray = to_grayscale(&PixelBuffer::filled(1, 1, [0, 10, 87]));
        assert_eq!(gray.get_pixel(0, 0)[0], 31);
        assert_eq!(extract_3msb(gray.get_pixel(0, 0)[0]), 0);
    }

    #[test]
    fn should_truncate_instead_of_rounding() {
        // 0.11*9 + 0.59*0 + 0.30*1 = 1.29
        assert_eq!(luminance([9, 0, 1]), 1);
        // 0.11*0 + 0.59*1 + 0.30*0 = 0.59
        assert_eq!(luminance([0, 1, 0]), 0);
        // 0.30*3 = 0.9
        assert_eq!(luminance([0, 0, 3]), 0);
    }

    #[test]
    fn should_place_each_pixel_at_its_own_position() {
        let pixels = PixelBuffer::from_fn(2, 3, |row, col| {
            let v = (row * 3 + col) as u8 * 10;
            [v, v, v]
        });
        let gray = to_grayscale(&pixels);
        assert_eq!(gray.get_pixel(2, 0)[0], 20);
        assert_eq!(gray.get_pixel(0, 1)[0], 30);
        assert_eq!(gray.get_pixel(2, 1)[0], 50);
    }

    #[test]
    fn should_extract_the_3_most_significant_bits() {
        assert_eq!(extract_3msb(162), 5);
        assert_eq!(extract_3msb(255), 7);
        assert_eq!(extract_3msb(31), 0);
        assert_eq!(extract_3msb(32), 1);
    }

    #[test]
    fn should_reduce_a_whole_image() {
        let gray = GrayImage::from_fn(4, 1, |x, _| Luma([x as u8 * 64]));
        let reduced = reduce_to_3msb(&gray);
        let values: Vec<u8> = reduced.pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![0, 2, 4, 6]);
    }
}
