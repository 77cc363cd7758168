use crate::error::{Result, StegoError};

/// Number of color channels every carrier is normalized to.
pub const CHANNELS: usize = 3;

/// A `(row, column)` position in an image grid.
pub type Coordinate = (usize, usize);

/// Row-major grid of 3-channel 8 bit pixels.
///
/// The channel order is whatever the ingestion side decided on, the codec
/// only ever addresses channel 0, 1 and 2 in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    height: usize,
    width: usize,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a buffer where every pixel has the same value.
    pub fn filled(height: usize, width: usize, pixel: [u8; CHANNELS]) -> Self {
        let samples = pixel
            .iter()
            .copied()
            .cycle()
            .take(height * width * CHANNELS)
            .collect();
        Self {
            height,
            width,
            samples,
        }
    }

    /// Wraps interleaved raw samples, checking channel count and length.
    pub fn from_raw(height: usize, width: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        if channels != CHANNELS {
            return Err(StegoError::UnsupportedChannelCount { found: channels });
        }
        let expected = height * width * channels;
        if samples.len() != expected {
            return Err(StegoError::BufferSizeMismatch {
                height,
                width,
                channels,
                expected,
                found: samples.len(),
            });
        }

        Ok(Self {
            height,
            width,
            samples,
        })
    }

    /// Builds a buffer by asking `f` for the pixel at every `(row, col)`.
    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> [u8; CHANNELS],
    {
        let mut samples = Vec::with_capacity(height * width * CHANNELS);
        for row in 0..height {
            for col in 0..width {
                samples.extend_from_slice(&f(row, col));
            }
        }
        Self {
            height,
            width,
            samples,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn contains(&self, (row, col): Coordinate) -> bool {
        row < self.height && col < self.width
    }

    pub fn pixel(&self, coordinate: Coordinate) -> Result<[u8; CHANNELS]> {
        let offset = self.offset(coordinate)?;
        let mut pixel = [0; CHANNELS];
        pixel.copy_from_slice(&self.samples[offset..offset + CHANNELS]);
        Ok(pixel)
    }

    pub fn set_pixel(&mut self, coordinate: Coordinate, pixel: [u8; CHANNELS]) -> Result<()> {
        let offset = self.offset(coordinate)?;
        self.samples[offset..offset + CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }

    /// Iterates all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; CHANNELS]> + '_ {
        self.samples
            .chunks_exact(CHANNELS)
            .map(|c| [c[0], c[1], c[2]])
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.samples
    }

    fn offset(&self, (row, col): Coordinate) -> Result<usize> {
        if !self.contains((row, col)) {
            return Err(StegoError::CoordinateOutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok((row * self.width + col) * CHANNELS)
    }
}
