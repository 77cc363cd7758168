//! Texture classification with a circular local binary pattern.
//!
//! Every pixel of the 3-MSB grayscale image is compared with its (up to 8)
//! neighbours. The resulting binary pattern is walked as a ring and the
//! number of 0/1 changes decides whether the pixel sits in a smooth or in a
//! rough area. Rough areas tolerate bigger modifications, so they get more
//! payload bits per channel.

use image::GrayImage;

use crate::error::{Result, StegoError};
use crate::grayscale::reduce_to_3msb;
use crate::pixels::{Coordinate, CHANNELS};

/// Highest transition count that still counts as smooth.
pub const SMOOTH_TRANSITION_LIMIT: usize = 2;

/// Neighbour offsets `(d_row, d_col)` in traversal order, clockwise starting
/// at the upper left corner. Transition counting depends on this order.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Texture {
    Smooth = 0,
    Rough = 1,
}

impl Texture {
    /// Payload bits stored in each color channel of such a pixel.
    pub fn bits_per_channel(self) -> u8 {
        match self {
            Texture::Smooth => 1,
            Texture::Rough => 2,
        }
    }

    pub fn bits_per_pixel(self) -> u32 {
        self.bits_per_channel() as u32 * CHANNELS as u32
    }
}

impl TryFrom<u8> for Texture {
    type Error = StegoError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Texture::Smooth),
            1 => Ok(Texture::Rough),
            v => Err(StegoError::NonBinaryValue(v)),
        }
    }
}

impl From<Texture> for u8 {
    fn from(texture: Texture) -> Self {
        texture as u8
    }
}

/// Smooth / rough classification of every pixel of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureMap {
    height: usize,
    width: usize,
    textures: Vec<Texture>,
}

impl TextureMap {
    /// Builds a map from raw `0`/`1` values in row-major order.
    pub fn from_raw(height: usize, width: usize, values: &[u8]) -> Result<Self> {
        if values.len() != height * width {
            return Err(StegoError::BufferSizeMismatch {
                height,
                width,
                channels: 1,
                expected: height * width,
                found: values.len(),
            });
        }
        let textures = values
            .iter()
            .map(|&v| Texture::try_from(v))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            height,
            width,
            textures,
        })
    }

    /// A map where every pixel has the same texture.
    pub fn uniform(height: usize, width: usize, texture: Texture) -> Self {
        Self {
            height,
            width,
            textures: vec![texture; height * width],
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

    pub fn get(&self, (row, col): Coordinate) -> Result<Texture> {
        if row >= self.height || col >= self.width {
            return Err(StegoError::CoordinateOutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self.textures[row * self.width + col])
    }

    pub fn count_smooth(&self) -> usize {
        self.textures
            .iter()
            .filter(|&&t| t == Texture::Smooth)
            .count()
    }

    pub fn count_rough(&self) -> usize {
        self.textures.len() - self.count_smooth()
    }

    /// Embedding capacity in bits: `3 * (smooth * 1 + rough * 2)`.
    pub fn capacity(&self) -> u64 {
        self.capacity_for_channels(CHANNELS)
    }

    /// Capacity for a carrier with `channels` color channels per pixel.
    pub fn capacity_for_channels(&self, channels: usize) -> u64 {
        channels as u64 * (self.count_smooth() as u64 + 2 * self.count_rough() as u64)
    }

    /// Row-major `0`/`1` values.
    pub fn to_raw(&self) -> Vec<u8> {
        self.textures.iter().map(|&t| u8::from(t)).collect()
    }
}

/// In-bounds neighbours of `(row, col)` in a `height x width` grid.
///
/// Interior pixels have 8 neighbours, border pixels 5 and corners 3.
pub fn neighbors(height: usize, width: usize, row: usize, col: usize) -> Vec<Coordinate> {
    DIRECTIONS
        .iter()
        .filter_map(|&(d_row, d_col)| {
            let r = row.checked_add_signed(d_row)?;
            let c = col.checked_add_signed(d_col)?;
            (r < height && c < width).then_some((r, c))
        })
        .collect()
}

/// `1` for every neighbour that is greater than or equal to the center.
pub fn compare_to_center(center: u8, neighbor_values: &[u8]) -> Vec<u8> {
    neighbor_values
        .iter()
        .map(|&n| u8::from(n >= center))
        .collect()
}

/// Counts 0/1 changes in a circular pattern, the last element wraps to the first.
pub fn count_transitions(pattern: &[u8]) -> Result<usize> {
    if let Some(&v) = pattern.iter().find(|&&bit| bit > 1) {
        return Err(StegoError::NonBinaryValue(v));
    }

    Ok(pattern
        .iter()
        .zip(pattern.iter().cycle().skip(1))
        .filter(|(a, b)| a != b)
        .count())
}

pub fn classify(transitions: usize) -> Texture {
    if transitions <= SMOOTH_TRANSITION_LIMIT {
        Texture::Smooth
    } else {
        Texture::Rough
    }
}

/// Classifies a single pixel of an already 3-MSB reduced image.
pub fn classify_pixel(reduced: &GrayImage, row: usize, col: usize) -> Result<Texture> {
    let (width, height) = (reduced.width() as usize, reduced.height() as usize);
    if row >= height || col >= width {
        return Err(StegoError::CoordinateOutOfBounds {
            row,
            col,
            height,
            width,
        });
    }

    let sample = |(r, c): Coordinate| reduced.get_pixel(c as u32, r as u32)[0];
    let values: Vec<u8> = neighbors(height, width, row, col)
        .into_iter()
        .map(sample)
        .collect();
    let pattern = compare_to_center(sample((row, col)), &values);

    Ok(classify(count_transitions(&pattern)?))
}

/// Classifies every pixel of a grayscale image.
pub fn classify_image(gray: &GrayImage) -> Result<TextureMap> {
    let reduced = reduce_to_3msb(gray);
    let (width, height) = (gray.width() as usize, gray.height() as usize);

    let mut textures = Vec::with_capacity(height * width);
    for row in 0..height {
        for col in 0..width {
            textures.push(classify_pixel(&reduced, row, col)?);
        }
    }

    let map = TextureMap {
        height,
        width,
        textures,
    };
    log::debug!(
        "classified {height}x{width} image: {} smooth, {} rough",
        map.count_smooth(),
        map.count_rough()
    );
    Ok(map)
}
