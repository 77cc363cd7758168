//! Texture adaptive LSB embedding and extraction.
//!
//! Both directions walk the same [`CoordinateOrder`] and derive the bit depth
//! of each visited pixel from the same [`TextureMap`]: smooth pixels carry
//! 1 bit per channel, rough pixels 2 bits. Channels are visited in index
//! order 0, 1, 2 and bits are stored most significant first.

use crate::error::{Result, StegoError};
use crate::payload::{low_mask, BitCollector, Payload, HEADER_BITS};
use crate::permutation::CoordinateOrder;
use crate::pixels::{Coordinate, PixelBuffer, CHANNELS};
use crate::texture::{Texture, TextureMap};

/// Capacity of a carrier in bits, see [`TextureMap::capacity`].
pub fn capacity(texture: &TextureMap) -> u64 {
    texture.capacity()
}

/// Hides `message` in a copy of `cover`.
///
/// Only the pixels needed to hold the framed payload are touched, the
/// remaining coordinates of the order keep their cover values. On error
/// no buffer is returned at all.
pub fn embed(
    cover: &PixelBuffer,
    message: &str,
    texture: &TextureMap,
    order: &CoordinateOrder,
) -> Result<PixelBuffer> {
    validate_dimensions(cover, texture)?;

    let available = texture.capacity();
    let payload = Payload::from_text(message)?;
    let required = payload.total_bits();
    if required > available {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
        });
    }
    log::debug!("embedding {required} payload bits, capacity is {available} bits");

    let mut stego = cover.clone();
    let mut reader = payload.reader();
    let mut pixels_used = 0usize;
    for slot in traverse(texture, order) {
        if reader.is_exhausted() {
            break;
        }
        let (coordinate, texture) = slot?;
        let (chunk, chunk_len) = reader.read_chunk(texture.bits_per_pixel())?;
        let pixel = embed_bits_in_pixel(
            stego.pixel(coordinate)?,
            chunk,
            chunk_len,
            texture.bits_per_channel(),
        )?;
        stego.set_pixel(coordinate, pixel)?;
        pixels_used += 1;
    }

    if !reader.is_exhausted() {
        // the order ran out before the capacity did
        return Err(StegoError::CapacityExceeded {
            required,
            available: required - reader.remaining(),
        });
    }
    log::debug!("payload spread over {pixels_used} pixels");

    Ok(stego)
}

/// Recovers the message hidden by [`embed`].
pub fn extract(stego: &PixelBuffer, texture: &TextureMap, order: &CoordinateOrder) -> Result<String> {
    validate_dimensions(stego, texture)?;

    let mut slots = traverse(texture, order);
    let mut collector = BitCollector::new();

    collect(stego, &mut slots, &mut collector, HEADER_BITS)?;
    let message_bits = collector
        .message_bits()
        .ok_or(StegoError::InsufficientHeaderData {
            available: collector.len(),
        })?;
    log::debug!("header announces {message_bits} message bits");

    let required = HEADER_BITS + message_bits;
    collect(stego, &mut slots, &mut collector, required)?;
    if collector.len() < required {
        return Err(StegoError::InsufficientPayloadData {
            required,
            available: collector.len(),
        });
    }

    collector.into_text(message_bits)
}

/// Reads only the 32 bit header and returns the announced message bit count.
pub fn extract_message_length(
    stego: &PixelBuffer,
    texture: &TextureMap,
    order: &CoordinateOrder,
) -> Result<u64> {
    validate_dimensions(stego, texture)?;

    let mut collector = BitCollector::new();
    collect(stego, &mut traverse(texture, order), &mut collector, HEADER_BITS)?;

    collector
        .message_bits()
        .ok_or(StegoError::InsufficientHeaderData {
            available: collector.len(),
        })
}

/// Writes the lowest `chunk_len` bits of `chunk` into a pixel.
///
/// Every channel takes up to `bits_per_channel` bits, most significant
/// first, and gets them in its low `bits_per_channel` bits. If fewer bits
/// are left for a channel they fill the upper part of that field and the
/// rest of the field stays untouched. Channels after the chunk is used up
/// are not modified.
///
/// ```
/// use stegano_lbp::codec::embed_bits_in_pixel;
///
/// let pixel = embed_bits_in_pixel([226, 137, 125], 0b101, 3, 1).unwrap();
/// assert_eq!(pixel, [227, 136, 125]);
/// ```
pub fn embed_bits_in_pixel(
    mut pixel: [u8; CHANNELS],
    chunk: u8,
    chunk_len: u32,
    bits_per_channel: u8,
) -> Result<[u8; CHANNELS]> {
    let bits_per_pixel = validate_bits_per_channel(bits_per_channel)? as u32 * CHANNELS as u32;
    if chunk_len > bits_per_pixel {
        return Err(StegoError::ChunkTooLong {
            chunk_len,
            bits_per_pixel,
        });
    }

    let k = bits_per_channel as u32;
    let mut remaining = chunk_len;
    for channel in pixel.iter_mut() {
        if remaining == 0 {
            break;
        }
        let take = k.min(remaining);
        let bits = (chunk >> (remaining - take)) & low_mask(take);
        *channel = write_field(*channel, k, take, bits);
        remaining -= take;
    }

    Ok(pixel)
}

/// Reads the low `bits_per_channel` bits of every channel, channel 0 first.
///
/// ```
/// use stegano_lbp::codec::extract_bits_from_pixel;
///
/// assert_eq!(extract_bits_from_pixel([227, 136, 125], 1).unwrap(), 0b101);
/// assert_eq!(extract_bits_from_pixel([227, 136, 125], 2).unwrap(), 0b11_00_01);
/// ```
pub fn extract_bits_from_pixel(pixel: [u8; CHANNELS], bits_per_channel: u8) -> Result<u8> {
    let k = validate_bits_per_channel(bits_per_channel)? as u32;
    let mask = low_mask(k);

    Ok(pixel
        .iter()
        .fold(0u8, |acc, &channel| (acc << k) | (channel & mask)))
}

/// Replaces the upper `take` bits of the low `k` bit field of `sample`.
#[inline]
fn write_field(sample: u8, k: u32, take: u32, bits: u8) -> u8 {
    let shift = k - take;
    let untouched = !low_mask(k) | low_mask(shift);
    (sample & untouched) | (bits << shift)
}

fn validate_bits_per_channel(bits_per_channel: u8) -> Result<u8> {
    match bits_per_channel {
        1 | 2 => Ok(bits_per_channel),
        other => Err(StegoError::InvalidBitsPerChannel(other)),
    }
}

fn validate_dimensions(pixels: &PixelBuffer, texture: &TextureMap) -> Result<()> {
    if pixels.dimensions() != texture.dimensions() {
        let (height, width) = pixels.dimensions();
        let (map_height, map_width) = texture.dimensions();
        return Err(StegoError::DimensionMismatch {
            height,
            width,
            map_height,
            map_width,
        });
    }
    Ok(())
}

/// The visited coordinates together with their texture.
fn traverse<'a>(
    texture: &'a TextureMap,
    order: &'a CoordinateOrder,
) -> impl Iterator<Item = Result<(Coordinate, Texture)>> + 'a {
    order
        .iter()
        .map(move |coordinate| texture.get(coordinate).map(|t| (coordinate, t)))
}

/// Reads whole pixels until `collector` holds at least `target` bits or the
/// traversal ends.
fn collect<I>(
    stego: &PixelBuffer,
    slots: &mut I,
    collector: &mut BitCollector,
    target: u64,
) -> Result<()>
where
    I: Iterator<Item = Result<(Coordinate, Texture)>>,
{
    while collector.len() < target {
        let Some(slot) = slots.next() else {
            break;
        };
        let (coordinate, texture) = slot?;
        let bits = extract_bits_from_pixel(stego.pixel(coordinate)?, texture.bits_per_channel())?;
        collector.push(bits, texture.bits_per_pixel())?;
    }
    Ok(())
}
