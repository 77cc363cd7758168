//! Length prefixed payload framing.
//!
//! ```text
//! | message bit count: u32, big endian | message: 8 bits per character, MSB first |
//! ```
//!
//! Characters are mapped to single bytes by code point, so only text up to
//! U+00FF (Latin-1) can be hidden.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::{Result, StegoError};

/// Size of the length header in bits.
pub const HEADER_BITS: u64 = 32;

/// Maps every character to the byte with the same numeric value.
pub fn text_to_bytes(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| StegoError::UnencodableCharacter(c)))
        .collect()
}

pub fn bytes_to_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Message bits of `text`, 8 per character, most significant bit first.
pub fn text_to_bits(text: &str) -> Result<Vec<bool>> {
    let bytes = text_to_bytes(text)?;
    let mut reader = BitReader::endian(&bytes[..], BigEndian);
    (0..bytes.len() * 8)
        .map(|_| reader.read_bit().map_err(StegoError::from))
        .collect()
}

/// Inverse of [`text_to_bits`].
pub fn bits_to_text(bits: &[bool]) -> Result<String> {
    if bits.len() % 8 != 0 {
        return Err(StegoError::MalformedBitLength(bits.len() as u64));
    }
    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len() / 8), BigEndian);
    for &bit in bits {
        writer.write_bit(bit)?;
    }

    Ok(bytes_to_text(&writer.into_writer()))
}

/// Header and message bits, ready to be spread over a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    bytes: Vec<u8>,
    message_bits: u32,
}

impl Payload {
    pub fn from_text(text: &str) -> Result<Self> {
        let message = text_to_bits(text)?;
        let bits = message.len() as u64;
        let message_bits = u32::try_from(bits).map_err(|_| StegoError::MessageTooLong { bits })?;

        let mut writer = BitWriter::endian(Vec::with_capacity(message.len() / 8 + 4), BigEndian);
        writer.write(HEADER_BITS as u32, message_bits)?;
        for bit in message {
            writer.write_bit(bit)?;
        }

        Ok(Self {
            bytes: writer.into_writer(),
            message_bits,
        })
    }

    pub fn message_bits(&self) -> u64 {
        self.message_bits as u64
    }

    /// Header plus message bits.
    pub fn total_bits(&self) -> u64 {
        HEADER_BITS + self.message_bits()
    }

    /// The framed bit stream, packed MSB first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn reader(&self) -> PayloadReader<'_> {
        PayloadReader {
            reader: BitReader::endian(&self.bytes[..], BigEndian),
            remaining: self.total_bits(),
        }
    }
}

/// Hands out the payload in chunks of a few bits.
pub struct PayloadReader<'a> {
    reader: BitReader<&'a [u8], BigEndian>,
    remaining: u64,
}

impl PayloadReader<'_> {
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Reads up to `max_bits` (at most 8) as an unsigned integer.
    ///
    /// Returns `(value, bit_count)`, the count is smaller than `max_bits`
    /// only for the very last chunk and zero once the payload is consumed.
    pub fn read_chunk(&mut self, max_bits: u32) -> Result<(u8, u32)> {
        let len = (max_bits.min(8) as u64).min(self.remaining) as u32;
        if len == 0 {
            return Ok((0, 0));
        }
        let value: u8 = self.reader.read(len)?;
        self.remaining -= len as u64;

        Ok((value, len))
    }
}

/// Gathers bits read from a carrier and decodes them once enough are there.
pub(crate) struct BitCollector {
    bits: Vec<bool>,
}

impl BitCollector {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn len(&self) -> u64 {
        self.bits.len() as u64
    }

    /// Appends the lowest `count` bits of `value`, most significant first.
    pub fn push(&mut self, value: u8, count: u32) -> Result<()> {
        if count > 8 {
            return Err(StegoError::ChunkTooLong {
                chunk_len: count,
                bits_per_pixel: 8,
            });
        }
        self.bits
            .extend((0..count).rev().map(|i| (value >> i) & 1 == 1));
        Ok(())
    }

    /// The message bit count from the header, once 32 bits are collected.
    pub fn message_bits(&self) -> Option<u64> {
        let header = self.bits.get(..HEADER_BITS as usize)?;
        Some(header.iter().fold(0u64, |acc, &bit| (acc << 1) | bit as u64))
    }

    /// Decodes the message following the header. Bits beyond
    /// `HEADER_BITS + message_bits` are ignored.
    pub fn into_text(self, message_bits: u64) -> Result<String> {
        if message_bits % 8 != 0 {
            return Err(StegoError::MalformedBitLength(message_bits));
        }
        let start = HEADER_BITS as usize;
        let end = (HEADER_BITS + message_bits) as usize;

        match self.bits.get(start..end) {
            Some(message) => bits_to_text(message),
            None => Err(StegoError::InsufficientPayloadData {
                required: HEADER_BITS + message_bits,
                available: self.len(),
            }),
        }
    }
}

#[inline]
pub(crate) fn low_mask(bits: u32) -> u8 {
    ((1u16 << bits) - 1) as u8
}
