use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StegoError>;

/// Coarse classification of a [`StegoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong shape, out of range coordinates, empty password, unsuitable cover ...
    InvalidInput,
    /// The payload does not fit into the carrier.
    CapacityExceeded,
    /// The carrier does not hold enough bits for the header or the announced message.
    InsufficientData,
    /// Reading or writing image files failed.
    Io,
    /// A builder was executed without all of its inputs.
    Api,
}

#[derive(Error)]
pub enum StegoError {
    /// Pixel buffers must carry exactly 3 channels.
    #[error("invalid input: expected 3 color channels, found {found}")]
    UnsupportedChannelCount { found: usize },

    /// The raw sample count does not match `height * width * channels`.
    #[error("invalid input: {height}x{width}x{channels} buffer needs {expected} samples, got {found}")]
    BufferSizeMismatch {
        height: usize,
        width: usize,
        channels: usize,
        expected: usize,
        found: usize,
    },

    /// Texture map and pixel buffer do not describe the same grid.
    #[error("invalid input: texture map is {map_height}x{map_width} but the image is {height}x{width}")]
    DimensionMismatch {
        height: usize,
        width: usize,
        map_height: usize,
        map_width: usize,
    },

    /// A coordinate does not lie inside the grid.
    #[error("invalid input: coordinate ({row}, {col}) is outside of the {height}x{width} grid")]
    CoordinateOutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("invalid input: password must not be empty")]
    EmptyPassword,

    /// Binary patterns and texture maps only hold 0 or 1.
    #[error("invalid input: expected a binary value (0 or 1), found {0}")]
    NonBinaryValue(u8),

    #[error("invalid input: bits per channel must be 1 or 2, found {0}")]
    InvalidBitsPerChannel(u8),

    /// A chunk handed to a single pixel is longer than the pixel can store.
    #[error("invalid input: {chunk_len} bits do not fit into a pixel holding {bits_per_pixel} bits")]
    ChunkTooLong { chunk_len: u32, bits_per_pixel: u32 },

    /// Message bit sequences are made of whole 8 bit characters.
    #[error("invalid input: bit length {0} is not a multiple of 8")]
    MalformedBitLength(u64),

    /// Only characters up to U+00FF fit into 8 bits.
    #[error("invalid input: character {0:?} cannot be encoded in 8 bits")]
    UnencodableCharacter(char),

    #[error("invalid input: message of {bits} bits exceeds the 32 bit length header")]
    MessageTooLong { bits: u64 },

    #[error("invalid input: image is {height}x{width}, expected {expected_height}x{expected_width}")]
    UnexpectedDimensions {
        height: usize,
        width: usize,
        expected_height: usize,
        expected_width: usize,
    },

    #[error(
        "capacity exceeded: the payload requires {required} bits but the image offers only {available} bits, \
         shorten the message or choose a larger or more textured cover image"
    )]
    CapacityExceeded { required: u64, available: u64 },

    /// Embedding moved pixels across a 3-MSB band so that the stego image
    /// classifies differently and the message cannot be read back.
    #[error(
        "unsuitable cover: embedding changed the texture class of {changed_pixels} pixels \
         and the message cannot be unveiled, choose another cover or password"
    )]
    TextureDrift { changed_pixels: usize },

    #[error("insufficient data: only {available} bits available, the 32 bit length header cannot be read")]
    InsufficientHeaderData { available: u64 },

    #[error("insufficient data: the header announces {required} bits but only {available} bits are available")]
    InsufficientPayloadData { required: u64, available: u64 },

    /// Represents a missing carrier file.
    #[error("Image file not found: {0}")]
    ImageNotFound(PathBuf),

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid: {0}")]
    InvalidImageMedia(PathBuf),

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,

    #[error("API Error: Missing password")]
    MissingPassword,
}

impl StegoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StegoError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            StegoError::InsufficientHeaderData { .. }
            | StegoError::InsufficientPayloadData { .. } => ErrorKind::InsufficientData,
            StegoError::ImageNotFound(_)
            | StegoError::InvalidImageMedia(_)
            | StegoError::ImageEncodingError
            | StegoError::WriteError { .. }
            | StegoError::IoError(_) => ErrorKind::Io,
            StegoError::CarrierNotSet
            | StegoError::TargetNotSet
            | StegoError::MissingMessage
            | StegoError::MissingPassword => ErrorKind::Api,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl fmt::Debug for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display for Debug, so a failing `main` prints the readable message
        write!(f, "{self}")
    }
}
