//! # Stegano LBP
//!
//! Texture adaptive LSB steganography for images.
//!
//! Every pixel of a carrier is classified by the local binary pattern of its
//! grayscale 3-MSB neighborhood. Smooth pixels carry 1 bit per color channel,
//! rough pixels carry 2. Pixels are visited in an order derived from a
//! password, so the same password is needed to unveil the message again.
//!
//! The receiver recomputes the texture map from the stego image. LSB writes
//! move the weighted grayscale value of a pixel by up to 3, which can push it
//! into another 3-MSB band and change the map. Hiding therefore unveils its
//! own result and fails with [`StegoError::TextureDrift`] when the message
//! would not come back. Noisy covers hit this often, covers with smooth
//! areas rarely.
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```rust,no_run
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//!
//! let report = stegano_lbp::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_password("SuperSecret42")
//!     .with_image("carrier-image.png")
//!     .with_output(temp_dir.path().join("image-with-secret.png"))
//!     .execute()
//!     .expect("Failed to hide message in image");
//!
//! println!("{:.4} bits per pixel", report.bits_per_pixel());
//! ```
//!
//! ## Unveil a message from an image
//!
//! ```rust,no_run
//! let message = stegano_lbp::api::unveil::prepare()
//!     .with_secret_image("image-with-secret.png")
//!     .with_password("SuperSecret42")
//!     .execute()
//!     .expect("Failed to unveil message from image");
//!
//! assert_eq!(message, "Hello, World!");
//! ```
//!
//! ## In memory
//!
//! ```rust
//! use stegano_lbp::{hide_message, unveil_message, PixelBuffer};
//!
//! let cover = PixelBuffer::from_fn(32, 32, |row, col| {
//!     let v = (((row / 2 + col / 3) % 8) * 32 + 12) as u8;
//!     [v, v, v]
//! });
//!
//! let stego = hide_message(&cover, "Hi", "pw").unwrap();
//! assert_eq!(unveil_message(&stego, "pw").unwrap(), "Hi");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod codec;
pub mod codec_options;
pub mod commands;
pub mod error;
pub mod grayscale;
pub mod media;
pub mod payload;
pub mod permutation;
pub mod pipeline;
pub mod pixels;
pub mod texture;

pub use crate::codec_options::{ChannelOrder, CodecOptions};
pub use crate::error::{ErrorKind, Result, StegoError};
pub use crate::permutation::CoordinateOrder;
pub use crate::pipeline::{analyze, hide_message, unveil_message};
pub use crate::pixels::{Coordinate, PixelBuffer};
pub use crate::texture::{Texture, TextureMap};
