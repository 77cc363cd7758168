use std::fs;

use tempfile::TempDir;

use stegano_lbp::commands::{capacity, hide, unveil};
use stegano_lbp::media::save_image;
use stegano_lbp::permutation::password_to_seed;
use stegano_lbp::*;

/// A colored carrier whose luminance stays at least 3 away from every
/// 3-MSB band border, mixing striped (smooth) and checkered (rough) tiles.
fn carrier(height: usize, width: usize) -> PixelBuffer {
    PixelBuffer::from_fn(height, width, |row, col| {
        let band = if (row / 5 + col / 5) % 2 == 0 {
            ((row / 2 + col / 3) % 8) as u8
        } else {
            (((row + col) % 2) * 6) as u8
        };
        let base = band * 32;
        [
            base + 4 + ((row * 3 + col) % 20) as u8,
            base + 4 + ((row + col * 5) % 20) as u8,
            base + 4 + ((row * col) % 20) as u8,
        ]
    })
}

fn write_carrier(dir: &TempDir, name: &str, height: usize, width: usize) -> std::path::PathBuf {
    let path = dir.path().join(name);
    save_image(&carrier(height, width), &path, ChannelOrder::Bgr).unwrap();
    path
}

#[test]
fn should_unveil_what_was_hidden_in_a_png_file() {
    let dir = TempDir::new().unwrap();
    let cover = write_carrier(&dir, "cover.png", 64, 48);
    let stego = dir.path().join("stego.png");
    let message = "Steganography hides messages in plain sight. ".repeat(8);

    let report = hide(&cover, &stego, &message, "test_password", &CodecOptions::default()).unwrap();
    assert_eq!(report.payload_bits, 32 + message.len() as u64 * 8);

    let unveiled = unveil(&stego, "test_password", &CodecOptions::default()).unwrap();
    assert_eq!(unveiled, message);
}

#[test]
fn should_keep_the_texture_map_of_the_carrier() {
    let dir = TempDir::new().unwrap();
    let cover = write_carrier(&dir, "cover.png", 40, 40);
    let stego = dir.path().join("stego.png");

    let before = capacity(&cover, &CodecOptions::default()).unwrap();
    hide(&cover, &stego, &"x".repeat(300), "pw", &CodecOptions::default()).unwrap();
    let after = capacity(&stego, &CodecOptions::default()).unwrap();

    assert_eq!(before, after);
    assert!(before.smooth_pixels > 0);
    assert!(before.rough_pixels > 0);
}

#[test]
fn should_write_png_even_for_lossy_extensions() {
    let dir = TempDir::new().unwrap();
    let cover = write_carrier(&dir, "cover.png", 32, 32);
    let stego = dir.path().join("stego.jpg");

    hide(&cover, &stego, "still lossless", "pw", &CodecOptions::default()).unwrap();

    let magic = fs::read(&stego).unwrap();
    assert_eq!(&magic[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(
        unveil(&stego, "pw", &CodecOptions::default()).unwrap(),
        "still lossless"
    );
}

#[test]
fn should_round_trip_with_rgb_channel_order() {
    let dir = TempDir::new().unwrap();
    let cover = write_carrier(&dir, "cover.png", 32, 32);
    let stego = dir.path().join("stego.png");
    let options = CodecOptions::default().with_channel_order(ChannelOrder::Rgb);

    hide(&cover, &stego, "red first", "pw", &options).unwrap();
    assert_eq!(unveil(&stego, "pw", &options).unwrap(), "red first");
}

#[test]
fn should_not_unveil_with_a_wrong_password() {
    let dir = TempDir::new().unwrap();
    let cover = write_carrier(&dir, "cover.png", 32, 32);
    let stego = dir.path().join("stego.png");

    hide(&cover, &stego, "top secret", "correct_password", &CodecOptions::default()).unwrap();

    let unveiled = unveil(&stego, "wrong_password", &CodecOptions::default());
    assert_ne!(unveiled.ok().as_deref(), Some("top secret"));
}

#[test]
fn should_refuse_messages_beyond_capacity() {
    let dir = TempDir::new().unwrap();
    let cover = write_carrier(&dir, "cover.png", 8, 8);
    let stego = dir.path().join("stego.png");
    let available = capacity(&cover, &CodecOptions::default())
        .unwrap()
        .capacity_bits;

    let too_long = "A".repeat(available as usize / 8);
    let e = hide(&cover, &stego, &too_long, "pw", &CodecOptions::default()).unwrap_err();

    assert_eq!(e.kind(), ErrorKind::CapacityExceeded);
    assert!(!stego.exists());
}

#[test]
fn should_hide_the_empty_message() {
    let dir = TempDir::new().unwrap();
    let cover = write_carrier(&dir, "cover.png", 8, 8);
    let stego = dir.path().join("stego.png");

    hide(&cover, &stego, "", "pw", &CodecOptions::default()).unwrap();
    assert_eq!(unveil(&stego, "pw", &CodecOptions::default()).unwrap(), "");
}

#[test]
fn should_refuse_noisy_carriers_instead_of_writing_unreadable_images() {
    let dir = TempDir::new().unwrap();
    let message = "The quick brown fox jumps over the lazy dog. ".repeat(5);
    let mut refused = 0;

    for seed in 0..8 {
        let mut rng = fastrand::Rng::with_seed(1000 + seed);
        let noise = PixelBuffer::from_fn(64, 64, |_, _| [rng.u8(..), rng.u8(..), rng.u8(..)]);
        let cover = dir.path().join(format!("noise-{seed}.png"));
        let stego = dir.path().join(format!("stego-{seed}.png"));
        save_image(&noise, &cover, ChannelOrder::Bgr).unwrap();

        match hide(&cover, &stego, &message, "pw", &CodecOptions::default()) {
            Ok(_) => assert_eq!(
                unveil(&stego, "pw", &CodecOptions::default()).unwrap(),
                message
            ),
            Err(e) => {
                assert!(matches!(e, StegoError::TextureDrift { .. }), "{e}");
                assert!(!stego.exists());
                refused += 1;
            }
        }
    }
    assert!(refused > 0, "expected at least one noisy carrier to be refused");
}

#[test]
fn should_derive_a_stable_seed() {
    assert_eq!(password_to_seed("mypassword").unwrap(), 9934964102539539065);
}

#[test]
fn should_drive_the_builders_end_to_end() {
    let dir = TempDir::new().unwrap();
    let cover = write_carrier(&dir, "cover.png", 32, 32);
    let stego = dir.path().join("stego.png");
    let out = dir.path().join("secret-message.txt");

    api::hide::prepare()
        .with_image(&cover)
        .with_output(&stego)
        .with_message("Grüße")
        .with_password("Secret42")
        .execute()
        .unwrap();

    let message = api::unveil::prepare()
        .with_secret_image(&stego)
        .with_password("Secret42")
        .into_output_file(&out)
        .execute()
        .unwrap();

    assert_eq!(message, "Grüße");
    assert_eq!(fs::read(&out).unwrap(), "Grüße".as_bytes());
}
