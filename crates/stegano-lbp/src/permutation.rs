//! Password driven pixel visiting order.
//!
//! The order only controls WHERE bits are hidden, the bits themselves are
//! not encrypted.
//!
//! # Format
//!
//! The order is part of the stego format, embedder and extractor have to
//! produce the exact same sequence:
//!
//! 1. seed = first 8 bytes of `SHA-256(password)`, read big endian
//! 2. all coordinates in row-major order
//! 3. Fisher-Yates from the last index down to 1, swapping index `i` with
//!    `rng.u64(0..=i)`, where `rng` is `fastrand::Rng::with_seed(seed)`
//!
//! The draw is always a `u64`. `Rng::usize` samples 32 bit values on 32 bit
//! targets, which would give wasm32 hosts a different order.

use byteorder::{BigEndian, ByteOrder};
use fastrand::Rng;
use sha2::{Digest, Sha256};

use crate::error::{Result, StegoError};
use crate::pixels::Coordinate;

/// Derives the 64 bit shuffle seed from a password.
pub fn password_to_seed(password: &str) -> Result<u64> {
    if password.is_empty() {
        return Err(StegoError::EmptyPassword);
    }
    let digest = Sha256::digest(password.as_bytes());

    Ok(BigEndian::read_u64(&digest[..8]))
}

/// Shuffles all coordinates of a `height x width` grid.
pub fn generate_coordinate_order(height: usize, width: usize, seed: u64) -> CoordinateOrder {
    let mut order = CoordinateOrder::row_major(height, width);
    let mut rng = Rng::with_seed(seed);

    // Fisher-Yates shuffle
    for i in (1..order.coordinates.len()).rev() {
        let j = rng.u64(0..=i as u64) as usize;
        order.coordinates.swap(i, j);
    }

    order
}

/// Sequence of coordinates the codec visits, one after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateOrder {
    height: usize,
    width: usize,
    coordinates: Vec<Coordinate>,
}

impl CoordinateOrder {
    /// Plain row-major order, no shuffling.
    pub fn row_major(height: usize, width: usize) -> Self {
        let coordinates = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .collect();
        Self {
            height,
            width,
            coordinates,
        }
    }

    pub fn from_seed(height: usize, width: usize, seed: u64) -> Self {
        generate_coordinate_order(height, width, seed)
    }

    pub fn from_password(height: usize, width: usize, password: &str) -> Result<Self> {
        Ok(generate_coordinate_order(
            height,
            width,
            password_to_seed(password)?,
        ))
    }

    /// Takes an arbitrary coordinate list. Nothing is validated here, the
    /// codec rejects coordinates outside of the image while traversing.
    pub fn from_coordinates(height: usize, width: usize, coordinates: Vec<Coordinate>) -> Self {
        Self {
            height,
            width,
            coordinates,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.coordinates.iter().copied()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_password_to_seed_known_value() {
        assert_eq!(password_to_seed("mypassword").unwrap(), 9934964102539539065);
    }

    #[test]
    fn test_password_to_seed_deterministic() {
        assert_eq!(
            password_to_seed("secret_password").unwrap(),
            password_to_seed("secret_password").unwrap()
        );
    }

    #[test]
    fn test_password_to_seed_sensitivity() {
        assert_ne!(
            password_to_seed("secret_password").unwrap(),
            password_to_seed("Secret_password").unwrap()
        );
    }

    #[test]
    fn test_password_to_seed_empty() {
        assert!(matches!(
            password_to_seed(""),
            Err(StegoError::EmptyPassword)
        ));
    }

    #[test]
    fn test_order_deterministic() {
        let o1 = generate_coordinate_order(20, 30, 42);
        let o2 = generate_coordinate_order(20, 30, 42);
        assert_eq!(o1, o2);
    }

    #[test]
    fn test_order_is_a_permutation() {
        let (height, width) = (17, 23);
        let order = generate_coordinate_order(height, width, 7);
        assert_eq!(order.len(), height * width);

        let seen: HashSet<Coordinate> = order.iter().collect();
        assert_eq!(seen.len(), height * width, "duplicate coordinates");
        for row in 0..height {
            for col in 0..width {
                assert!(seen.contains(&(row, col)), "({row}, {col}) missing");
            }
        }
    }

    #[test]
    fn test_order_differs_for_different_passwords() {
        let o1 = CoordinateOrder::from_password(10, 10, "secret_password").unwrap();
        let o2 = CoordinateOrder::from_password(10, 10, "Secret_password").unwrap();

        let differences = o1.iter().zip(o2.iter()).filter(|(a, b)| a != b).count();
        assert!(
            differences > 50,
            "Only {} differences, expected > 50",
            differences
        );
    }

    #[test]
    fn test_order_actually_shuffles() {
        let order = generate_coordinate_order(10, 10, 1);
        assert_ne!(order, CoordinateOrder::row_major(10, 10));
    }

    #[test]
    fn test_order_draws_64_bit_indices() {
        let mut rng = Rng::with_seed(99);
        let mut expected = CoordinateOrder::row_major(9, 7).coordinates;
        for i in (1..expected.len()).rev() {
            expected.swap(i, rng.u64(0..=i as u64) as usize);
        }

        assert_eq!(generate_coordinate_order(9, 7, 99).as_slice(), &expected[..]);
    }

    #[test]
    fn test_row_major_order() {
        let order = CoordinateOrder::row_major(2, 3);
        assert_eq!(
            order.as_slice(),
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_degenerate_grids() {
        assert!(generate_coordinate_order(0, 5, 3).is_empty());
        assert!(generate_coordinate_order(5, 0, 3).is_empty());
        assert_eq!(generate_coordinate_order(1, 1, 3).as_slice(), &[(0, 0)]);
    }
}
