//! XOR-fold frame checksum.

/// Initial accumulator of the checksum fold.
pub const CHECKSUM_SEED: u8 = 0x7F;

/// Checksum of a frame body.
///
/// XOR of [`CHECKSUM_SEED`] with every body byte, in order. The empty body
/// checksums to the seed.
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(CHECKSUM_SEED, |acc, byte| acc ^ byte)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_body_is_seed() {
        assert_eq!(checksum(b""), 0x7F);
    }

    #[test]
    fn folds_every_byte() {
        assert_eq!(checksum(b"AB"), 0x7F ^ b'A' ^ b'B');
        assert_eq!(checksum(b"mQ"), 0x7F ^ b'm' ^ b'Q');
    }

    #[test]
    fn fold_is_commutative() {
        // XOR folding cannot detect transposed bytes
        assert_eq!(checksum(b"AB"), checksum(b"BA"));
    }

    proptest! {
        #[test]
        fn single_byte_change_is_detected(
            body in prop::collection::vec(any::<u8>(), 1..64),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let mut corrupted = body.clone();
            let i = index.index(body.len());
            corrupted[i] ^= flip;

            prop_assert_ne!(checksum(&body), checksum(&corrupted));
        }
    }
}
