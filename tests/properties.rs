//! Property-based tests for the frame codec.
//!
//! - Any payload up to the frame limit survives a round trip
//! - Any single-character substitution is rejected, never decoded to other data
//! - Canonical-equivalence rewrites by a normalizing transport are rejected
//! - The length limit is honoured exactly
//! - The integer codec is a bijection for every base

use base_chat::math::{bytes_to_int, decode_integer, encode_integer, int_to_bytes};
use base_chat::{Alphabet, FrameCodec, FrameError, HashAlgorithm, MAX_PAYLOAD_LEN, Profile, SEPARATOR};
use proptest::prelude::*;

fn payload_strategy(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max)
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
    prop_oneof![Just(Profile::Integrity), Just(Profile::LengthOnly)]
}

fn hash_strategy() -> impl Strategy<Value = HashAlgorithm> {
    prop::sample::select(HashAlgorithm::ALL.to_vec())
}

/// Replaces the char at `position` with another symbol of the alphabet.
fn substitute(frame: &str, position: usize, shift: usize) -> String {
    let alphabet = Alphabet::standard();
    frame
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i != position {
                return c;
            }
            let value = alphabet.try_value_of(c).unwrap();
            alphabet.symbol_at((value + shift) % alphabet.size())
        })
        .collect()
}

/// Singleton canonical decompositions among the standard symbols: what an
/// NFC-normalizing chat transport silently rewrites.
const NFC_SINGLETONS: [(char, char); 6] = [
    ('\u{37E}', ';'),
    ('\u{387}', '\u{B7}'),
    ('\u{374}', '\u{2B9}'),
    ('\u{212A}', 'K'),
    ('\u{212B}', '\u{C5}'),
    ('\u{2126}', '\u{3A9}'),
];

fn nfc_rewrite(frame: &str) -> String {
    frame
        .chars()
        .map(|c| {
            NFC_SINGLETONS
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

#[test]
fn prop_roundtrip() {
    proptest!(|(data in payload_strategy(2048), profile in profile_strategy(), hash in hash_strategy())| {
        let codec = FrameCodec::builder().profile(profile).hash(hash).build();
        let frame = codec.encode(&data).unwrap();

        prop_assert_eq!(frame.split(SEPARATOR).count(), profile.segment_count());
        prop_assert_eq!(codec.decode(&frame).unwrap(), data);
    });
}

#[test]
fn prop_leading_zeros_survive() {
    proptest!(|(zeros in 0usize..64, tail in payload_strategy(64))| {
        let mut data = vec![0u8; zeros];
        data.extend(tail);

        let codec = FrameCodec::standard();
        let frame = codec.encode(&data).unwrap();
        prop_assert_eq!(codec.decode(&frame).unwrap(), data);
    });
}

#[test]
fn prop_substitution_is_detected() {
    proptest!(|(data in payload_strategy(256), pick in any::<prop::sample::Index>(), shift in 1usize..1674)| {
        let codec = FrameCodec::standard();
        let frame = codec.encode(&data).unwrap();

        let positions: Vec<usize> = frame
            .chars()
            .enumerate()
            .filter(|(_, c)| *c != SEPARATOR)
            .map(|(i, _)| i)
            .collect();
        let position = positions[pick.index(positions.len())];
        let tampered = substitute(&frame, position, shift);
        prop_assert_ne!(&tampered, &frame);

        match codec.decode(&tampered) {
            Ok(decoded) => prop_assert!(false, "tampered frame decoded to {:?}", decoded),
            Err(FrameError::ChecksumMismatch { .. }) | Err(FrameError::MalformedFrame(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    });
}

#[test]
fn prop_normalization_is_detected() {
    proptest!(|(data in payload_strategy(256))| {
        let codec = FrameCodec::standard();
        let frame = codec.encode(&data).unwrap();
        let rewritten = nfc_rewrite(&frame);

        let result = codec.decode(&rewritten);
        if rewritten == frame {
            prop_assert_eq!(result.unwrap(), data);
        } else {
            match result {
                Ok(decoded) => prop_assert!(false, "normalized frame decoded to {:?}", decoded),
                Err(FrameError::ChecksumMismatch { .. }) | Err(FrameError::MalformedFrame(_)) => {}
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    });
}

#[test]
fn test_normalized_known_frames_are_rejected() {
    let codec = FrameCodec::standard();

    for data in [&b"hello"[..], &[0, 1, 2][..]] {
        let frame = codec.encode(data).unwrap();
        let rewritten = nfc_rewrite(&frame);
        assert_ne!(rewritten, frame, "{:?} should carry a rewritable symbol", data);

        // The rewritten symbols are still alphabet members, so only the
        // checksum or a width check can catch the change.
        let alphabet = Alphabet::standard();
        assert!(rewritten.chars().all(|c| c == SEPARATOR || alphabet.contains(c)));

        let err = codec.decode(&rewritten).unwrap_err();
        assert!(
            matches!(
                err,
                FrameError::ChecksumMismatch { .. } | FrameError::MalformedFrame(_)
            ),
            "unexpected error {:?}",
            err
        );
    }
}

#[test]
fn test_normalization_pairs_are_distinct_symbols() {
    let alphabet = Alphabet::standard();
    for (from, to) in NFC_SINGLETONS {
        let a = alphabet.try_value_of(from).unwrap();
        let b = alphabet.try_value_of(to).unwrap();
        assert_ne!(a, b);
    }
}

#[test]
fn prop_max_length_is_exact() {
    proptest!(|(data in payload_strategy(128), max in 0usize..160)| {
        let codec = FrameCodec::builder().max_length(max).build();
        let needed = codec.encoded_len(&data).unwrap();

        match codec.encode(&data) {
            Ok(frame) => {
                prop_assert!(needed <= max);
                prop_assert_eq!(frame.chars().count(), needed);
            }
            Err(FrameError::LengthExceeded { length, max: limit }) => {
                prop_assert!(needed > max);
                prop_assert_eq!(length, needed);
                prop_assert_eq!(limit, max);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    });
}

#[test]
fn prop_integer_codec_bijection() {
    proptest!(|(bytes in payload_strategy(96), base in 2usize..5000)| {
        let n = bytes_to_int(&bytes);
        let digits = encode_integer(&n, base);

        prop_assert!(!digits.is_empty());
        prop_assert!(digits.iter().all(|d| *d < base));
        prop_assert!(digits.len() == 1 || digits[0] != 0);
        prop_assert_eq!(decode_integer(&digits, base), n);
    });
}

#[test]
fn prop_int_to_bytes_restores_width() {
    proptest!(|(bytes in payload_strategy(64), extra in 0usize..8)| {
        let n = bytes_to_int(&bytes);
        let width = bytes.len() + extra;
        let restored = int_to_bytes(&n, width).unwrap();

        prop_assert_eq!(restored.len(), width);
        prop_assert!(restored[..extra].iter().all(|b| *b == 0));
        prop_assert_eq!(&restored[extra..], &bytes[..]);
    });
}

#[test]
fn test_largest_payload_roundtrip() {
    let data: Vec<u8> = (0..MAX_PAYLOAD_LEN)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
        .collect();
    let codec = FrameCodec::standard();

    let frame = codec.encode(&data).unwrap();
    assert_eq!(codec.decode(&frame).unwrap(), data);
}

#[test]
fn test_oversized_payload_rejected() {
    let data = vec![0u8; MAX_PAYLOAD_LEN + 1];
    assert!(matches!(
        FrameCodec::standard().encode(&data),
        Err(FrameError::PayloadTooLarge { len: 65536, max: 65535 })
    ));
}
