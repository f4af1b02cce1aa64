//! Chat-safe binary framing over a 1674-symbol Unicode alphabet.
//!
//! A payload of up to 65,535 bytes becomes a single line of text:
//!
//! ```text
//! checksum | length | payload
//! ```
//!
//! Each segment is a base-1674 numeral. The length segment restores leading
//! zero bytes on the way back, and the checksum segment (SHA-256 by default)
//! catches characters mangled in transit.
//!
//! # Example
//!
//! ```
//! let frame = base_chat::encode(b"hello").unwrap();
//! assert_eq!(frame.split('|').count(), 3);
//! assert_eq!(base_chat::decode(&frame).unwrap(), b"hello");
//! ```
//!
//! Custom framing goes through [`FrameCodec::builder`]:
//!
//! ```
//! use base_chat::{FrameCodec, HashAlgorithm, Profile};
//!
//! let codec = FrameCodec::builder()
//!     .profile(Profile::Integrity)
//!     .hash(HashAlgorithm::Blake3)
//!     .max_length(2000)
//!     .build();
//! let frame = codec.encode(&[0, 1, 2]).unwrap();
//! assert_eq!(codec.decode(&frame).unwrap(), vec![0, 1, 2]);
//! ```

mod core;
mod encoders;
mod features;

pub mod prelude;

pub use crate::core::alphabet::{Alphabet, AlphabetBuilder, SEPARATOR, STANDARD_ALPHABET};
pub use crate::core::config::{AlphabetConfig, AlphabetRef, CodecConfig, CodepointRange, Profile, Settings};
pub use crate::encoders::algorithms::errors::{AlphabetError, ConfigError, FrameError, find_closest_name};
pub use crate::encoders::{Frame, FrameCodec, FrameCodecBuilder, MAX_PAYLOAD_LEN};
pub use crate::features::{HashAlgorithm, IntegrityGuard, hash};

/// Arbitrary-precision helpers behind the segment numerals.
pub mod math {
    pub use crate::encoders::algorithms::errors::Overflow;
    pub use crate::encoders::algorithms::math::{
        bytes_to_int, decode_integer, decode_symbols, encode_integer, encode_symbols, int_to_bytes,
    };
}

/// Encodes `data` with the standard codec (integrity profile, SHA-256).
pub fn encode(data: &[u8]) -> Result<String, FrameError> {
    FrameCodec::standard().encode(data)
}

/// Decodes a frame produced by [`encode`].
pub fn decode(text: &str) -> Result<Vec<u8>, FrameError> {
    FrameCodec::standard().decode(text)
}
