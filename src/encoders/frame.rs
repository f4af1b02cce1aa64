//! Textual frames: `checksum|length|payload` or `length|payload`.
//!
//! Each segment is a base-N numeral over the frame's [`Alphabet`]. The length
//! segment carries the payload's byte count as a 2-byte big-endian integer,
//! which is what lets decoding restore leading zero bytes.

use std::fmt;

use super::algorithms::errors::FrameError;
use super::algorithms::math::{bytes_to_int, decode_symbols, encode_symbols, int_to_bytes};
use crate::core::alphabet::{Alphabet, SEPARATOR};
use crate::core::config::Profile;
use crate::features::hashing::{HashAlgorithm, IntegrityGuard};

/// Largest payload the 2-byte length segment can describe.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

const LENGTH_WIDTH: usize = 2;

/// A decoded frame whose checksum has not been checked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Digest bytes from the checksum segment (integrity profile only).
    pub checksum: Option<Vec<u8>>,
    /// Byte length declared by the length segment.
    pub declared_len: usize,
    /// Payload, re-padded to `declared_len`.
    pub payload: Vec<u8>,
    /// Characters per segment, in frame order.
    pub segment_lengths: Vec<usize>,
}

impl Frame {
    /// Checks the payload against the carried checksum.
    ///
    /// Frames without a checksum always pass.
    pub fn verify(&self, guard: &dyn IntegrityGuard) -> Result<(), FrameError> {
        let Some(expected) = &self.checksum else {
            return Ok(());
        };

        if guard.verify(&self.payload, expected) {
            Ok(())
        } else {
            Err(FrameError::ChecksumMismatch {
                expected: hex::encode(expected),
                actual: hex::encode(guard.digest(&self.payload)),
            })
        }
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

/// Encodes payloads into frames and back.
///
/// Stateless: one codec can serve any number of threads.
pub struct FrameCodec<'a> {
    alphabet: &'a Alphabet,
    profile: Profile,
    guard: Box<dyn IntegrityGuard>,
    max_length: Option<usize>,
}

impl fmt::Debug for FrameCodec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameCodec")
            .field("base", &self.alphabet.size())
            .field("profile", &self.profile)
            .field("guard", &self.guard.name())
            .field("max_length", &self.max_length)
            .finish()
    }
}

impl FrameCodec<'static> {
    /// Standard alphabet, integrity profile, SHA-256, no length limit.
    pub fn standard() -> Self {
        FrameCodec::builder().build()
    }
}

impl<'a> FrameCodec<'a> {
    pub fn builder() -> FrameCodecBuilder<'a> {
        FrameCodecBuilder::default()
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn guard(&self) -> &dyn IntegrityGuard {
        self.guard.as_ref()
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Encodes `payload` into a frame.
    ///
    /// # Errors
    ///
    /// - [`FrameError::PayloadTooLarge`] above [`MAX_PAYLOAD_LEN`] bytes
    /// - [`FrameError::LengthExceeded`] if the finished frame has more chars
    ///   than the configured maximum; no truncated frame is ever returned
    pub fn encode(&self, payload: &[u8]) -> Result<String, FrameError> {
        let frame = self.encode_unbounded(payload)?;

        if let Some(max) = self.max_length {
            let length = frame.chars().count();
            if length > max {
                return Err(FrameError::LengthExceeded { length, max });
            }
        }

        Ok(frame)
    }

    /// Length in chars of the frame `payload` would produce, ignoring the
    /// configured maximum.
    pub fn encoded_len(&self, payload: &[u8]) -> Result<usize, FrameError> {
        Ok(self.encode_unbounded(payload)?.chars().count())
    }

    fn encode_unbounded(&self, payload: &[u8]) -> Result<String, FrameError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }

        let mut segments = Vec::with_capacity(self.profile.segment_count());

        if self.profile == Profile::Integrity {
            let checksum = self.guard.digest(payload);
            segments.push(encode_symbols(&bytes_to_int(&checksum), self.alphabet));
        }

        let length = (payload.len() as u16).to_be_bytes();
        segments.push(encode_symbols(&bytes_to_int(&length), self.alphabet));
        segments.push(encode_symbols(&bytes_to_int(payload), self.alphabet));

        let mut buf = [0u8; 4];
        let separator: &str = SEPARATOR.encode_utf8(&mut buf);
        let frame = segments.join(separator);
        tracing::debug!(
            profile = self.profile.as_str(),
            payload_len = payload.len(),
            frame_len = frame.chars().count(),
            "encoded frame"
        );
        Ok(frame)
    }

    /// Decodes a frame and verifies its checksum.
    ///
    /// # Errors
    ///
    /// - [`FrameError::MalformedFrame`] on a wrong segment count, an empty
    ///   segment, or a value wider than its declared width
    /// - [`FrameError::InvalidSymbol`] for any char outside the alphabet
    /// - [`FrameError::ChecksumMismatch`] if the payload fails verification
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, FrameError> {
        let frame = self.parse(text)?;
        frame.verify(self.guard.as_ref())?;
        Ok(frame.into_payload())
    }

    /// Decodes a frame without checking its checksum.
    pub fn parse(&self, text: &str) -> Result<Frame, FrameError> {
        let segments: Vec<&str> = text.split(SEPARATOR).collect();
        let expected = self.profile.segment_count();
        if segments.len() != expected {
            return Err(FrameError::malformed(format!(
                "{} profile expects {} segments, found {}",
                self.profile.as_str(),
                expected,
                segments.len()
            )));
        }

        let mut values = Vec::with_capacity(expected);
        let mut segment_lengths = Vec::with_capacity(expected);
        let mut offset = 0;
        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(FrameError::malformed(format!("segment {} is empty", i + 1)));
            }
            values.push(decode_symbols(segment, self.alphabet, offset)?);

            let chars = segment.chars().count();
            segment_lengths.push(chars);
            offset += chars + 1;
        }

        let (checksum, length, payload) = match values.as_slice() {
            [checksum, length, payload] => (Some(checksum), length, payload),
            [length, payload] => (None, length, payload),
            _ => return Err(FrameError::malformed("unexpected segment layout")),
        };

        let length = int_to_bytes(length, LENGTH_WIDTH).map_err(|_| {
            FrameError::malformed(format!("length segment exceeds {} bytes", LENGTH_WIDTH))
        })?;
        let declared_len = u16::from_be_bytes([length[0], length[1]]) as usize;

        let payload = int_to_bytes(payload, declared_len).map_err(|e| {
            FrameError::malformed(format!(
                "payload needs {} bytes but the frame declares {}",
                e.needed, e.width
            ))
        })?;

        let checksum = checksum
            .map(|value| {
                int_to_bytes(value, self.guard.digest_len()).map_err(|e| {
                    FrameError::malformed(format!(
                        "checksum needs {} bytes but {} produces {}",
                        e.needed,
                        self.guard.name(),
                        e.width
                    ))
                })
            })
            .transpose()?;

        tracing::debug!(declared_len, "parsed frame");
        Ok(Frame {
            checksum,
            declared_len,
            payload,
            segment_lengths,
        })
    }
}

/// Builder for [`FrameCodec`].
pub struct FrameCodecBuilder<'a> {
    alphabet: &'a Alphabet,
    profile: Profile,
    guard: Box<dyn IntegrityGuard>,
    max_length: Option<usize>,
}

impl Default for FrameCodecBuilder<'_> {
    fn default() -> Self {
        FrameCodecBuilder {
            alphabet: Alphabet::standard(),
            profile: Profile::default(),
            guard: Box::new(HashAlgorithm::default()),
            max_length: None,
        }
    }
}

impl<'a> FrameCodecBuilder<'a> {
    pub fn alphabet(mut self, alphabet: &'a Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn hash(self, algorithm: HashAlgorithm) -> Self {
        self.guard(algorithm)
    }

    /// Plugs in any digest implementation.
    pub fn guard(mut self, guard: impl IntegrityGuard + 'static) -> Self {
        self.guard = Box::new(guard);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn max_length_opt(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn build(self) -> FrameCodec<'a> {
        FrameCodec {
            alphabet: self.alphabet,
            profile: self.profile,
            guard: self.guard,
            max_length: self.max_length,
        }
    }
}
