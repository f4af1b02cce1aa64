//! Optional features module.
//!
//! Digest algorithms that can guard a frame's payload. The frame codec only
//! depends on the [`IntegrityGuard`] trait; [`HashAlgorithm`] is the stock
//! implementation.

pub mod hashing;

pub use hashing::{HashAlgorithm, IntegrityGuard, hash};
