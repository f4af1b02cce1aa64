//! Convenient re-exports for common usage.
//!
//! ```
//! use base_chat::prelude::*;
//!
//! let codec = FrameCodec::builder().profile(Profile::LengthOnly).build();
//! let frame = codec.encode(b"hi").unwrap();
//! assert_eq!(codec.decode(&frame).unwrap(), b"hi");
//! ```

pub use crate::{
    Alphabet,
    // Config
    CodecConfig,
    Frame,
    // Core encoding/decoding
    FrameCodec,
    FrameError,
    HashAlgorithm,
    IntegrityGuard,
    Profile,
    decode,
    encode,
};
