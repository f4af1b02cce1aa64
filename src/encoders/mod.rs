pub mod algorithms;
pub mod frame;

pub use frame::{Frame, FrameCodec, FrameCodecBuilder, MAX_PAYLOAD_LEN};
