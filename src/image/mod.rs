pub mod buffer;
pub mod json;
pub mod opcode;
pub mod vle;
pub mod writer;

pub use buffer::{ByteBuffer, OffsetBuffer};
pub use json::SongSummary;
pub use vle::encode_vle;
pub use writer::{image_len, write_image, MAX_TRACKS};
