pub mod compiler;
pub mod error;
pub mod image;
pub mod meter;
pub mod player;

pub use compiler::{Assembler, Song};
pub use error::Error;
