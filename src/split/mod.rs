//! Silence-aware chunk splitting.

pub mod chunker;
pub mod silence;

pub use chunker::{Chunk, split_audio};
pub use silence::find_silence_near;
