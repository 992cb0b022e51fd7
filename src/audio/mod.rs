//! Audio loading, probing, and slicing.

pub mod probe;
pub mod track;

pub use probe::probe_duration_seconds;
pub use track::AudioTrack;
