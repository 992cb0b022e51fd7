//! Remote transcription service boundary.

pub mod api;
pub mod transcriber;

pub use api::HttpRemoteTranscriber;
pub use transcriber::{CallError, MockRemoteTranscriber, RemoteParams, RemoteTranscriber};
