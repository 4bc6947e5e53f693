/// MP4 output through the system `ffmpeg` binary.
pub mod ffmpeg;
/// Numbered PNG frame sequences.
pub mod png;
/// Frame sink contract and an in-memory implementation.
pub mod sink;
