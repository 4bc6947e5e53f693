/// Source-to-target pairing and per-particle timing.
pub mod assign;
/// Grid sampling of pixel buffers.
pub mod sampler;
