/// Frame timing and color primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Interpolation and pixel arithmetic helpers.
pub mod math;
