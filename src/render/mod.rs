/// `vello_cpu` rasterizer surface.
pub mod cpu;
/// Surface contract, frames, and the recording surface.
pub mod surface;
