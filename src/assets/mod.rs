/// Cover-fit adapter from arbitrary images to a fixed output surface.
pub mod cover;
/// Image decoding.
pub mod decode;
