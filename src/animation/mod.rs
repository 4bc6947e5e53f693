/// Easing curves.
pub mod ease;
/// Particle state machine and painting.
pub mod particle;
