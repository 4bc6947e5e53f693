/// Frame-driven animation driver with cancelable frame tickets.
pub mod animator;
/// Session wiring: target readiness, user trigger, status reporting.
pub mod morph;
/// Offline frame clock and render loops.
pub mod offline;
/// Status messages and sinks.
pub mod status;
