use super::*;
use crate::foundation::core::CellColor;
use crate::render::surface::RecordingSurface;

fn cell(x: f64, y: f64, rgba: [u8; 4]) -> Cell {
    Cell {
        pos: Point::new(x, y),
        color: CellColor::from_rgba8(rgba),
    }
}

fn red_to_blue(delay: f64, speed: f64) -> Particle {
    Particle::new(
        cell(2.0, 2.0, [255, 0, 0, 255]),
        cell(10.0, 6.0, [0, 0, 255, 255]),
        delay,
        speed,
    )
    .unwrap()
}

#[test]
fn rejects_non_positive_speed_and_bad_delay() {
    let a = cell(0.0, 0.0, [0, 0, 0, 255]);
    assert!(Particle::new(a, a, 0.0, 0.0).is_err());
    assert!(Particle::new(a, a, 0.0, -1.0).is_err());
    assert!(Particle::new(a, a, 0.0, f64::NAN).is_err());
    assert!(Particle::new(a, a, -0.1, 1.0).is_err());
    assert!(Particle::new(a, a, f64::INFINITY, 1.0).is_err());
}

#[test]
fn zero_delay_advances_on_first_update() {
    let mut p = red_to_blue(0.0, 0.8);
    assert_eq!(p.state(), ParticleState::Animating { progress: 0.0 });
    p.update(0.25);
    assert!((p.progress() - 0.2).abs() < 1e-12);
    assert!(!p.is_finished());
}

#[test]
fn delayed_particle_burns_delay_without_progress() {
    let mut p = red_to_blue(0.5, 1.0);
    p.update(0.2);
    assert_eq!(p.progress(), 0.0);
    assert!((p.delay() - 0.3).abs() < 1e-12);
}

#[test]
fn step_that_zeroes_delay_does_not_advance_progress() {
    let mut p = red_to_blue(0.5, 1.0);
    p.update(2.0);
    assert_eq!(p.delay(), 0.0);
    assert_eq!(p.state(), ParticleState::Animating { progress: 0.0 });
    p.update(0.5);
    assert!((p.progress() - 0.5).abs() < 1e-12);
}

#[test]
fn progress_is_monotonic_and_finish_is_terminal() {
    let mut p = red_to_blue(0.1, 0.7);
    let mut last = p.progress();
    let mut seen_finished = false;
    for _ in 0..200 {
        p.update(1.0 / 60.0);
        assert!(p.progress() >= last);
        last = p.progress();
        if seen_finished {
            assert!(p.is_finished());
        }
        seen_finished |= p.is_finished();
    }
    assert!(seen_finished);
    assert_eq!(p.progress(), 1.0);
}

#[test]
fn finished_is_idempotent() {
    let mut p = red_to_blue(0.0, 1.0);
    p.update(1.0);
    assert!(p.is_finished());
    for dt in [0.0, 0.5, 10.0] {
        p.update(dt);
        assert!(p.is_finished());
        assert_eq!(p.progress(), 1.0);
    }
}

#[test]
fn finished_iff_progress_reaches_one() {
    let mut p = red_to_blue(0.0, 1.0);
    p.update(0.75);
    assert!(!p.is_finished());
    p.update(0.25);
    assert!(p.is_finished());
}

#[test]
fn negative_and_nan_deltas_are_ignored() {
    let mut p = red_to_blue(0.0, 1.0);
    p.update(0.5);
    p.update(-1.0);
    p.update(f64::NAN);
    assert!((p.progress() - 0.5).abs() < 1e-12);
}

#[test]
fn delayed_appearance_is_exactly_the_start_cell() {
    let p = red_to_blue(1.0, 1.0);
    let a = p.appearance(Ease::OutCubic);
    assert_eq!(a.center, Point::new(2.0, 2.0));
    assert_eq!(a.color.to_rgba8(), [255, 0, 0, 255]);
}

#[test]
fn appearance_uses_eased_progress() {
    let mut p = red_to_blue(0.0, 1.0);
    p.update(0.5);
    let a = p.appearance(Ease::OutCubic);
    // ease_out_cubic(0.5) = 0.875
    assert!((a.center.x - (2.0 + 8.0 * 0.875)).abs() < 1e-12);
    assert!((a.center.y - (2.0 + 4.0 * 0.875)).abs() < 1e-12);
    assert_eq!((a.color.r, a.color.g, a.color.b), (32, 0, 223));
    assert_eq!(a.color.a, 1.0);
}

#[test]
fn finished_appearance_is_the_target_cell() {
    let mut p = red_to_blue(0.0, 2.0);
    p.update(1.0);
    let a = p.appearance(Ease::OutCubic);
    assert_eq!(a.center, Point::new(10.0, 6.0));
    assert_eq!(a.color.to_rgba8(), [0, 0, 255, 255]);
}

#[test]
fn render_paints_one_centered_square_without_mutating() {
    let mut p = red_to_blue(0.0, 1.0);
    p.update(0.25);
    let before = p.clone();

    let mut surface = RecordingSurface::new(16, 16);
    p.render(&mut surface, &ParticleStyle::for_cell_size(4));
    p.render(&mut surface, &ParticleStyle::for_cell_size(4));

    assert_eq!(p, before);
    assert_eq!(surface.fills().len(), 2);
    assert_eq!(surface.fills()[0], surface.fills()[1]);
    assert_eq!(surface.fills()[0].side, 4.0);
    assert_eq!(surface.fills()[0].center, p.appearance(Ease::OutCubic).center);
}
