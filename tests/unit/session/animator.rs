use super::*;
use crate::cells::sampler::Cell;
use crate::foundation::core::{CellColor, Point};
use crate::render::surface::RecordingSurface;

fn particle(x: f64, delay: f64, speed: f64) -> Particle {
    let start = Cell {
        pos: Point::new(x, 0.0),
        color: CellColor::from_rgba8([255, 0, 0, 255]),
    };
    let target = Cell {
        pos: Point::new(x, 10.0),
        color: CellColor::from_rgba8([0, 0, 255, 255]),
    };
    Particle::new(start, target, delay, speed).unwrap()
}

fn animator() -> Animator {
    Animator::new(ParticleStyle::for_cell_size(4))
}

#[test]
fn idle_animator_has_nothing_scheduled() {
    let a = animator();
    assert!(a.pending_frame().is_none());
    assert!(a.run().is_none());
    assert!(!a.is_running());
}

#[test]
fn first_tick_has_zero_delta() {
    let mut a = animator();
    let t = a.start(vec![particle(0.0, 0.0, 1.0)]);
    let mut surface = RecordingSurface::new(16, 16);

    assert_eq!(a.on_frame(t, 5_000.0, &mut surface), TickOutcome::Continue);
    assert_eq!(a.run().unwrap().particles()[0].progress(), 0.0);

    let t = a.pending_frame().unwrap();
    assert_eq!(a.on_frame(t, 5_500.0, &mut surface), TickOutcome::Continue);
    assert!((a.run().unwrap().particles()[0].progress() - 0.5).abs() < 1e-12);
}

#[test]
fn each_tick_clears_then_paints_every_particle() {
    let mut a = animator();
    let t = a.start(vec![particle(0.0, 0.5, 1.0), particle(4.0, 0.0, 1.0)]);
    let mut surface = RecordingSurface::new(16, 16);
    a.on_frame(t, 0.0, &mut surface);
    let t = a.pending_frame().unwrap();
    a.on_frame(t, 16.0, &mut surface);

    assert_eq!(surface.clears(), 2);
    assert_eq!(surface.fills().len(), 2);
    // The delayed particle is still pinned to its start cell.
    assert_eq!(surface.fills()[0].center, Point::new(0.0, 0.0));
}

#[test]
fn completes_once_and_stops_scheduling() {
    let mut a = animator();
    let mut ticket = a.start(vec![particle(0.0, 0.2, 1.0), particle(4.0, 0.0, 0.7)]);
    let mut surface = RecordingSurface::new(16, 16);

    let mut completions = 0;
    let mut ts = 0.0;
    loop {
        match a.on_frame(ticket, ts, &mut surface) {
            TickOutcome::Continue => ticket = a.pending_frame().unwrap(),
            TickOutcome::Complete => {
                completions += 1;
                break;
            }
            TickOutcome::Stale => panic!("fresh ticket reported stale"),
        }
        ts += 1000.0 / 60.0;
    }

    assert_eq!(completions, 1);
    assert!(a.pending_frame().is_none());
    assert_eq!(a.run().unwrap().unfinished(), 0);
    // Delivering the spent ticket again is a no-op.
    assert_eq!(a.on_frame(ticket, ts + 16.0, &mut surface), TickOutcome::Stale);
}

#[test]
fn restart_cancels_previous_schedule() {
    let mut a = animator();
    let old = a.start(vec![particle(0.0, 0.0, 1.0); 3]);
    let mut surface = RecordingSurface::new(16, 16);
    a.on_frame(old, 0.0, &mut surface);
    let old_next = a.pending_frame().unwrap();

    let new = a.start(vec![particle(8.0, 0.0, 1.0); 5]);
    assert_ne!(old_next, new);
    assert_ne!(old_next.run_id(), new.run_id());

    let clears_before = surface.clears();
    assert_eq!(a.on_frame(old_next, 16.0, &mut surface), TickOutcome::Stale);
    assert_eq!(surface.clears(), clears_before);

    assert_eq!(a.on_frame(new, 32.0, &mut surface), TickOutcome::Continue);
    assert_eq!(a.run().unwrap().particles().len(), 5);
    assert_eq!(surface.fills().len(), 5);
    assert!(surface.fills().iter().all(|f| f.center.x == 8.0));
}

#[test]
fn restart_resets_the_timestamp_baseline() {
    let mut a = animator();
    let t = a.start(vec![particle(0.0, 0.0, 1.0)]);
    let mut surface = RecordingSurface::new(16, 16);
    a.on_frame(t, 0.0, &mut surface);

    let t = a.start(vec![particle(0.0, 0.0, 1.0)]);
    a.on_frame(t, 10_000.0, &mut surface);
    assert_eq!(a.run().unwrap().particles()[0].progress(), 0.0);
}

#[test]
fn cancel_stops_the_run_without_replacing_it() {
    let mut a = animator();
    let t = a.start(vec![particle(0.0, 0.0, 1.0)]);
    assert_eq!(a.cancel(), Some(t));
    assert!(!a.is_running());
    let mut surface = RecordingSurface::new(16, 16);
    assert_eq!(a.on_frame(t, 0.0, &mut surface), TickOutcome::Stale);
    assert_eq!(a.run().unwrap().ticks(), 0);
}

#[test]
fn empty_population_completes_on_first_tick() {
    let mut a = animator();
    let t = a.start(Vec::new());
    let mut surface = RecordingSurface::new(16, 16);
    assert_eq!(a.on_frame(t, 0.0, &mut surface), TickOutcome::Complete);
}
