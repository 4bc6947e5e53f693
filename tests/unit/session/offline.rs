use super::*;
use crate::config::MorphConfig;
use crate::encode::sink::InMemorySink;
use crate::render::cpu::CpuSurfaceOpts;
use crate::session::status::{Status, StatusSlot};

fn config() -> MorphConfig {
    MorphConfig {
        canvas_size: 8,
        cell_size: 4,
        seed: Some(7),
        ..MorphConfig::default()
    }
}

fn solid(rgba: [u8; 4]) -> image::DynamicImage {
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(8, 8, image::Rgba(rgba)))
}

fn running_session() -> MorphSession<StatusSlot> {
    let mut s = MorphSession::new(config(), StatusSlot::new()).unwrap();
    s.load_target(&solid([0, 0, 255, 255])).unwrap();
    s.begin(&solid([255, 0, 0, 255])).unwrap();
    s
}

fn surface() -> CpuSurface {
    CpuSurface::new(8, 8, CpuSurfaceOpts::default()).unwrap()
}

#[test]
fn clock_stamps_frames_at_fps() {
    let mut clock = FrameClock::new(Fps::new(50, 1).unwrap());
    assert_eq!(clock.tick(), (FrameIndex(0), 0.0));
    assert_eq!(clock.tick(), (FrameIndex(1), 20.0));
    assert_eq!(clock.tick(), (FrameIndex(2), 40.0));
}

#[test]
fn transition_renders_until_complete() {
    let mut session = running_session();
    let mut surface = surface();
    let mut sink = InMemorySink::new();

    let stats = render_transition(&mut session, &mut surface, &mut sink).unwrap();

    assert!(stats.frames > 1);
    assert_eq!(sink.frames().len() as u64, stats.frames);
    assert!(sink.is_ended());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (8, 8));
    for (i, (idx, _)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
    }

    let (_, first) = &sink.frames()[0];
    assert_eq!(first.pixel(2, 2), [255, 0, 0, 255]);
    let (_, last) = sink.frames().last().unwrap();
    assert_eq!(last.pixel(2, 2), [0, 0, 255, 255]);
    assert_eq!(session.status().current(), Some(Status::Complete));
}

#[test]
fn transition_requires_running_session() {
    let mut session = MorphSession::new(config(), StatusSlot::new()).unwrap();
    let mut sink = InMemorySink::new();
    assert!(render_transition(&mut session, &mut surface(), &mut sink).is_err());
    assert!(sink.config().is_none());
}

#[test]
fn still_at_zero_shows_source_colors() {
    let mut session = running_session();
    let frame = render_still(&mut session, &mut surface(), 0.0).unwrap();
    assert_eq!(frame.pixel(6, 6), [255, 0, 0, 255]);
    assert!(session.pending_frame().is_some());
}

#[test]
fn still_past_the_end_shows_target_colors() {
    let mut session = running_session();
    let frame = render_still(&mut session, &mut surface(), 30.0).unwrap();
    assert_eq!(frame.pixel(6, 6), [0, 0, 255, 255]);
    assert!(session.pending_frame().is_none());
}

#[test]
fn still_rejects_negative_time() {
    let mut session = running_session();
    assert!(render_still(&mut session, &mut surface(), -1.0).is_err());
}
