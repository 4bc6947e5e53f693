use super::*;
use crate::foundation::core::Fps;

fn frame(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cellmorph_png_{tag}_{}", std::process::id()))
}

#[test]
fn writes_numbered_opaque_pngs() {
    let dir = temp_dir("ok");
    let _ = std::fs::remove_dir_all(&dir);
    let mut sink = PngSequenceSink::new(&dir, [10, 20, 30, 255]);
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &frame(2, 2, [0, 0, 0, 0]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &frame(2, 2, [255, 0, 0, 255]))
        .unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    let first = image::open(dir.join("frame_00000.png")).unwrap().to_rgba8();
    assert_eq!(first.get_pixel(0, 0).0, [10, 20, 30, 255]);
    let second = image::open(dir.join("frame_00001.png")).unwrap().to_rgba8();
    assert_eq!(second.get_pixel(1, 1).0, [255, 0, 0, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rejects_frames_before_begin_and_wrong_sizes() {
    let dir = temp_dir("bad");
    let mut sink = PngSequenceSink::new(&dir, [0, 0, 0, 255]);
    assert!(sink.push_frame(FrameIndex(0), &frame(2, 2, [0; 4])).is_err());
    assert!(sink.end().is_err());

    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame(3, 2, [0; 4])).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn single_frame_png_is_flattened_over_background() {
    let dir = temp_dir("still");
    let path = dir.join("nested").join("still.png");
    let _ = std::fs::remove_dir_all(&dir);

    // Fully transparent frame over a half-transparent background.
    write_frame_png(&path, &frame(2, 2, [0, 0, 0, 0]), [200, 0, 0, 128]).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0[3], 255);
    assert_eq!(img.get_pixel(1, 1).0, [200, 0, 0, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}
