use super::*;
use crate::layout::{ICON_LOOP_PLAYLIST, layout};
use crate::metadata::{LoopStatus, MetadataModel, PlaybackStatus};
use std::io::Read;

struct Capture(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

impl FrameSink for Capture {
    fn send(&mut self, canvas: &Canvas) -> Result<(), DisplayError> {
        *self.0.borrow_mut() = canvas.as_bytes().to_vec();
        Ok(())
    }
}

#[test]
fn canvas_packs_msb_first_and_clips() {
    let mut c = Canvas::new(10, 2);
    assert_eq!(c.as_bytes().len(), 4);

    c.set_pixel(0, 0, true);
    c.set_pixel(9, 1, true);
    c.set_pixel(10, 0, true);
    c.set_pixel(0, 2, true);

    assert_eq!(c.as_bytes(), &[0x80, 0x00, 0x00, 0x40]);
    assert!(c.pixel(9, 1));
    assert!(!c.pixel(10, 0));
    assert_eq!(c.lit(), 2);

    c.fill(false);
    assert_eq!(c.lit(), 0);
}

#[test]
fn canvas_display_reports_font_metrics() {
    let display = CanvasDisplay::new(Geometry::default(), Box::new(AsciiSink::new(Vec::new())));
    assert_eq!(display.glyph_width(FontSize::Small), 4);
    assert_eq!(display.glyph_width(FontSize::Medium), 5);
    assert_eq!(display.glyph_width(FontSize::Large), 8);
    assert_eq!(display.geometry(), Geometry { width: 160, height: 43 });
}

#[test]
fn text_lands_on_its_row_band() {
    let mut display = CanvasDisplay::new(Geometry::default(), Box::new(AsciiSink::new(Vec::new())));
    display.render_text("HI", 2, FontSize::Medium, 10, 0);

    let c = display.canvas();
    assert!(c.lit() > 0);
    for y in 0..43 {
        for x in 0..160 {
            if c.pixel(x, y) {
                assert!((14..21).contains(&y), "pixel outside row 2 at y={y}");
                assert!((10..20).contains(&x), "pixel outside text at x={x}");
            }
        }
    }

    display.clear();
    assert_eq!(display.canvas().lit(), 0);
}

#[test]
fn bitmap_overlay_matches_icon_bits() {
    let mut display = CanvasDisplay::new(Geometry::default(), Box::new(AsciiSink::new(Vec::new())));
    display.overlay_bitmap(152, 35, &ICON_LOOP_PLAYLIST);

    let c = display.canvas();
    for (row, bits) in ICON_LOOP_PLAYLIST.data.iter().enumerate() {
        for col in 0..8u32 {
            let expected = bits & (0x80 >> col) != 0;
            assert_eq!(c.pixel(152 + col, 35 + row as u32), expected);
        }
    }
}

#[test]
fn transmit_hands_the_frame_to_the_sink() {
    let captured = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let mut display = CanvasDisplay::new(
        Geometry { width: 16, height: 1 },
        Box::new(Capture(captured.clone())),
    );
    display.overlay_bitmap(0, 0, &ICON_LOOP_PLAYLIST);
    display.transmit().unwrap();
    assert_eq!(*captured.borrow(), vec![0b0111_1100, 0x00]);
}

#[test]
fn device_sink_writes_packed_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lcd");
    std::fs::File::create(&path).unwrap();

    let mut canvas = Canvas::new(8, 2);
    canvas.set_pixel(7, 0, true);
    canvas.set_pixel(0, 1, true);

    let mut sink = DeviceSink::open(&path).unwrap();
    sink.send(&canvas).unwrap();
    drop(sink);

    let mut bytes = Vec::new();
    std::fs::File::open(&path)
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    assert_eq!(bytes, vec![0x01, 0x80]);
}

#[test]
fn device_sink_open_failure_names_the_path() {
    let err = DeviceSink::open(std::path::Path::new("/nonexistent/dir/lcd"))
        .err()
        .unwrap();
    assert!(matches!(err, DisplayError::Open { .. }));
    assert!(err.to_string().contains("/nonexistent/dir/lcd"));
}

#[test]
fn ascii_sink_prints_one_line_per_row() {
    let mut canvas = Canvas::new(3, 2);
    canvas.set_pixel(1, 0, true);
    let mut sink = AsciiSink::new(Vec::new());
    sink.send(&canvas).unwrap();
    assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), ".#.\n...\n\n");
}

#[test]
fn full_frame_renders_through_the_canvas_driver() {
    let model = MetadataModel {
        title: "Song".into(),
        album: "Album".into(),
        artist: vec!["A".into()],
        length: 183_000_000,
        position: 3000,
        playback_status: PlaybackStatus::Playing,
        loop_status: Some(LoopStatus::Track),
        ..MetadataModel::default()
    };
    let mut display = CanvasDisplay::new(Geometry::default(), Box::new(AsciiSink::new(Vec::new())));
    let geometry = display.geometry();
    for instruction in layout(&model, geometry, &display, FontSize::Medium) {
        display.draw(&instruction);
    }
    assert!(display.canvas().lit() > 0);
    display.transmit().unwrap();
}

#[test]
fn text_rows_follow_font_line_height() {
    let mut display = CanvasDisplay::new(Geometry::default(), Box::new(AsciiSink::new(Vec::new())));
    display.render_text("HI", 1, FontSize::Large, 0, 0);

    let top = FontSize::Large.line_height();
    let c = display.canvas();
    assert!(c.lit() > 0);
    for y in 0..43 {
        for x in 0..160 {
            if c.pixel(x, y) {
                assert!((top..2 * top).contains(&y), "pixel outside row 1 at y={y}");
            }
        }
    }
}
