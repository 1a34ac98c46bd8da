//! Drawing replay engine properties.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chatsync_core::canvas::{last_clear_index, replay, DrawingBoard, Raster, Rgba, Surface};
use chatsync_core::protocol::{decode_frame, DrawEvent, Point};

fn stroke(color: &str, pts: &[(f64, f64)]) -> DrawEvent {
    DrawEvent::stroke(pts.iter().map(|&(x, y)| Point::new(x, y)).collect(), color)
}

fn sample_log() -> Vec<DrawEvent> {
    vec![
        stroke("#ff0000", &[(0.0, 0.0), (10.0, 10.0)]),
        stroke("#00ff00", &[(5.0, 5.0)]),
        stroke("#0000ff", &[(1.0, 1.0), (2.0, 3.0), (4.0, 4.0)]),
        DrawEvent::clear("#000"),
        stroke("#123456", &[(7.0, 7.0), (8.0, 8.0)]),
        stroke("#abcdef", &[]),
        stroke("#fedcba", &[(9.0, 1.0), (9.0, 9.0)]),
    ]
}

/// Records calls so path boundaries are observable.
#[derive(Default)]
struct Recorder {
    resets: usize,
    paths: Vec<(String, usize)>,
}

impl Surface for Recorder {
    fn reset(&mut self) {
        self.resets += 1;
        self.paths.clear();
    }

    fn stroke_path(&mut self, color: &str, points: &[Point]) {
        self.paths.push((color.to_string(), points.len()));
    }
}

#[test]
fn replay_is_idempotent() {
    let log = sample_log();
    assert_eq!(replay(&log), replay(&log));
}

#[test]
fn clear_truncates_everything_before_it() {
    let before = sample_log();
    let after = vec![
        stroke("#111111", &[(0.0, 0.0), (1.0, 1.0)]),
        stroke("#222222", &[(3.0, 3.0), (4.0, 4.0)]),
    ];

    let mut full = before.clone();
    full.push(DrawEvent::clear("#000"));
    full.extend(after.clone());

    assert_eq!(replay(&full), replay(&after));
}

#[test]
fn only_log_order_last_clear_matters() {
    let log = vec![
        DrawEvent::clear("#000"),
        stroke("#ff0000", &[(0.0, 0.0), (1.0, 1.0)]),
        DrawEvent::clear("#fff"),
        stroke("#00ff00", &[(2.0, 2.0), (3.0, 3.0)]),
    ];
    assert_eq!(last_clear_index(&log), Some(2));
    let state = replay(&log);
    assert_eq!(state.strokes().len(), 1);
    assert_eq!(state.strokes()[0].color, "#00ff00");
}

#[test]
fn trailing_clear_leaves_blank_canvas() {
    let mut log = sample_log();
    log.push(DrawEvent::clear("#000"));
    assert!(replay(&log).is_blank());
}

#[test]
fn degenerate_strokes_never_render() {
    let log = vec![
        stroke("#ff0000", &[]),
        stroke("#00ff00", &[(4.0, 4.0)]),
        stroke("#0000ff", &[(1.0, 1.0), (2.0, 2.0)]),
        stroke("#ff00ff", &[(6.0, 6.0)]),
    ];
    let state = replay(&log);
    assert_eq!(state.strokes().len(), 1);
    assert!(state.strokes().iter().all(|s| s.points.len() >= 2));
}

#[test]
fn each_event_is_its_own_path() {
    let log = vec![
        stroke("#ff0000", &[(0.0, 0.0), (1.0, 1.0)]),
        stroke("#ff0000", &[(1.0, 1.0), (2.0, 2.0)]),
    ];
    let mut rec = Recorder::default();
    replay(&log).render(&mut rec);
    assert_eq!(rec.resets, 1);
    assert_eq!(rec.paths, vec![("#ff0000".to_string(), 2), ("#ff0000".to_string(), 2)]);
}

#[test]
fn replay_accepts_borrowed_log() {
    let log = sample_log();
    let borrowed: Vec<&DrawEvent> = log.iter().collect();
    assert_eq!(replay(&borrowed), replay(&log));
}

#[test]
fn scenario_red_clear_green_renders_only_green() {
    let frames = [
        r##"{"type":"draw","content":{"points":[{"x":0,"y":0},{"x":10,"y":10}],"color":"#ff0000"}}"##,
        r##"{"type":"draw","content":{"points":[],"color":"#000","clear":true}}"##,
        r##"{"type":"draw","content":{"points":[{"x":1,"y":1},{"x":2,"y":2}],"color":"#00ff00"}}"##,
    ];
    let log: Vec<DrawEvent> = frames
        .iter()
        .map(|f| decode_frame(f).unwrap().draw_event().cloned().unwrap())
        .collect();

    let state = replay(&log);
    assert_eq!(state.strokes().len(), 1);
    assert_eq!(state.strokes()[0].color, "#00ff00");

    let mut raster = Raster::new(20, 20, 2.0);
    state.render(&mut raster);
    assert_eq!(raster.pixel(1, 1), Some(Rgba([0, 255, 0, 255])));
    assert_eq!(raster.pixel(8, 8), Some(Rgba::TRANSPARENT));
}

#[test]
fn raster_matches_for_late_joiner() {
    // A peer that saw the whole log and one that only saw what followed the
    // last clear end up with identical pixels.
    let log = sample_log();
    let tail = &log[4..];

    let mut early = Raster::new(16, 16, 2.0);
    replay(&log).render(&mut early);
    let mut late = Raster::new(16, 16, 2.0);
    replay(tail).render(&mut late);

    assert_eq!(early.pixels(), late.pixels());
    assert!(early.painted() > 0);
}

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgba::parse_hex("#ff0000"), Some(Rgba([255, 0, 0, 255])));
    assert_eq!(Rgba::parse_hex("#0F0"), Some(Rgba([0, 255, 0, 255])));
    assert_eq!(Rgba::parse_hex("red"), None);
    assert_eq!(Rgba::parse_hex("#12345"), None);
}

#[test]
fn unparseable_color_draws_black() {
    let mut raster = Raster::new(8, 8, 2.0);
    raster.stroke_path("not-a-color", &[Point::new(1.0, 1.0), Point::new(6.0, 1.0)]);
    assert_eq!(raster.pixel(3, 1), Some(Rgba::BLACK));
}

#[test]
fn out_of_bounds_points_are_clipped() {
    let mut raster = Raster::new(10, 10, 2.0);
    raster.stroke_path("#ffffff", &[Point::new(-50.0, 5.0), Point::new(1e9, 5.0)]);
    assert_eq!(raster.pixel(0, 5), Some(Rgba([255, 255, 255, 255])));
    assert_eq!(raster.pixel(9, 5), Some(Rgba([255, 255, 255, 255])));
}

#[test]
fn board_draws_pending_stroke_on_top_until_release() {
    let mut board = DrawingBoard::new(Raster::new(20, 20, 2.0), "#0000ff");
    board.refresh::<DrawEvent>(&[]);
    assert_eq!(board.raster().painted(), 0);

    board.begin_stroke(Point::new(2.0, 2.0));
    board.extend_stroke(Point::new(12.0, 2.0));
    assert!(board.is_drawing());
    assert_eq!(board.raster().pixel(7, 2), Some(Rgba([0, 0, 255, 255])));
    // pending stroke is not part of the replayed state
    assert!(board.canvas().is_blank());

    let committed = board.finish_stroke().unwrap();
    assert_eq!(committed.points.len(), 2);
    assert_eq!(committed.color, "#0000ff");
    assert!(!committed.clear);
    // not echoed yet, so the raster is back to replay(log)
    assert_eq!(board.raster().painted(), 0);

    board.refresh(&[committed]);
    assert_eq!(board.raster().pixel(7, 2), Some(Rgba([0, 0, 255, 255])));
}

#[test]
fn board_survives_remote_refresh_mid_stroke() {
    let mut board = DrawingBoard::new(Raster::new(20, 20, 2.0), "#0000ff");
    board.begin_stroke(Point::new(2.0, 10.0));
    board.extend_stroke(Point::new(12.0, 10.0));

    board.refresh(&[stroke("#ff0000", &[(2.0, 2.0), (12.0, 2.0)])]);
    assert_eq!(board.raster().pixel(7, 2), Some(Rgba([255, 0, 0, 255])));
    assert_eq!(board.raster().pixel(7, 10), Some(Rgba([0, 0, 255, 255])));
}

#[test]
fn single_point_stroke_is_still_committed() {
    let mut board = DrawingBoard::new(Raster::new(4, 4, 1.0), "#000000");
    board.begin_stroke(Point::new(1.0, 1.0));
    let ev = board.finish_stroke().unwrap();
    assert_eq!(ev.points.len(), 1);
    assert!(board.finish_stroke().is_none());
}

#[test]
fn clear_event_uses_board_color() {
    let mut board = DrawingBoard::new(Raster::new(4, 4, 1.0), "#000000");
    assert!(board.set_color("#abcdef"));
    assert!(!board.set_color("red"));
    assert!(!board.set_color("#12345"));
    assert_eq!(board.color(), "#abcdef");
    let ev = board.clear_event();
    assert!(ev.clear);
    assert!(ev.points.is_empty());
    assert_eq!(ev.color, "#abcdef");
}
