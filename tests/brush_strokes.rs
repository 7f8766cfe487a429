use std::collections::{HashSet, VecDeque};

use coloring_book::canvas::ColoringCanvas;
use coloring_book::config::ColoringConfig;
use coloring_book::cue::Warning;
use coloring_book::event::CanvasEvent;
use coloring_book::pixels::{PAPER, TRANSPARENT};
use coloring_book::template::{OutlineArt, Shape, Template};
use coloring_book::tool::ToolKind;
use egui::Pos2;
use image::Rgba;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn template(shapes: Vec<Shape>) -> Template {
    Template {
        id: "test".to_owned(),
        display_name: "Test".to_owned(),
        outline: OutlineArt::Shapes(shapes),
        suggested_palette: vec![RED],
        fun_fact: String::new(),
    }
}

fn mounted_canvas(shapes: Vec<Shape>) -> ColoringCanvas {
    let mut canvas = ColoringCanvas::new(ColoringConfig::default());
    canvas.load_template(&template(shapes), None).unwrap();
    canvas.set_color(RED);
    canvas.drain_events();
    canvas
}

fn drag(canvas: &mut ColoringCanvas, points: &[Pos2]) {
    canvas.pointer_down(points[0]);
    for point in &points[1..] {
        canvas.pointer_move(*point);
    }
    canvas.pointer_up();
}

#[test]
fn test_vertical_stroke_paints_a_solid_band() {
    let mut canvas = mounted_canvas(vec![]);
    canvas.set_brush_width(10.0);

    drag(&mut canvas, &[Pos2::new(100.0, 100.0), Pos2::new(100.0, 200.0)]);

    let visible = canvas.visible().unwrap();
    for y in 100..200 {
        for x in 95..=104 {
            assert_eq!(visible.pixel(x, y), Some(RED), "gap at ({}, {})", x, y);
        }
        assert_eq!(visible.pixel(94, y), Some(PAPER));
        assert_eq!(visible.pixel(105, y), Some(PAPER));
    }
}

#[test]
fn test_fast_diagonal_stroke_is_connected() {
    let mut canvas = mounted_canvas(vec![]);
    canvas.set_brush_width(2.0);

    // Large jumps between pointer samples
    drag(
        &mut canvas,
        &[Pos2::new(10.3, 10.7), Pos2::new(200.1, 90.6), Pos2::new(40.2, 300.4)],
    );

    let visible = canvas.visible().unwrap();
    let painted: HashSet<(u32, u32)> = (0..visible.height())
        .flat_map(|y| (0..visible.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| visible.pixel(x, y) == Some(RED))
        .collect();
    assert!(painted.contains(&(10, 10)));

    // Every painted pixel is reachable from the first through 4-neighbors
    let mut seen = HashSet::from([(10u32, 10u32)]);
    let mut queue = VecDeque::from([(10u32, 10u32)]);
    while let Some((x, y)) = queue.pop_front() {
        let neighbors = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for next in neighbors {
            if painted.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    assert_eq!(seen.len(), painted.len());
    assert!(painted.contains(&(40, 300)));
}

#[test]
fn test_brush_writes_opaque_color() {
    let mut canvas = mounted_canvas(vec![]);
    canvas.set_color(Rgba([10, 20, 30, 12]));

    drag(&mut canvas, &[Pos2::new(50.0, 50.0), Pos2::new(60.0, 50.0)]);

    assert_eq!(canvas.visible().unwrap().pixel(55, 50), Some(Rgba([10, 20, 30, 255])));
}

#[test]
fn test_eraser_clears_to_transparent() {
    let mut canvas = mounted_canvas(vec![]);
    canvas.set_brush_width(10.0);
    drag(&mut canvas, &[Pos2::new(100.0, 100.0), Pos2::new(100.0, 200.0)]);

    canvas.select_tool(ToolKind::Eraser);
    drag(&mut canvas, &[Pos2::new(100.0, 150.0), Pos2::new(100.0, 160.0)]);

    let visible = canvas.visible().unwrap();
    assert_eq!(visible.pixel(100, 155), Some(TRANSPARENT));
    // Eraser radius is 1.5x the brush radius
    assert_eq!(visible.pixel(93, 155), Some(TRANSPARENT));
    assert_eq!(visible.pixel(100, 120), Some(RED));
}

#[test]
fn test_crossing_the_line_warns_but_keeps_the_stroke() {
    let line = Shape::Line {
        from: (0.5, 0.0),
        to: (0.5, 1.0),
    };
    let mut canvas = mounted_canvas(vec![line]);
    canvas.set_brush_width(4.0);

    drag(&mut canvas, &[Pos2::new(200.0, 100.0), Pos2::new(300.0, 100.0)]);

    let visible = canvas.visible().unwrap();
    assert_eq!(visible.pixel(220, 100), Some(RED));
    assert_eq!(visible.pixel(280, 100), Some(RED));
    assert_eq!(canvas.cue().active_warning(), Some(Warning::CrossedBoundary));

    let warnings = canvas
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, CanvasEvent::BoundaryWarning(_)))
        .count();
    assert_eq!(warnings, 1);
}

#[test]
fn test_no_warning_without_boundary_help() {
    let line = Shape::Line {
        from: (0.5, 0.0),
        to: (0.5, 1.0),
    };
    let mut canvas = mounted_canvas(vec![line]);
    canvas.set_boundary_help(false);

    drag(&mut canvas, &[Pos2::new(200.0, 100.0), Pos2::new(300.0, 100.0)]);

    assert_eq!(canvas.cue().active_warning(), None);
}

#[test]
fn test_stroke_events() {
    let mut canvas = mounted_canvas(vec![]);

    drag(&mut canvas, &[Pos2::new(50.0, 50.0), Pos2::new(80.0, 50.0)]);

    let events = canvas.drain_events();
    assert_eq!(events.first(), Some(&CanvasEvent::StrokeStarted { tool: ToolKind::Brush }));
    assert!(matches!(
        events.last(),
        Some(CanvasEvent::StrokeCompleted { tool: ToolKind::Brush, changed }) if *changed > 0
    ));
}
