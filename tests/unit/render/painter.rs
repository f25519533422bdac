use super::*;
use crate::assets::fonts::FontFace;

fn builtin(size_px: f32) -> SizedFont {
    SizedFont::new(FontFace::Builtin, size_px)
}

fn line(text: &str, x: i32, y: i32) -> PlacedLine {
    PlacedLine {
        text: text.to_string(),
        x,
        y,
        width: 0,
        height: 0,
    }
}

fn pixel(buf: &[u8], canvas: Canvas, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * canvas.width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn builtin_glyph_cells_are_filled() {
    let canvas = Canvas::new(64, 32).unwrap();
    let mut engine = TextLayoutEngine::new();
    let mut painter = TextPainter::new(canvas).unwrap();
    let font = builtin(20.0);
    painter
        .draw(&mut engine, &font, &line("H", 4, 3), (0, 0), Rgba8::WHITE)
        .unwrap();
    let layer = painter.finish().unwrap();

    let cell = BuiltinFont::for_size(20.0).cells("H")[0];
    let (cx, cy) = (4 + cell.x + cell.w / 2, 3 + cell.y + cell.h / 2);
    assert_eq!(pixel(&layer, canvas, cx, cy), [255, 255, 255, 255]);
    assert_eq!(pixel(&layer, canvas, 63, 31), [0, 0, 0, 0]);
}

#[test]
fn face_is_drawn_over_shadow() {
    let canvas = Canvas::new(64, 32).unwrap();
    let mut engine = TextLayoutEngine::new();
    let mut painter = TextPainter::new(canvas).unwrap();
    let font = builtin(20.0);
    painter
        .draw_with_shadow(
            &mut engine,
            &font,
            &line("H", 4, 3),
            Rgba8::WHITE,
            Rgba8::BLACK.with_alpha(180),
            &[(1, 1), (-1, -1), (1, -1), (-1, 1)],
        )
        .unwrap();
    let layer = painter.finish().unwrap();

    let cell = BuiltinFont::for_size(20.0).cells("H")[0];
    assert_eq!(
        pixel(&layer, canvas, 4 + cell.x, 3 + cell.y),
        [255, 255, 255, 255]
    );
    assert!(layer.chunks_exact(4).any(|px| px[3] > 0 && px[0] == 0));
}

#[test]
fn empty_or_transparent_text_leaves_layer_clear() {
    let canvas = Canvas::new(16, 16).unwrap();
    let mut engine = TextLayoutEngine::new();
    let mut painter = TextPainter::new(canvas).unwrap();
    let font = builtin(10.0);
    painter
        .draw(&mut engine, &font, &line("", 0, 0), (0, 0), Rgba8::WHITE)
        .unwrap();
    painter
        .draw(&mut engine, &font, &line("x", 0, 0), (0, 0), Rgba8::WHITE.with_alpha(0))
        .unwrap();
    let layer = painter.finish().unwrap();
    assert!(layer.iter().all(|b| *b == 0));
}

#[test]
fn outline_text_stays_inside_measured_box() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fonts/DejaVuSans.ttf");
    let outline = crate::assets::fonts::load_font_file(std::path::Path::new(path)).unwrap();
    let font = SizedFont::new(FontFace::Outline(std::sync::Arc::new(outline)), 48.0);
    let canvas = Canvas::new(400, 120).unwrap();
    let mut engine = TextLayoutEngine::new();
    let extent = engine.measure(&font, "Keep going");
    let placed = PlacedLine {
        text: "Keep going".to_string(),
        x: 30,
        y: 25,
        width: extent.width.ceil() as u32,
        height: extent.height.ceil() as u32,
    };

    let mut painter = TextPainter::new(canvas).unwrap();
    painter
        .draw(&mut engine, &font, &placed, (0, 0), Rgba8::WHITE)
        .unwrap();
    let layer = painter.finish().unwrap();

    let margin = 2;
    let inside = |x: u32, y: u32| {
        let (x, y) = (x as i32, y as i32);
        x >= placed.x - margin
            && x < placed.x + placed.width as i32 + margin
            && y >= placed.y - margin
            && y < placed.y + placed.height as i32 + margin
    };
    let (mut painted_inside, mut painted_outside) = (0, 0);
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            if pixel(&layer, canvas, x, y)[3] == 0 {
                continue;
            }
            if inside(x, y) {
                painted_inside += 1;
            } else {
                painted_outside += 1;
            }
        }
    }
    assert!(painted_inside > 200, "only {painted_inside} pixels painted");
    assert_eq!(painted_outside, 0);
}
