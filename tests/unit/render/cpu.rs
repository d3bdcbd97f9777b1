use super::*;
use crate::{
    foundation::core::palette,
    puzzle::state::PuzzleState,
    render::{
        geometry::Geometry,
        plan::{compile_counter, compile_scene},
        text::CounterFont,
    },
};

fn rgba(c: Rgba8) -> [u8; 4] {
    [c.r, c.g, c.b, c.a]
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0xcbf2_9ce4_8422_2325u64;
    for &b in bytes {
        state ^= u64::from(b);
        state = state.wrapping_mul(0x0100_0000_01b3);
    }
    state
}

#[test]
fn scene_pixels_follow_layout() {
    let g = Geometry::new(3, 1);
    let mut renderer = CpuRenderer::new();
    let frame = renderer
        .render(&compile_scene(&g, &PuzzleState::new(3), 0, false))
        .unwrap();

    assert_eq!((frame.width, frame.height), (600, 185));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(1, 1), Some(rgba(palette::BACKGROUND)));
    assert_eq!(frame.pixel(1, 184), Some(rgba(palette::GROUND)));

    let base = g.base_y() as u32;
    let pole_mid = g.pole_x(1) as u32;
    assert_eq!(frame.pixel(pole_mid, base - 40), Some(rgba(palette::POLE)));

    let disk = frame.pixel(g.pole_x(0) as u32 + 30, base - 10).unwrap();
    assert_eq!(disk[0], 255);
    assert!(disk[1] >= palette::DISK_BOTTOM.g && disk[1] <= palette::DISK_TOP.g);
    assert_eq!(disk[3], 255);

    assert_eq!(frame.pixel(g.pole_x(2) as u32 + 30, base - 10), Some(rgba(palette::BACKGROUND)));
}

#[test]
fn rendering_is_idempotent() {
    let g = Geometry::new(4, 1);
    let mut state = PuzzleState::new(4);
    state.apply(0, 1);
    state.apply(0, 2);
    let plan = compile_scene(&g, &state, 2, false);

    let mut renderer = CpuRenderer::new();
    let a = renderer.render(&plan).unwrap();
    let b = renderer.render(&plan).unwrap();
    let c = CpuRenderer::new().render(&plan).unwrap();
    assert_eq!(digest_u64(&a.data), digest_u64(&b.data));
    assert_eq!(a, c);
}

#[test]
fn surfaces_are_reused_without_stale_pixels() {
    let g = Geometry::new(3, 1);
    let mut renderer = CpuRenderer::new();
    let first = renderer
        .render(&compile_scene(&g, &PuzzleState::new(3), 0, false))
        .unwrap();

    let mut moved = PuzzleState::new(3);
    moved.apply(0, 2);
    let _ = renderer.render(&compile_scene(&g, &moved, 1, false)).unwrap();

    let again = renderer
        .render(&compile_scene(&g, &PuzzleState::new(3), 0, false))
        .unwrap();
    assert_eq!(first, again);
}

#[test]
fn text_without_font_is_an_error() {
    let g = Geometry::new(3, 1);
    let mut renderer = CpuRenderer::new();
    let err = renderer
        .render(&compile_scene(&g, &PuzzleState::new(3), 0, true))
        .unwrap_err();
    assert!(matches!(err, HanoiError::Render(_)));
    assert!(renderer.counter_canvas(7).is_err());
}

#[test]
fn counter_overlay_sized_from_max_label() {
    let Ok(font) = CounterFont::from_system("DejaVu Sans") else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font, 50.0).unwrap();
    let expected_w = engine.measure("1.023").width.ceil() as u32 + 2;

    let mut renderer = CpuRenderer::with_text(engine);
    let canvas = renderer.counter_canvas(1023).unwrap();
    assert_eq!(canvas.width, expected_w);
    assert_eq!(canvas.height, 52);

    let a = renderer.render(&compile_counter(canvas, 512)).unwrap();
    let b = renderer.render(&compile_counter(canvas, 512)).unwrap();
    assert_eq!(a, b);
    assert!(
        a.data
            .chunks_exact(4)
            .any(|px| px != rgba(palette::BACKGROUND).as_slice())
    );
}

#[test]
fn counter_display_draws_into_top_right() {
    let Ok(font) = CounterFont::from_system("DejaVu Sans") else {
        return;
    };
    let g = Geometry::new(3, 1);
    let mut renderer = CpuRenderer::with_text(TextLayoutEngine::new(&font, 50.0).unwrap());
    let plain = CpuRenderer::new()
        .render(&compile_scene(&g, &PuzzleState::new(3), 0, false))
        .unwrap();
    let labelled = renderer
        .render(&compile_scene(&g, &PuzzleState::new(3), 0, true))
        .unwrap();

    let mut differs_right = false;
    let mut differs_left = false;
    for y in 0..60 {
        for x in 0..g.width as u32 {
            if plain.pixel(x, y) != labelled.pixel(x, y) {
                if x > g.width as u32 / 2 {
                    differs_right = true;
                } else {
                    differs_left = true;
                }
            }
        }
    }
    assert!(differs_right);
    assert!(!differs_left);
}
