use super::*;

#[test]
fn straight_conversion_keeps_opaque_and_transparent_pixels() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![10, 20, 30, 255, 0, 0, 0, 0],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba8(), frame.data);
}

#[test]
fn straight_conversion_unpremultiplies_partial_alpha() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 32, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![128, 64, 0, 128]);

    let straight = FrameRGBA {
        premultiplied: false,
        ..frame.clone()
    };
    assert_eq!(straight.to_straight_rgba8(), frame.data);
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![1, 2, 3, 4],
        premultiplied: false,
    };
    assert_eq!(frame.pixel(0, 0), Some([1, 2, 3, 4]));
    assert_eq!(frame.pixel(1, 0), None);
}
