use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied: true,
    }
}

#[test]
fn encodes_a_decodable_png() {
    let frame = solid(3, 2, [30, 39, 46, 255]);
    let bytes = encode_png(&frame).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.as_raw(), &frame.data);
}

#[test]
fn encoding_is_deterministic() {
    let frame = solid(8, 8, [210, 218, 226, 255]);
    assert_eq!(encode_png(&frame).unwrap(), encode_png(&frame).unwrap());
}

#[test]
fn rejects_mismatched_buffers() {
    let mut frame = solid(2, 2, [0, 0, 0, 255]);
    frame.data.pop();
    assert!(matches!(encode_png(&frame), Err(HanoiError::Encode(_))));
}

#[test]
fn write_failure_names_the_path() {
    let frame = solid(1, 1, [0, 0, 0, 255]);
    let err = write_png(Path::new("target/missing-dir/x/frame.png"), &frame).unwrap_err();
    assert!(err.to_string().contains("frame.png"));
}
