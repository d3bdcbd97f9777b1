use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{HanoiError, HanoiResult},
    render::backend::FrameRGBA,
};

/// Encode `frame` as an RGBA8 PNG in memory.
pub fn encode_png(frame: &FrameRGBA) -> HanoiResult<Vec<u8>> {
    check_len(frame)?;
    let mut out = std::io::Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| HanoiError::encode(format!("png encode: {e}")))?;
    Ok(out.into_inner())
}

/// Encode `frame` as PNG and write it to `path`, replacing any existing file.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> HanoiResult<()> {
    let bytes = encode_png(frame)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn check_len(frame: &FrameRGBA) -> HanoiResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(HanoiError::encode(format!(
            "frame byte length {} does not match {}x{} RGBA8",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
