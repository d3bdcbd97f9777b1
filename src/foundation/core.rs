/// Index of an emitted output frame (0-based, dense, strictly increasing).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Next frame index.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Dimensions as `u16`, the surface limit of the CPU rasterizer.
    pub fn as_u16(self) -> Option<(u16, u16)> {
        let w = u16::try_from(self.width).ok()?;
        let h = u16::try_from(self.height).ok()?;
        Some((w, h))
    }
}

/// Straight-alpha RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque colour from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    /// Linear interpolation per channel, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let af = f64::from(a);
            let bf = f64::from(b);
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Fixed palette of the scene.
pub mod palette {
    use super::Rgba8;

    /// Canvas background.
    pub const BACKGROUND: Rgba8 = Rgba8::hex(0x1e272e);
    /// Poles and counter text.
    pub const POLE: Rgba8 = Rgba8::hex(0xd2dae2);
    /// Ground band.
    pub const GROUND: Rgba8 = Rgba8::hex(0x485460);
    /// Disk gradient colour at the ground line.
    pub const DISK_BOTTOM: Rgba8 = Rgba8::hex(0xff5e57);
    /// Disk gradient colour at the pole top.
    pub const DISK_TOP: Rgba8 = Rgba8::hex(0xffdd59);
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
