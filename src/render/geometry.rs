use crate::foundation::core::Canvas;
use crate::puzzle::state::PEG_COUNT;

/// Scene layout constants derived from disk count and scale, in whole pixels.
///
/// The layout is a pure function of `(layers, scaling)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Geometry {
    /// Disk count.
    pub layers: u64,
    /// Horizontal pixels per unit of disk radius.
    pub disk_unit: u64,
    /// Disk thickness.
    pub disk_height: u64,
    /// Pole stroke width.
    pub pole_width: u64,
    /// Gap between peg areas.
    pub spacing: u64,
    /// Outer padding, also the counter inset.
    pub padding: u64,
    /// Ground band height.
    pub ground: u64,
    /// Free space above the pole tops.
    pub ceiling: u64,
    /// Pole length above the ground line.
    pub pole_height: u64,
    /// Half-extent reserved for the largest disk.
    pub max_radius: u64,
    /// Canvas width.
    pub width: u64,
    /// Canvas height.
    pub height: u64,
}

impl Geometry {
    /// Compute the layout for `layers` disks at `scaling`.
    pub fn new(layers: u32, scaling: u32) -> Self {
        let layers = u64::from(layers);
        let s = u64::from(scaling);

        let disk_unit = 10 * s;
        let disk_height = 20 * s;
        let pole_width = 10 * s;
        let spacing = 40 * s;
        let padding = 10 * s;
        let ground = 30 * s;
        let ceiling = 30 * s;
        let pole_height = layers * disk_height + disk_height / 2;
        let max_radius = (2 * layers + 1) * disk_unit;
        let width = 2 * padding + 4 * spacing + 6 * max_radius;
        let height = ground + pole_height + pole_width / 2 + ceiling + spacing + padding;

        Self {
            layers,
            disk_unit,
            disk_height,
            pole_width,
            spacing,
            padding,
            ground,
            ceiling,
            pole_height,
            max_radius,
            width,
            height,
        }
    }

    /// Canvas size, saturating each side at `u32::MAX`.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::try_from(self.width).unwrap_or(u32::MAX),
            height: u32::try_from(self.height).unwrap_or(u32::MAX),
        }
    }

    /// Y coordinate of the ground line (pole bases).
    pub fn base_y(&self) -> f64 {
        (self.height - self.ground) as f64
    }

    /// Y coordinate of the pole tops.
    pub fn pole_top_y(&self) -> f64 {
        self.base_y() - self.pole_height as f64
    }

    /// Horizontal centre of `peg`.
    pub fn pole_x(&self, peg: usize) -> f64 {
        debug_assert!(peg < PEG_COUNT);
        let i = peg as u64 + 1;
        (self.padding + i * (self.spacing + 2 * self.max_radius) - self.max_radius) as f64
    }

    /// Vertical centre of a disk in `slot` (0 = top slot).
    pub fn slot_center_y(&self, slot: usize) -> f64 {
        let h = self.disk_height as f64;
        self.base_y() - (self.layers as f64 - 1.0) * h + slot as f64 * h - h / 2.0
    }

    /// Half-width of the straight section of a disk with `radius`.
    pub fn disk_half_width(&self, radius: u32) -> f64 {
        f64::from(radius) * self.disk_unit as f64 + self.cap_radius()
    }

    /// Radius of the semicircular disk end caps.
    pub fn cap_radius(&self) -> f64 {
        self.disk_height as f64 / 2.0
    }

    /// Outline of a disk with `radius` in `slot` of `peg`: a capsule whose caps have
    /// [`Geometry::cap_radius`].
    pub fn disk_shape(&self, peg: usize, slot: usize, radius: u32) -> kurbo::RoundedRect {
        let x = self.pole_x(peg);
        let y = self.slot_center_y(slot);
        let w = self.disk_half_width(radius);
        let r = self.cap_radius();
        kurbo::RoundedRect::new(x - w - r, y - r, x + w + r, y + r, r)
    }

    /// Pole centre line, from the ground line up by the pole height.
    pub fn pole_line(&self, peg: usize) -> kurbo::Line {
        let x = self.pole_x(peg);
        kurbo::Line::new((x, self.base_y()), (x, self.pole_top_y()))
    }

    /// Ground band across the full width.
    pub fn ground_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(0.0, self.base_y(), self.width as f64, self.height as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
