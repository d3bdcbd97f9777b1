use crate::{
    foundation::{
        core::{Canvas, Rgba8, palette},
        format::counter_label,
    },
    puzzle::state::{PEG_COUNT, PuzzleState},
    render::geometry::Geometry,
};

/// Linear gradient along the y axis, padded beyond its endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalGradient {
    /// Y coordinate where `start` applies.
    pub y_start: f64,
    /// Y coordinate where `end` applies.
    pub y_end: f64,
    /// Colour at `y_start`.
    pub start: Rgba8,
    /// Colour at `y_end`.
    pub end: Rgba8,
}

impl VerticalGradient {
    /// Colour at canvas row coordinate `y`.
    pub fn color_at(&self, y: f64) -> Rgba8 {
        let span = self.y_end - self.y_start;
        let t = if span == 0.0 {
            0.0
        } else {
            (y - self.y_start) / span
        };
        self.start.lerp(self.end, t)
    }
}

/// Fill source of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Flat colour.
    Solid(Rgba8),
    /// Canvas-anchored vertical gradient.
    Vertical(VerticalGradient),
}

/// Horizontal anchoring of a text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor is the right edge of the text.
    End,
    /// Anchor is the horizontal centre of the text.
    Center,
}

/// Vertical anchoring of a text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// Anchor is the top of the ascent.
    Hanging,
    /// Anchor is the middle of the em box.
    Middle,
}

/// One drawing instruction, in canvas pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill an axis-aligned rectangle.
    FillRect {
        /// Area to fill.
        rect: kurbo::Rect,
        /// Fill paint.
        paint: Paint,
    },
    /// Stroke a line with round caps.
    StrokeLine {
        /// Centre line.
        line: kurbo::Line,
        /// Stroke width.
        width: f64,
        /// Stroke colour.
        color: Rgba8,
    },
    /// Fill a rounded rectangle.
    FillRoundedRect {
        /// Outline.
        shape: kurbo::RoundedRect,
        /// Fill paint.
        paint: Paint,
    },
    /// Draw a single line of text.
    Text {
        /// Text content.
        text: String,
        /// Anchor point, interpreted through `align` and `baseline`.
        anchor: kurbo::Point,
        /// Horizontal anchoring.
        align: TextAlign,
        /// Vertical anchoring.
        baseline: TextBaseline,
        /// Text colour.
        color: Rgba8,
    },
}

/// Backend-agnostic list of draw operations for one surface.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePlan {
    /// Target surface size.
    pub canvas: Canvas,
    /// Operations in painter's order.
    pub ops: Vec<DrawOp>,
}

/// Gradient shared by every disk: warm red at the ground line to yellow at the pole top.
pub fn disk_gradient(geometry: &Geometry) -> VerticalGradient {
    VerticalGradient {
        y_start: geometry.base_y(),
        y_end: geometry.pole_top_y(),
        start: palette::DISK_BOTTOM,
        end: palette::DISK_TOP,
    }
}

/// Plan the main puzzle frame for `state`.
///
/// When `counter` is set, `iteration` is drawn right-aligned in the top-right corner.
pub fn compile_scene(
    geometry: &Geometry,
    state: &PuzzleState,
    iteration: u64,
    counter: bool,
) -> ScenePlan {
    let canvas = geometry.canvas();
    let mut ops = Vec::with_capacity(2 + PEG_COUNT * (1 + state.layers()) + 1);

    ops.push(DrawOp::FillRect {
        rect: kurbo::Rect::new(0.0, 0.0, geometry.width as f64, geometry.height as f64),
        paint: Paint::Solid(palette::BACKGROUND),
    });

    if counter {
        let inset = geometry.padding as f64;
        ops.push(DrawOp::Text {
            text: counter_label(iteration),
            anchor: kurbo::Point::new(geometry.width as f64 - inset, inset),
            align: TextAlign::End,
            baseline: TextBaseline::Hanging,
            color: palette::POLE,
        });
    }

    let gradient = disk_gradient(geometry);
    for peg in 0..PEG_COUNT {
        ops.push(DrawOp::StrokeLine {
            line: geometry.pole_line(peg),
            width: geometry.pole_width as f64,
            color: palette::POLE,
        });

        for (slot, &radius) in state.slots(peg).iter().enumerate() {
            if radius == 0 {
                continue;
            }
            ops.push(DrawOp::FillRoundedRect {
                shape: geometry.disk_shape(peg, slot, radius),
                paint: Paint::Vertical(gradient),
            });
        }
    }

    ops.push(DrawOp::FillRect {
        rect: geometry.ground_rect(),
        paint: Paint::Solid(palette::GROUND),
    });

    ScenePlan { canvas, ops }
}

/// Plan the counter-only overlay: background plus `iteration` centred.
pub fn compile_counter(canvas: Canvas, iteration: u64) -> ScenePlan {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    ScenePlan {
        canvas,
        ops: vec![
            DrawOp::FillRect {
                rect: kurbo::Rect::new(0.0, 0.0, w, h),
                paint: Paint::Solid(palette::BACKGROUND),
            },
            DrawOp::Text {
                text: counter_label(iteration),
                anchor: kurbo::Point::new(w / 2.0, h / 2.0),
                align: TextAlign::Center,
                baseline: TextBaseline::Middle,
                color: palette::POLE,
            },
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
