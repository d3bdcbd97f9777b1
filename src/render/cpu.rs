use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    foundation::{
        core::{Canvas, Rgba8},
        error::{HanoiError, HanoiResult},
        format::counter_label,
    },
    render::{
        backend::FrameRGBA,
        plan::{DrawOp, Paint, ScenePlan, TextAlign, TextBaseline, VerticalGradient},
        text::{TextBrush, TextLayoutEngine, layout_metrics},
    },
};

/// Pixel padding added to the measured counter label on each overlay axis.
pub const COUNTER_BLEED_PX: u32 = 2;

/// CPU rasterizer executing [`ScenePlan`]s with `vello_cpu`.
///
/// Surfaces are allocated once per distinct canvas size and reused across frames.
pub struct CpuRenderer {
    text: Option<TextLayoutEngine>,
    surfaces: HashMap<Canvas, CpuSurface>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    width: u32,
    top: i64,
    rows: u32,
    start: Rgba8,
    end: Rgba8,
}

impl CpuRenderer {
    /// Renderer without text support; plans containing text ops fail.
    pub fn new() -> Self {
        Self {
            text: None,
            surfaces: HashMap::new(),
            gradient_cache: HashMap::new(),
        }
    }

    /// Renderer drawing text with `engine`.
    pub fn with_text(engine: TextLayoutEngine) -> Self {
        Self {
            text: Some(engine),
            ..Self::new()
        }
    }

    /// Whether a text engine is attached.
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Overlay size fitting every counter value up to `max_iteration`: the measured advance
    /// width of its label and the text size, each plus [`COUNTER_BLEED_PX`].
    pub fn counter_canvas(&mut self, max_iteration: u64) -> HanoiResult<Canvas> {
        let engine = self
            .text
            .as_mut()
            .ok_or_else(|| HanoiError::render("counter overlay requires a font"))?;
        let metrics = engine.measure(&counter_label(max_iteration));
        let canvas = Canvas {
            width: metrics.width.max(0.0).ceil() as u32 + COUNTER_BLEED_PX,
            height: engine.size_px().round() as u32 + COUNTER_BLEED_PX,
        };
        if canvas.as_u16().is_none() {
            return Err(HanoiError::validation(format!(
                "counter overlay {}x{} exceeds the {}px surface limit",
                canvas.width,
                canvas.height,
                u16::MAX
            )));
        }
        Ok(canvas)
    }

    /// Rasterize `plan` into its surface and return a copy of the pixels.
    pub fn render(&mut self, plan: &ScenePlan) -> HanoiResult<FrameRGBA> {
        let (width, height) = plan.canvas.as_u16().ok_or_else(|| {
            HanoiError::render(format!(
                "surface {}x{} exceeds u16",
                plan.canvas.width, plan.canvas.height
            ))
        })?;

        let mut surface = self.surfaces.remove(&plan.canvas).unwrap_or_else(|| CpuSurface {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        });

        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        let result = plan
            .ops
            .iter()
            .try_for_each(|op| self.draw_op(&mut ctx, plan.canvas, op));
        if result.is_ok() {
            ctx.flush();
            ctx.render_to_pixmap(&mut surface.pixmap);
        }
        let frame = FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        self.surfaces.insert(plan.canvas, surface);
        result.map(|()| frame)
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        canvas: Canvas,
        op: &DrawOp,
    ) -> HanoiResult<()> {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::FillRect { rect, paint } => {
                self.set_paint(ctx, canvas, paint)?;
                ctx.fill_rect(&rect_to_cpu(*rect));
                Ok(())
            }
            DrawOp::StrokeLine { line, width, color } => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.set_stroke(
                    vello_cpu::kurbo::Stroke::new(*width).with_caps(vello_cpu::kurbo::Cap::Round),
                );
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(line.p0));
                path.line_to(point_to_cpu(line.p1));
                ctx.stroke_path(&path);
                Ok(())
            }
            DrawOp::FillRoundedRect { shape, paint } => {
                self.set_paint(ctx, canvas, paint)?;
                let path = kurbo::Shape::to_path(shape, 0.1);
                ctx.fill_path(&bezpath_to_cpu(&path));
                Ok(())
            }
            DrawOp::Text {
                text,
                anchor,
                align,
                baseline,
                color,
            } => {
                let engine = self
                    .text
                    .as_mut()
                    .ok_or_else(|| HanoiError::render("text op requires a font"))?;
                let brush = TextBrush {
                    r: color.r,
                    g: color.g,
                    b: color.b,
                    a: color.a,
                };
                let layout = engine.layout(text, brush);
                let m = layout_metrics(&layout);

                let x0 = match align {
                    TextAlign::End => anchor.x - f64::from(m.width),
                    TextAlign::Center => anchor.x - f64::from(m.width) / 2.0,
                };
                let y0 = match baseline {
                    TextBaseline::Hanging => anchor.y - f64::from(m.baseline - m.ascent),
                    TextBaseline::Middle => {
                        anchor.y - f64::from(m.baseline - (m.ascent - m.descent) / 2.0)
                    }
                };
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((x0, y0)));

                let font = engine.font_data();
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
                Ok(())
            }
        }
    }

    fn set_paint(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        canvas: Canvas,
        paint: &Paint,
    ) -> HanoiResult<()> {
        match paint {
            Paint::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
            Paint::Vertical(g) => {
                let (image, top) = self.gradient_paint(canvas.width, g)?;
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::translate((0.0, top)));
                ctx.set_paint(image);
            }
        }
        Ok(())
    }

    /// Rasterize `g` into a `width`-wide strip covering its span; rows beyond the strip are
    /// padded by the sampler. Returns the paint and the strip's top y.
    fn gradient_paint(
        &mut self,
        width: u32,
        g: &VerticalGradient,
    ) -> HanoiResult<(vello_cpu::Image, f64)> {
        let top = g.y_start.min(g.y_end).floor();
        let bottom = g.y_start.max(g.y_end).ceil();
        let rows = ((bottom - top) as u32).max(1);
        let key = GradientKey {
            width,
            top: top as i64,
            rows,
            start: g.start,
            end: g.end,
        };
        if let Some(img) = self.gradient_cache.get(&key) {
            return Ok((img.clone(), top));
        }

        let w: u16 = width
            .try_into()
            .map_err(|_| HanoiError::render("gradient width exceeds u16"))?;
        let h: u16 = rows
            .try_into()
            .map_err(|_| HanoiError::render("gradient height exceeds u16"))?;

        let mut pixels = Vec::with_capacity(width as usize * rows as usize);
        for row in 0..rows {
            let c = g.color_at(top + f64::from(row) + 0.5);
            let px = vello_cpu::peniko::color::PremulRgba8 {
                r: c.r,
                g: c.g,
                b: c.b,
                a: c.a,
            };
            pixels.extend(std::iter::repeat_n(px, width as usize));
        }
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, false);
        let image = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.gradient_cache.insert(key, image.clone());
        Ok((image, top))
    }
}

impl Default for CpuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
