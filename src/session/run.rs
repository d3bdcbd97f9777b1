use std::time::{Duration, Instant};

use anyhow::Context as _;

use crate::{
    config::options::HanoiConfig,
    encode::sink::{FrameSink, RenderedFrame, SinkConfig},
    foundation::{
        core::Canvas,
        error::{HanoiError, HanoiResult},
    },
    puzzle::{solver::solve, state::PuzzleState},
    render::{
        cpu::CpuRenderer,
        geometry::Geometry,
        plan::{compile_counter, compile_scene},
        text::{CounterFont, FontSource, TextLayoutEngine},
    },
    sample::sampler::{Emission, FramePlan, FrameSampler, Trigger, plan_schedule},
};

/// A progress line is logged for every frame index divisible by this value.
pub const PROGRESS_EVERY: u64 = 100;

/// Summary of a completed run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunStats {
    /// Moves performed (`2^L - 1`).
    pub moves: u64,
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Frames emitted only because of a forced window.
    pub forced: u64,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Elapsed seconds extrapolated to 100% puzzle completion.
    pub extrapolated_secs: f64,
}

/// One configured rendering run: geometry, renderer and counter overlay size are resolved up
/// front, puzzle state and sampler are fresh for every [`HanoiSession::run`].
pub struct HanoiSession {
    config: HanoiConfig,
    geometry: Geometry,
    renderer: CpuRenderer,
    counter_canvas: Option<Canvas>,
}

impl HanoiSession {
    /// Validate `config` and prepare the renderer. The font is only resolved when a counter
    /// is drawn.
    pub fn new(config: HanoiConfig, font: FontSource) -> HanoiResult<Self> {
        config.validate()?;

        let geometry = Geometry::new(config.layers, config.scaling);
        tracing::debug!(
            width = geometry.width,
            height = geometry.height,
            max_radius = geometry.max_radius,
            "scene geometry"
        );

        let mut renderer = if config.needs_font() {
            let font = CounterFont::load(&font)?;
            CpuRenderer::with_text(TextLayoutEngine::new(&font, config.counter_px() as f32)?)
        } else {
            CpuRenderer::new()
        };

        let counter_canvas = if config.counter_render {
            let canvas = renderer.counter_canvas(config.total_moves())?;
            tracing::debug!(
                width = canvas.width,
                height = canvas.height,
                "counter overlay size"
            );
            Some(canvas)
        } else {
            None
        };

        Ok(Self {
            config,
            geometry,
            renderer,
            counter_canvas,
        })
    }

    /// Resolved configuration.
    pub fn config(&self) -> &HanoiConfig {
        &self.config
    }

    /// Scene geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Counter overlay size, when `counter_render` is set.
    pub fn counter_canvas(&self) -> Option<Canvas> {
        self.counter_canvas
    }

    /// Render the initial state and every move, pushing sampled frames into `sink`.
    #[tracing::instrument(
        skip_all,
        fields(layers = self.config.layers, scaling = self.config.scaling)
    )]
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> HanoiResult<RunStats> {
        let started = Instant::now();
        let dump = serde_json::to_string(&self.config).context("serialize configuration")?;
        tracing::info!(config = %dump, "starting run");

        let total = self.config.total_moves();
        sink.begin(SinkConfig {
            scene: self.geometry.canvas(),
            counter: self.counter_canvas,
            total_moves: total,
        })?;

        let mut state = PuzzleState::new(self.config.layers as usize);
        let mut sampler = FrameSampler::new(self.config.schedule());
        let mut forced = 0u64;
        let mut iteration = 0u64;

        if let Some(emission) = sampler.observe(iteration) {
            forced += self.emit(&state, emission, sink)?;
        }
        for mv in solve(self.config.layers) {
            state.apply(mv.origin, mv.destination).ok_or_else(|| {
                HanoiError::from(anyhow::anyhow!(
                    "move {} takes from empty peg {}",
                    iteration + 1,
                    mv.origin
                ))
            })?;
            iteration += 1;
            if let Some(emission) = sampler.observe(iteration) {
                forced += self.emit(&state, emission, sink)?;
            }
        }

        sink.end()?;

        let elapsed = started.elapsed();
        let done = if total == 0 {
            1.0
        } else {
            iteration as f64 / total as f64
        };
        let stats = RunStats {
            moves: iteration,
            frames: sampler.frames_emitted(),
            forced,
            elapsed,
            extrapolated_secs: elapsed.as_secs_f64() / done,
        };
        tracing::info!(
            seconds = stats.extrapolated_secs.floor() as u64,
            frames = stats.frames,
            forced = stats.forced,
            moves = stats.moves,
            "finished"
        );
        Ok(stats)
    }

    /// Render one sampled frame and hand it to `sink`. Returns 1 for a forced emission.
    fn emit(
        &mut self,
        state: &PuzzleState,
        emission: Emission,
        sink: &mut dyn FrameSink,
    ) -> HanoiResult<u64> {
        let plan = compile_scene(
            &self.geometry,
            state,
            emission.iteration,
            self.config.counter_display,
        );
        let scene = self.renderer.render(&plan)?;
        let counter = match self.counter_canvas {
            Some(canvas) => Some(
                self.renderer
                    .render(&compile_counter(canvas, emission.iteration))?,
            ),
            None => None,
        };

        sink.push_frame(RenderedFrame {
            index: emission.frame,
            iteration: emission.iteration,
            trigger: emission.trigger,
            scene,
            counter,
        })?;

        if emission.frame.0 % PROGRESS_EVERY == 0 {
            tracing::info!(
                frame = emission.frame.0,
                percent = completion_percent(emission.iteration, self.config.total_moves()),
                iteration = emission.iteration,
                "rendered frame"
            );
        }
        Ok(u64::from(emission.trigger == Trigger::Forced))
    }
}

/// `floor(iteration / total * 100)`.
pub fn completion_percent(iteration: u64, total: u64) -> u64 {
    if total == 0 {
        return 100;
    }
    (u128::from(iteration) * 100 / u128::from(total)) as u64
}

/// Frames a run with `config` would emit, computed without rendering.
pub fn plan_frames(config: &HanoiConfig) -> HanoiResult<FramePlan> {
    config.validate()?;
    Ok(plan_schedule(config.schedule()))
}

#[cfg(test)]
#[path = "../../tests/unit/session/run.rs"]
mod tests;
