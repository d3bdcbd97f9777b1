//! hanoi-frames renders the classic Tower of Hanoi solution as a numbered PNG frame sequence.
//!
//! # Pipeline overview
//!
//! 1. **Solve**: `solve(L)` lazily yields the `2^L - 1` moves that carry the stack from peg 0
//!    to peg 2.
//! 2. **Sample**: `FrameSampler` decides per iteration whether a frame is emitted, spreading
//!    `duration * fps` frames evenly over the moves and always keeping the forced leading and
//!    trailing iterations.
//! 3. **Compile**: `PuzzleState -> ScenePlan` (ordered draw ops over `kurbo` shapes).
//! 4. **Render**: `ScenePlan -> FrameRGBA` on the CPU with `vello_cpu`.
//! 5. **Write**: a `FrameSink` receives the frames; `PngDirSink` writes `hanoi_<n>.png` and
//!    `counter_<n>.png`.
//!
//! `HanoiSession` drives the whole sequence.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config {
    pub mod options;
}
mod encode {
    pub mod png;
    pub mod sink;
}
mod foundation {
    pub mod core;
    pub mod error;
    pub mod format;
}
mod puzzle {
    pub mod solver;
    pub mod state;
}
mod render {
    pub mod backend;
    pub mod cpu;
    pub mod geometry;
    pub mod plan;
    pub mod text;
}
mod sample {
    pub mod sampler;
}
mod session {
    pub mod run;
}

pub use config::options::{HanoiConfig, MAX_LAYERS, total_moves};
pub use encode::png::{encode_png, write_png};
pub use encode::sink::{
    FrameSink, InMemorySink, OutputLayout, PngDirSink, PngEncodeThreading, RenderedFrame,
    SinkConfig,
};
pub use foundation::core::{Canvas, FrameIndex, Rgba8, palette};
pub use foundation::error::{HanoiError, HanoiResult};
pub use foundation::format::{THOUSANDS_SEPARATOR, counter_label, group_thousands};
pub use puzzle::solver::{Move, Moves, solve, spare_peg};
pub use puzzle::state::{PEG_COUNT, PuzzleState, disk_radius};
pub use render::backend::FrameRGBA;
pub use render::cpu::{COUNTER_BLEED_PX, CpuRenderer};
pub use render::geometry::Geometry;
pub use render::plan::{
    DrawOp, Paint, ScenePlan, TextAlign, TextBaseline, VerticalGradient, compile_counter,
    compile_scene, disk_gradient,
};
pub use render::text::{
    CounterFont, FontSource, TextBrush, TextLayoutEngine, TextMetrics, layout_metrics,
};
pub use sample::sampler::{
    Emission, FramePlan, FrameSampler, SampleSchedule, Trigger, plan_schedule,
};
pub use session::run::{
    HanoiSession, PROGRESS_EVERY, RunStats, completion_percent, plan_frames,
};
