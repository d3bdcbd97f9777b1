use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    encode::png::write_png,
    foundation::{
        core::{Canvas, FrameIndex},
        error::{HanoiError, HanoiResult},
    },
    render::backend::FrameRGBA,
    sample::sampler::Trigger,
};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Main frame size.
    pub scene: Canvas,
    /// Counter overlay size, when overlays are emitted.
    pub counter: Option<Canvas>,
    /// Total moves of the run.
    pub total_moves: u64,
}

/// One emitted frame: the main scene plus an optional counter overlay sharing its index.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    /// Output index.
    pub index: FrameIndex,
    /// Rendered puzzle iteration.
    pub iteration: u64,
    /// Emission reason.
    pub trigger: Trigger,
    /// Main scene pixels.
    pub scene: FrameRGBA,
    /// Counter overlay pixels.
    pub counter: Option<FrameRGBA>,
}

/// Sink contract for consuming emitted frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> HanoiResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, frame: RenderedFrame) -> HanoiResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> HanoiResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<RenderedFrame>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> HanoiResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: RenderedFrame) -> HanoiResult<()> {
        self.frames.push(frame);
        Ok(())
    }

    fn end(&mut self) -> HanoiResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Output directory layout of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    /// Main frames (`hanoi_<n>.png`).
    pub frames_dir: PathBuf,
    /// Counter overlay frames (`counter_<n>.png`).
    pub counter_dir: PathBuf,
    /// Reserved for an encoded video produced by external tooling.
    pub video_dir: PathBuf,
}

impl OutputLayout {
    /// Standard layout below `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            frames_dir: root.join("hanoi_imgs"),
            counter_dir: root.join("counter_imgs"),
            video_dir: root.join("video_out"),
        }
    }

    /// Create every directory that does not exist yet.
    pub fn ensure(&self) -> HanoiResult<()> {
        for dir in [&self.frames_dir, &self.counter_dir, &self.video_dir] {
            if let Some(parent) = dir.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("create output root '{}'", parent.display())
                })?;
            }
            create_dir_if_absent(dir)?;
        }
        Ok(())
    }

    /// Path of main frame `index`.
    pub fn frame_path(&self, index: FrameIndex) -> PathBuf {
        self.frames_dir.join(format!("hanoi_{}.png", index.0))
    }

    /// Path of counter overlay frame `index`.
    pub fn counter_path(&self, index: FrameIndex) -> PathBuf {
        self.counter_dir.join(format!("counter_{}.png", index.0))
    }
}

fn create_dir_if_absent(dir: &Path) -> HanoiResult<()> {
    match std::fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(HanoiError::from(
            anyhow::Error::new(e).context(format!("create directory '{}'", dir.display())),
        )),
    }
}

/// Encoding parallelism for [`PngDirSink`].
#[derive(Clone, Debug)]
pub struct PngEncodeThreading {
    /// Encode chunks of frames on a thread pool.
    pub parallel: bool,
    /// Frames buffered per parallel chunk.
    pub chunk_size: usize,
    /// Worker count; `None` uses the rayon default.
    pub threads: Option<usize>,
}

impl Default for PngEncodeThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Writes frames as numbered PNG files into an [`OutputLayout`].
pub struct PngDirSink {
    layout: OutputLayout,
    threading: PngEncodeThreading,
    pool: Option<rayon::ThreadPool>,
    pending: Vec<RenderedFrame>,
    written: u64,
}

impl PngDirSink {
    /// Sink writing into `layout`. Directories are created in `begin`.
    pub fn new(layout: OutputLayout, threading: PngEncodeThreading) -> HanoiResult<Self> {
        let pool = if threading.parallel {
            Some(build_thread_pool(threading.threads)?)
        } else {
            None
        };
        Ok(Self {
            layout,
            threading,
            pool,
            pending: Vec::new(),
            written: 0,
        })
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.written
    }

    fn flush(&mut self) -> HanoiResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let chunk = std::mem::take(&mut self.pending);
        let layout = &self.layout;
        let results = match &self.pool {
            Some(pool) => pool.install(|| {
                chunk
                    .par_iter()
                    .map(|frame| write_frame(layout, frame))
                    .collect::<Vec<_>>()
            }),
            None => chunk.iter().map(|frame| write_frame(layout, frame)).collect(),
        };
        for r in results {
            r?;
        }
        self.written += chunk.len() as u64;
        Ok(())
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> HanoiResult<()> {
        self.layout.ensure()
    }

    fn push_frame(&mut self, frame: RenderedFrame) -> HanoiResult<()> {
        if self.pool.is_none() {
            write_frame(&self.layout, &frame)?;
            self.written += 1;
            return Ok(());
        }
        self.pending.push(frame);
        if self.pending.len() >= self.threading.chunk_size.max(1) {
            self.flush()?;
        }
        Ok(())
    }

    fn end(&mut self) -> HanoiResult<()> {
        self.flush()
    }
}

fn write_frame(layout: &OutputLayout, frame: &RenderedFrame) -> HanoiResult<()> {
    write_png(&layout.frame_path(frame.index), &frame.scene)?;
    if let Some(counter) = &frame.counter {
        write_png(&layout.counter_path(frame.index), counter)?;
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> HanoiResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(HanoiError::validation(
            "encode threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| HanoiError::encode(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
