use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{HanoiError, HanoiResult};
use crate::render::geometry::Geometry;
use crate::sample::sampler::SampleSchedule;

/// Largest disk count whose move count `2^L - 1` fits in a `u64`.
pub const MAX_LAYERS: u32 = 63;

/// Run configuration.
///
/// Every field is optional on input; missing or malformed values take the defaults below.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HanoiConfig {
    /// Disk count `L`.
    pub layers: u32,
    /// Target video length in seconds.
    pub duration: u32,
    /// Target video frame rate.
    pub fps: u32,
    /// Linear pixel scale multiplier.
    pub scaling: u32,
    /// Leading iterations that are always rendered.
    pub force_first: u64,
    /// Trailing iterations that are always rendered.
    pub force_last: u64,
    /// Draw the iteration number on the main frame.
    pub counter_display: bool,
    /// Also emit a counter-only overlay frame.
    pub counter_render: bool,
    /// Counter font size in pixels before scaling.
    pub counter_size: u32,
    /// Counter font family name.
    pub counter_font: String,
}

impl Default for HanoiConfig {
    fn default() -> Self {
        Self {
            layers: 3,
            duration: 60,
            fps: 30,
            scaling: 1,
            force_first: 1,
            force_last: 1,
            counter_display: false,
            counter_render: false,
            counter_size: 50,
            counter_font: "Arial".to_string(),
        }
    }
}

impl HanoiConfig {
    /// Build a configuration from `key=value` tokens applied over the defaults.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::default();
        cfg.apply_pairs(pairs);
        cfg
    }

    /// Load a JSON configuration file. Absent fields take their defaults.
    pub fn from_json_file(path: &Path) -> HanoiResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(std::io::BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Apply `key=value` tokens in order; later tokens win.
    pub fn apply_pairs<I, S>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, "true"),
            };
            self.apply(key.trim(), value);
        }
    }

    /// Apply one option. Malformed values fall back to the option's default.
    pub fn apply(&mut self, key: &str, value: &str) {
        let defaults = Self::default();
        match key {
            "layers" => self.layers = positive_u32(value).unwrap_or(defaults.layers),
            "duration" => self.duration = positive_u32(value).unwrap_or(defaults.duration),
            "fps" => self.fps = positive_u32(value).unwrap_or(defaults.fps),
            "scaling" => self.scaling = positive_u32(value).unwrap_or(defaults.scaling),
            "forcefirst" | "force_first" => {
                self.force_first = lenient_u64(value).unwrap_or(defaults.force_first);
            }
            "forcelast" | "force_last" => {
                self.force_last = lenient_u64(value).unwrap_or(defaults.force_last);
            }
            "counter_display" => self.counter_display = value.trim().eq_ignore_ascii_case("true"),
            "counter_render" => self.counter_render = value.trim().eq_ignore_ascii_case("true"),
            "counter_size" => {
                self.counter_size = positive_u32(value).unwrap_or(defaults.counter_size);
            }
            "counter_font" => {
                let v = value.trim();
                self.counter_font = if v.is_empty() {
                    defaults.counter_font
                } else {
                    v.to_string()
                };
            }
            _ => tracing::warn!(key, "ignoring unknown option"),
        }
    }

    /// Reject values the engine cannot represent.
    pub fn validate(&self) -> HanoiResult<()> {
        if self.layers == 0 || self.layers > MAX_LAYERS {
            return Err(HanoiError::validation(format!(
                "layers must be within 1..={MAX_LAYERS}, got {}",
                self.layers
            )));
        }
        if self.duration == 0 || self.fps == 0 {
            return Err(HanoiError::validation("duration and fps must be > 0"));
        }
        if self.scaling == 0 {
            return Err(HanoiError::validation("scaling must be > 0"));
        }
        if self.counter_size == 0 {
            return Err(HanoiError::validation("counter_size must be > 0"));
        }

        let canvas = Geometry::new(self.layers, self.scaling).canvas();
        if canvas.as_u16().is_none() {
            return Err(HanoiError::validation(format!(
                "canvas {}x{} exceeds the {}px surface limit; lower layers or scaling",
                canvas.width,
                canvas.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Total move count `2^L - 1`.
    pub fn total_moves(&self) -> u64 {
        total_moves(self.layers)
    }

    /// Natural frame budget `duration * fps`.
    pub fn natural_frames(&self) -> u64 {
        u64::from(self.duration) * u64::from(self.fps)
    }

    /// Frame-selection inputs derived from this configuration.
    pub fn schedule(&self) -> SampleSchedule {
        SampleSchedule {
            total_moves: self.total_moves(),
            natural_frames: self.natural_frames(),
            force_first: self.force_first,
            force_last: self.force_last,
        }
    }

    /// Counter font size after scaling.
    pub fn counter_px(&self) -> u32 {
        self.counter_size.saturating_mul(self.scaling)
    }

    /// Whether any text is drawn, and therefore a font must be resolved.
    pub fn needs_font(&self) -> bool {
        self.counter_display || self.counter_render
    }
}

/// Move count for `layers` disks, saturating at `u64::MAX`.
pub fn total_moves(layers: u32) -> u64 {
    if layers >= 64 {
        u64::MAX
    } else {
        (1u64 << layers) - 1
    }
}

/// Leading decimal digits of `value` (an optional `+` allowed), ignoring any trailing text.
fn lenient_u64(value: &str) -> Option<u64> {
    let v = value.trim_start();
    let v = v.strip_prefix('+').unwrap_or(v);
    let end = v
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(v.len());
    v[..end].parse::<u64>().ok()
}

fn positive_u32(value: &str) -> Option<u32> {
    lenient_u64(value)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|&v| v > 0)
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
