use crate::foundation::core::FrameIndex;

/// Inputs of the frame-selection policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SampleSchedule {
    /// Total moves `T`.
    pub total_moves: u64,
    /// Natural frame budget `N`.
    pub natural_frames: u64,
    /// Iterations `0..force_first` are always emitted.
    pub force_first: u64,
    /// The last `force_last` iterations (up to and including `T`) are always emitted.
    pub force_last: u64,
}

impl SampleSchedule {
    /// Natural schedule slot of `iteration`: `ceil(iteration * N / T)`.
    ///
    /// Computed in exact integer arithmetic so that `iteration == T` lands on slot `N`.
    pub fn slot(&self, iteration: u64) -> u64 {
        if self.total_moves == 0 {
            return 0;
        }
        let num = u128::from(iteration) * u128::from(self.natural_frames);
        let den = u128::from(self.total_moves);
        num.div_ceil(den) as u64
    }

    /// Whether `iteration` falls inside the leading or trailing forced window.
    pub fn is_forced(&self, iteration: u64) -> bool {
        iteration < self.force_first
            || iteration.saturating_add(self.force_last) > self.total_moves
    }
}

/// Why a frame was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Trigger {
    /// A new natural schedule slot was reached.
    Natural,
    /// The iteration is within a forced window and its slot was already used.
    Forced,
}

/// Decision to emit one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Emission {
    /// Output frame index the iteration is written under.
    pub frame: FrameIndex,
    /// Puzzle iteration that is rendered.
    pub iteration: u64,
    /// Emission reason.
    pub trigger: Trigger,
}

/// Stateful sampler deciding, once per iteration, whether a frame is emitted.
#[derive(Clone, Debug)]
pub struct FrameSampler {
    schedule: SampleSchedule,
    last_slot: u64,
    next_frame: FrameIndex,
}

impl FrameSampler {
    /// Fresh sampler: no frames emitted, last slot `0`.
    pub fn new(schedule: SampleSchedule) -> Self {
        Self {
            schedule,
            last_slot: 0,
            next_frame: FrameIndex(0),
        }
    }

    /// Policy inputs.
    pub fn schedule(&self) -> &SampleSchedule {
        &self.schedule
    }

    /// Number of frames emitted so far.
    pub fn frames_emitted(&self) -> u64 {
        self.next_frame.0
    }

    /// Evaluate the policy for `iteration`. On emission the frame counter advances and the
    /// slot marker moves to this iteration's slot.
    pub fn observe(&mut self, iteration: u64) -> Option<Emission> {
        let slot = self.schedule.slot(iteration);
        let trigger = if slot != self.last_slot {
            Trigger::Natural
        } else if self.schedule.is_forced(iteration) {
            Trigger::Forced
        } else {
            return None;
        };

        let frame = self.next_frame;
        self.next_frame = frame.next();
        self.last_slot = slot;
        Some(Emission {
            frame,
            iteration,
            trigger,
        })
    }
}

/// Outcome of running the sampler over every iteration without rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FramePlan {
    /// Iterations evaluated (`T + 1`, including the initial state).
    pub iterations: u64,
    /// Frames emitted.
    pub frames: u64,
    /// Frames emitted through the natural trigger.
    pub natural: u64,
    /// Frames emitted only because of a forced window.
    pub forced: u64,
}

/// Count emissions for iterations `0..=T`.
pub fn plan_schedule(schedule: SampleSchedule) -> FramePlan {
    let mut sampler = FrameSampler::new(schedule);
    let mut plan = FramePlan::default();
    for iteration in 0..=schedule.total_moves {
        plan.iterations += 1;
        match sampler.observe(iteration).map(|e| e.trigger) {
            Some(Trigger::Natural) => plan.natural += 1,
            Some(Trigger::Forced) => plan.forced += 1,
            None => {}
        }
    }
    plan.frames = plan.natural + plan.forced;
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/sample/sampler.rs"]
mod tests;
