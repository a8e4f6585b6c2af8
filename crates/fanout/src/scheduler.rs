//! Frame-driven animation scheduling.
//!
//! A scheduler holds at most one [`AnimationBlock`] at a time. The host calls
//! [`Scheduler::advance`] once per rendered frame with a monotonic timestamp;
//! the scheduler writes interpolated poses into the container and reports the
//! block's id on the frame it finishes.

use crate::button::ButtonContainer;
use crate::keyframe::{AnimationBlock, BlockId, Easing};

pub trait Scheduler {
    /// Takes ownership of `block`. Its clock starts on the next `advance`.
    fn start(&mut self, block: AnimationBlock);

    /// Moves the running block to `now` (seconds). Returns the block id once,
    /// on the frame the block completes.
    fn advance<C: ButtonContainer>(&mut self, now: f64, container: &mut C) -> Option<BlockId>;

    fn is_running(&self) -> bool;
}

#[derive(Debug)]
struct Running {
    block: AnimationBlock,
    started_at: Option<f64>,
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    easing: Easing,
    running: Option<Running>,
}

impl FrameScheduler {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            running: None,
        }
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Block progress in `[0, 1]` at `now`, or `None` when idle.
    pub fn progress(&self, now: f64) -> Option<f64> {
        let running = self.running.as_ref()?;
        let started = running.started_at.unwrap_or(now);
        Some(Self::block_progress(running.block.duration, now - started))
    }

    fn block_progress(duration: f64, elapsed: f64) -> f64 {
        if duration > 0.0 {
            (elapsed.max(0.0) / duration).min(1.0)
        } else {
            1.0
        }
    }
}

impl Scheduler for FrameScheduler {
    fn start(&mut self, block: AnimationBlock) {
        if let Some(previous) = &self.running {
            log::warn!(
                "{} replaced {} before it finished",
                block.id,
                previous.block.id
            );
        }
        self.running = Some(Running {
            block,
            started_at: None,
        });
    }

    fn advance<C: ButtonContainer>(&mut self, now: f64, container: &mut C) -> Option<BlockId> {
        let running = self.running.as_mut()?;
        let started = *running.started_at.get_or_insert(now);
        let progress = Self::block_progress(running.block.duration, now - started);

        for keyframe in &running.block.keyframes {
            let Some(local) = keyframe.local_progress(progress) else {
                continue;
            };
            let Some(button) = container.button_mut(keyframe.button) else {
                log::trace!("{} left the stage mid-animation", keyframe.button);
                continue;
            };
            keyframe
                .pose_at(self.easing.apply(local))
                .apply_to(button);
        }

        if progress < 1.0 {
            return None;
        }
        self.running.take().map(|r| r.block.id)
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}
