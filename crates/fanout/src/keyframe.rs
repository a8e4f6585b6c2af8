use crate::button::{ButtonId, MenuButton};
use crate::geometry::{Point, Rotation};
use derive_more::{Display, From, Into};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Easing {
    Linear,
    #[default]
    #[strum(to_string = "cubic", serialize = "ease-in-out")]
    Cubic,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` onto the curve. Both ends are fixed points.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Cubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum Phase {
    Show,
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("block {_0}")]
pub struct BlockId(u64);

impl BlockId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// The animatable properties of one button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub origin: Point,
    pub opacity: f64,
    pub rotation: Rotation,
}

impl Pose {
    pub fn of<B: MenuButton>(button: &B) -> Self {
        Self {
            origin: button.frame().origin,
            opacity: button.opacity(),
            rotation: button.rotation(),
        }
    }

    pub fn apply_to<B: MenuButton>(&self, button: &mut B) {
        let frame = button.frame().with_origin(self.origin);
        button.set_frame(frame);
        button.set_opacity(self.opacity);
        button.set_rotation(self.rotation);
    }
}

/// Start offset and span of the `order`-th of `count` staggered keyframes,
/// both as fractions of the whole block.
///
/// Starts step evenly by `1 / count`; every keyframe runs to the end of the block.
pub fn stagger(order: usize, count: usize) -> (f64, f64) {
    if count == 0 {
        return (0.0, 1.0);
    }
    let start = order as f64 / count as f64;
    (start, 1.0 - start)
}

/// One button's slice of an animation block.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub button: ButtonId,
    /// Relative start time within the block, `0..1`.
    pub start: f64,
    /// Relative duration within the block.
    pub span: f64,
    pub from: Pose,
    pub to: Pose,
    /// Degrees swept between `from.rotation` and `to.rotation`.
    pub turn: f64,
}

impl Keyframe {
    pub fn staggered(
        button: ButtonId,
        order: usize,
        count: usize,
        from: Pose,
        to: Pose,
        turn: f64,
    ) -> Self {
        let (start, span) = stagger(order, count);
        Self {
            button,
            start,
            span,
            from,
            to,
            turn,
        }
    }

    pub fn start_offset(&self, block_duration: f64) -> f64 {
        self.start * block_duration
    }

    /// Local progress at block progress `t`, or `None` before the keyframe begins.
    pub fn local_progress(&self, t: f64) -> Option<f64> {
        if t < self.start {
            return None;
        }
        if self.span <= 0.0 {
            return Some(1.0);
        }
        Some(((t - self.start) / self.span).min(1.0))
    }

    /// Pose at local progress `t`. At `t >= 1` this is exactly `to`.
    pub fn pose_at(&self, t: f64) -> Pose {
        if t >= 1.0 {
            return self.to;
        }
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Pose {
            origin: Point::new(
                lerp(self.from.origin.x, self.to.origin.x),
                lerp(self.from.origin.y, self.to.origin.y),
            ),
            opacity: lerp(self.from.opacity, self.to.opacity),
            rotation: self.from.rotation.rotated(self.turn * t),
        }
    }
}

/// One show or hide: a total duration split into staggered keyframes.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationBlock {
    pub id: BlockId,
    pub phase: Phase,
    /// Seconds.
    pub duration: f64,
    pub keyframes: Vec<Keyframe>,
}

impl AnimationBlock {
    /// Buttons in the order their keyframes begin.
    pub fn start_order(&self) -> Vec<ButtonId> {
        let mut frames: Vec<&Keyframe> = self.keyframes.iter().collect();
        frames.sort_by(|a, b| a.start.total_cmp(&b.start));
        frames.into_iter().map(|k| k.button).collect()
    }
}
