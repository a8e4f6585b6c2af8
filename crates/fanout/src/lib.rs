//! Radial pop-up menu core: arc placement, staggered keyframes and the
//! show/hide state machine, independent of any UI toolkit.

pub mod macros;

pub mod button;
pub mod controller;
pub mod geometry;
pub mod ipc;
pub mod keyframe;
pub mod layout;
pub mod scheduler;
pub mod stage;

pub use button::{ButtonContainer, ButtonId, ButtonTitle, MenuButton};
pub use controller::{MenuError, MenuState, RadialMenuController};
pub use geometry::{Point, Rect, Rotation, Size};
pub use keyframe::{AnimationBlock, BlockId, Easing, Keyframe, Phase, Pose};
pub use layout::ArcLayout;
pub use scheduler::{FrameScheduler, Scheduler};
pub use stage::{Sprite, Stage};
