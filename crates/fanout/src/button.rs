use crate::geometry::{Point, Rect, Rotation};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Handle to a button owned by a [`ButtonContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("#{_0}")]
pub struct ButtonId(u64);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ButtonTitle(String);

crate::string_newtype!(ButtonTitle);

/// Anything the menu can place, fade and spin.
pub trait MenuButton {
    fn new(title: ButtonTitle, frame: Rect) -> Self
    where
        Self: Sized;

    fn frame(&self) -> Rect;
    fn set_frame(&mut self, frame: Rect);

    fn opacity(&self) -> f64;
    fn set_opacity(&mut self, opacity: f64);

    fn rotation(&self) -> Rotation;
    fn set_rotation(&mut self, rotation: Rotation);

    fn center(&self) -> Point {
        self.frame().center()
    }

    fn set_center(&mut self, center: Point) {
        let frame = self.frame().with_center(center);
        self.set_frame(frame);
    }
}

/// Owns buttons and keeps them in back-to-front order.
pub trait ButtonContainer {
    type Button: MenuButton;

    /// Inserts `button` directly behind `sibling`. Returns `None` (dropping
    /// the button) when `sibling` is not in the container.
    fn insert_below(&mut self, button: Self::Button, sibling: ButtonId) -> Option<ButtonId>;

    fn remove(&mut self, id: ButtonId) -> Option<Self::Button>;

    fn button(&self, id: ButtonId) -> Option<&Self::Button>;

    fn button_mut(&mut self, id: ButtonId) -> Option<&mut Self::Button>;
}
