use crate::button::{ButtonContainer, ButtonId, ButtonTitle, MenuButton};
use crate::geometry::{Rect, Rotation};

/// Plain button state: a titled box with opacity and rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub title: ButtonTitle,
    pub frame: Rect,
    pub opacity: f64,
    pub rotation: Rotation,
}

impl MenuButton for Sprite {
    fn new(title: ButtonTitle, frame: Rect) -> Self {
        Self {
            title,
            frame,
            opacity: 1.0,
            rotation: Rotation::IDENTITY,
        }
    }

    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }
}

/// Z-ordered button container. Index 0 is drawn first (furthest back).
#[derive(Debug, Clone)]
pub struct Stage<B = Sprite> {
    layers: Vec<(ButtonId, B)>,
    next_id: u64,
}

impl<B> Default for Stage<B> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<B: MenuButton> Stage<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `button` in front of everything already on stage.
    pub fn push(&mut self, button: B) -> ButtonId {
        let id = self.allocate_id();
        self.layers.push((id, button));
        id
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Back-to-front iteration, the order buttons should be painted in.
    pub fn iter(&self) -> impl Iterator<Item = (ButtonId, &B)> {
        self.layers.iter().map(|(id, b)| (*id, b))
    }

    pub fn z_index(&self, id: ButtonId) -> Option<usize> {
        self.layers.iter().position(|(i, _)| *i == id)
    }

    fn allocate_id(&mut self) -> ButtonId {
        let id = ButtonId::from(self.next_id);
        self.next_id += 1;
        id
    }
}

impl<B: MenuButton> ButtonContainer for Stage<B> {
    type Button = B;

    fn insert_below(&mut self, button: B, sibling: ButtonId) -> Option<ButtonId> {
        let at = self.z_index(sibling)?;
        let id = self.allocate_id();
        self.layers.insert(at, (id, button));
        Some(id)
    }

    fn remove(&mut self, id: ButtonId) -> Option<B> {
        let at = self.z_index(id)?;
        Some(self.layers.remove(at).1)
    }

    fn button(&self, id: ButtonId) -> Option<&B> {
        self.layers.iter().find(|(i, _)| *i == id).map(|(_, b)| b)
    }

    fn button_mut(&mut self, id: ButtonId) -> Option<&mut B> {
        self.layers
            .iter_mut()
            .find(|(i, _)| *i == id)
            .map(|(_, b)| b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(title: &str) -> Sprite {
        Sprite::new(ButtonTitle::new(title), Rect::square(10.0))
    }

    #[test]
    fn test_insert_below_keeps_sibling_in_front() {
        let mut stage = Stage::new();
        let main = stage.push(sprite("main"));
        let first = stage.insert_below(sprite("1"), main).unwrap();
        let second = stage.insert_below(sprite("2"), main).unwrap();

        let order: Vec<ButtonId> = stage.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![first, second, main]);
    }

    #[test]
    fn test_insert_below_missing_sibling() {
        let mut stage: Stage = Stage::new();
        let ghost = ButtonId::from(42);
        assert!(stage.insert_below(sprite("1"), ghost).is_none());
        assert!(stage.is_empty());
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut stage = Stage::new();
        let a = stage.push(sprite("a"));
        assert_eq!(stage.remove(a).map(|s| s.title), Some(ButtonTitle::new("a")));

        let b = stage.push(sprite("b"));
        assert_ne!(a, b);
        assert!(stage.button(a).is_none());
        assert_eq!(stage.len(), 1);
    }
}
