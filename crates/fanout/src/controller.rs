use crate::button::{ButtonContainer, ButtonId, ButtonTitle, MenuButton};
use crate::geometry::{HALF_TURN, Point, Rect, Rotation};
use crate::keyframe::{AnimationBlock, BlockId, Keyframe, Phase, Pose};
use crate::layout::ArcLayout;
use crate::scheduler::Scheduler;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum MenuState {
    #[default]
    Hidden,
    Shown,
}

impl Phase {
    fn settles_to(self) -> MenuState {
        match self {
            Phase::Show => MenuState::Shown,
            Phase::Hide => MenuState::Hidden,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MenuError {
    #[error("A radial menu needs at least one sub-button")]
    EmptyMenu,
    #[error("Button size must be a positive number, got {0}")]
    InvalidButtonSize(f64),
    #[error("Cannot rearrange buttons while an animation is running")]
    Animating,
    #[error("Main button {0} is not in the container")]
    MissingMainButton(ButtonId),
}

/// Drives a main button and its ring of sub-buttons through show and hide.
///
/// At most one animation block is in flight. `show` and `hide` called while
/// one is running are dropped, not queued.
pub struct RadialMenuController<C: ButtonContainer, S: Scheduler> {
    container: C,
    scheduler: S,
    main_button: ButtonId,
    sub_buttons: Vec<ButtonId>,
    layout: ArcLayout,
    hide_duration: f64,
    state: MenuState,
    in_flight: Option<(BlockId, Phase)>,
    last_block: BlockId,
}

impl<C: ButtonContainer, S: Scheduler> RadialMenuController<C, S> {
    pub fn new(container: C, scheduler: S, main_button: ButtonId, layout: ArcLayout) -> Self {
        Self {
            container,
            scheduler,
            main_button,
            sub_buttons: Vec::new(),
            hide_duration: layout.clamped_duration(),
            layout,
            state: MenuState::Hidden,
            in_flight: None,
            last_block: BlockId::from(0),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn main_button(&self) -> ButtonId {
        self.main_button
    }

    pub fn sub_buttons(&self) -> &[ButtonId] {
        &self.sub_buttons
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn layout(&self) -> &ArcLayout {
        &self.layout
    }

    /// Takes effect on the next `toggle`.
    pub fn set_layout(&mut self, layout: ArcLayout) {
        self.layout = layout;
    }

    fn anchor(&self) -> Result<Point, MenuError> {
        self.container
            .button(self.main_button)
            .map(MenuButton::center)
            .ok_or(MenuError::MissingMainButton(self.main_button))
    }

    /// Replaces every sub-button with `count` fresh ones of square `size`.
    ///
    /// New buttons sit on the main button's center, fully transparent and
    /// flipped upside down, stacked directly behind the main button.
    pub fn create_sub_buttons(&mut self, size: f64, count: usize) -> Result<(), MenuError> {
        if count == 0 {
            return Err(MenuError::EmptyMenu);
        }
        if !size.is_finite() || size <= 0.0 {
            return Err(MenuError::InvalidButtonSize(size));
        }
        if self.is_animating() {
            return Err(MenuError::Animating);
        }
        let anchor = self.anchor()?;

        for id in std::mem::take(&mut self.sub_buttons) {
            self.container.remove(id);
        }

        for n in 1..=count {
            let frame = Rect::square(size).with_center(anchor);
            let mut button = C::Button::new(ButtonTitle::new(n.to_string()), frame);
            button.set_opacity(0.0);
            button.set_rotation(Rotation::IDENTITY.rotated(HALF_TURN));

            let id = self
                .container
                .insert_below(button, self.main_button)
                .ok_or(MenuError::MissingMainButton(self.main_button))?;
            self.sub_buttons.push(id);
        }

        self.state = MenuState::Hidden;
        log::debug!("Created {} sub-buttons of size {}", count, size);
        Ok(())
    }

    /// Moves the main button to `center`, carrying the sub-buttons along.
    pub fn move_anchor(&mut self, center: Point) -> Result<(), MenuError> {
        if self.is_animating() {
            return Err(MenuError::Animating);
        }
        let current = self.anchor()?;
        let (dx, dy) = (center.x - current.x, center.y - current.y);

        for &id in std::iter::once(&self.main_button).chain(&self.sub_buttons) {
            if let Some(button) = self.container.button_mut(id) {
                let frame = button.frame();
                button.set_frame(frame.with_origin(frame.origin.offset(dx, dy)));
            }
        }
        Ok(())
    }

    pub fn toggle(&mut self) {
        match self.state {
            MenuState::Shown => self.hide(),
            MenuState::Hidden => {
                let layout = self.layout;
                self.show(&layout);
            }
        }
    }

    /// Fans the sub-buttons out along the arc described by `layout`.
    pub fn show(&mut self, layout: &ArcLayout) {
        if self.is_animating() {
            log::debug!("show dropped: an animation is already running");
            return;
        }
        let anchor = match self.anchor() {
            Ok(anchor) => anchor,
            Err(e) => {
                log::error!("Cannot show menu: {}", e);
                return;
            }
        };

        let count = self.sub_buttons.len();
        let mut keyframes = Vec::with_capacity(count);

        for (index, &id) in self.sub_buttons.iter().enumerate() {
            let Some(button) = self.container.button_mut(id) else {
                continue;
            };
            button.set_opacity(0.0);
            button.set_center(anchor);

            let from = Pose::of(button);
            let to = Pose {
                origin: layout.target_origin(from.origin, index, count),
                opacity: 1.0,
                rotation: from.rotation.rotated(HALF_TURN),
            };
            keyframes.push(Keyframe::staggered(id, index, count, from, to, HALF_TURN));
        }

        self.hide_duration = layout.clamped_duration();
        self.begin(Phase::Show, layout.clamped_duration(), keyframes);
    }

    /// Pulls the sub-buttons back behind the main button, last one first.
    ///
    /// Runs even when the menu is already hidden; only a running animation
    /// blocks it.
    pub fn hide(&mut self) {
        if self.is_animating() {
            log::debug!("hide dropped: an animation is already running");
            return;
        }
        let anchor = match self.anchor() {
            Ok(anchor) => anchor,
            Err(e) => {
                log::error!("Cannot hide menu: {}", e);
                return;
            }
        };

        let count = self.sub_buttons.len();
        let mut keyframes = Vec::with_capacity(count);

        for (order, &id) in self.sub_buttons.iter().rev().enumerate() {
            let Some(button) = self.container.button(id) else {
                continue;
            };
            let from = Pose::of(button);
            let to = Pose {
                origin: button.frame().with_center(anchor).origin,
                opacity: 0.0,
                rotation: from.rotation.rotated(HALF_TURN),
            };
            keyframes.push(Keyframe::staggered(id, order, count, from, to, HALF_TURN));
        }

        self.begin(Phase::Hide, self.hide_duration, keyframes);
    }

    fn begin(&mut self, phase: Phase, duration: f64, keyframes: Vec<Keyframe>) {
        let id = self.last_block.next();
        self.last_block = id;
        self.in_flight = Some((id, phase));

        log::debug!(
            "{} started: {} of {} buttons over {}s",
            id,
            phase,
            keyframes.len(),
            duration
        );
        self.scheduler.start(AnimationBlock {
            id,
            phase,
            duration,
            keyframes,
        });
    }

    /// Completion callback for a block. Ids other than the in-flight one are ignored.
    pub fn complete(&mut self, id: BlockId) {
        match self.in_flight {
            Some((current, phase)) if current == id => {
                self.in_flight = None;
                self.state = phase.settles_to();
                log::debug!("{} finished, menu {}", id, self.state);
            }
            _ => log::warn!("Ignoring completion of stale {}", id),
        }
    }

    /// Advances the running block to `now` (seconds). Returns whether an
    /// animation is still in flight afterwards.
    pub fn advance(&mut self, now: f64) -> bool {
        if let Some(id) = self.scheduler.advance(now, &mut self.container) {
            self.complete(id);
        }
        self.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::keyframe::Easing;
    use crate::scheduler::FrameScheduler;
    use crate::stage::{Sprite, Stage};

    const MAIN_CENTER: Point = Point { x: 200.0, y: 300.0 };

    /// Records every block it is handed and never plays them.
    #[derive(Default)]
    struct RecordingScheduler {
        blocks: Vec<AnimationBlock>,
    }

    impl Scheduler for RecordingScheduler {
        fn start(&mut self, block: AnimationBlock) {
            self.blocks.push(block);
        }

        fn advance<C: ButtonContainer>(&mut self, _now: f64, _container: &mut C) -> Option<BlockId> {
            None
        }

        fn is_running(&self) -> bool {
            false
        }
    }

    fn stage_with_main() -> (Stage, ButtonId) {
        let mut stage = Stage::new();
        let frame = Rect::new(Point::default(), Size::square(64.0)).with_center(MAIN_CENTER);
        let main = stage.push(Sprite::new(ButtonTitle::new("menu"), frame));
        (stage, main)
    }

    fn recording_menu(count: usize) -> RadialMenuController<Stage, RecordingScheduler> {
        let (stage, main) = stage_with_main();
        let mut menu =
            RadialMenuController::new(stage, RecordingScheduler::default(), main, ArcLayout::default());
        menu.create_sub_buttons(50.0, count).unwrap();
        menu
    }

    fn frame_menu(count: usize) -> RadialMenuController<Stage, FrameScheduler> {
        let (stage, main) = stage_with_main();
        let mut menu = RadialMenuController::new(
            stage,
            FrameScheduler::new(Easing::Cubic),
            main,
            ArcLayout::default(),
        );
        menu.create_sub_buttons(50.0, count).unwrap();
        menu
    }

    fn snapshot<S: Scheduler>(menu: &RadialMenuController<Stage, S>) -> Vec<Sprite> {
        menu.sub_buttons()
            .iter()
            .map(|&id| menu.container().button(id).unwrap().clone())
            .collect()
    }

    /// Runs frames at 60 Hz until the block completes.
    fn run_to_completion(menu: &mut RadialMenuController<Stage, FrameScheduler>, start: f64) -> f64 {
        let mut now = start;
        while menu.advance(now) {
            now += 1.0 / 60.0;
            assert!(now - start < 10.0, "animation never finished");
        }
        now
    }

    #[test]
    fn test_new_buttons_rest_behind_main_button() {
        let menu = recording_menu(6);
        let stage = menu.container();

        assert_eq!(menu.sub_buttons().len(), 6);
        for (i, &id) in menu.sub_buttons().iter().enumerate() {
            let sprite = stage.button(id).unwrap();
            assert_eq!(sprite.title, ButtonTitle::new((i + 1).to_string()));
            assert_eq!(sprite.center(), MAIN_CENTER);
            assert_eq!(sprite.frame.size, Size::square(50.0));
            assert_eq!(sprite.opacity, 0.0);
            assert_eq!(sprite.rotation.degrees(), 180.0);
            assert!(stage.z_index(id) < stage.z_index(menu.main_button()));
        }
        assert_eq!(menu.state(), MenuState::Hidden);
        assert!(!menu.is_animating());
    }

    #[test]
    fn test_zero_count_is_rejected_and_keeps_old_buttons() {
        let mut menu = recording_menu(3);
        let before = menu.sub_buttons().to_vec();

        assert_eq!(menu.create_sub_buttons(50.0, 0), Err(MenuError::EmptyMenu));
        assert_eq!(menu.sub_buttons(), before.as_slice());
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        let mut menu = recording_menu(3);
        assert_eq!(
            menu.create_sub_buttons(-1.0, 3),
            Err(MenuError::InvalidButtonSize(-1.0))
        );
        assert!(menu.create_sub_buttons(f64::NAN, 3).is_err());
    }

    #[test]
    fn test_rebuild_removes_previous_buttons() {
        let mut menu = recording_menu(6);
        let old = menu.sub_buttons().to_vec();

        menu.create_sub_buttons(40.0, 2).unwrap();

        assert_eq!(menu.container().len(), 3);
        for id in old {
            assert!(menu.container().button(id).is_none());
        }
    }

    #[test]
    fn test_rebuild_refused_mid_animation() {
        let mut menu = recording_menu(3);
        menu.toggle();
        assert_eq!(menu.create_sub_buttons(50.0, 4), Err(MenuError::Animating));
        assert_eq!(menu.sub_buttons().len(), 3);
    }

    #[test]
    fn test_show_builds_one_keyframe_per_button_in_creation_order() {
        let mut menu = recording_menu(6);
        menu.toggle();

        assert!(menu.is_animating());
        assert_eq!(menu.state(), MenuState::Hidden);

        let block = &menu.scheduler().blocks[0];
        assert_eq!(block.phase, Phase::Show);
        assert_eq!(block.duration, 0.8);
        assert_eq!(block.keyframes.len(), 6);
        assert_eq!(block.start_order(), menu.sub_buttons());

        let offsets: Vec<f64> = block
            .keyframes
            .iter()
            .map(|k| k.start_offset(block.duration))
            .collect();
        for (i, pair) in offsets.windows(2).enumerate() {
            assert!(pair[1] > pair[0], "offset {} not after {}", i + 1, i);
        }
        assert_eq!(offsets[0], 0.0);
        for keyframe in &block.keyframes {
            assert!((keyframe.start + keyframe.span - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_show_targets_follow_the_arc() {
        let mut menu = recording_menu(6);
        menu.toggle();

        let block = &menu.scheduler().blocks[0];
        let layout = ArcLayout::default();
        for (i, keyframe) in block.keyframes.iter().enumerate() {
            let (dx, dy) = layout.offset(i, 6);
            assert_eq!(keyframe.to.origin, keyframe.from.origin.offset(dx, dy));
            assert_eq!(keyframe.from.opacity, 0.0);
            assert_eq!(keyframe.to.opacity, 1.0);
            assert!(keyframe.to.rotation.is_upright());
        }
    }

    #[test]
    fn test_second_show_while_running_is_a_no_op() {
        let mut once = recording_menu(4);
        once.toggle();

        let mut twice = recording_menu(4);
        twice.toggle();
        twice.toggle();
        let layout = ArcLayout {
            distance: 10.0,
            ..ArcLayout::default()
        };
        twice.show(&layout);

        assert_eq!(twice.scheduler().blocks.len(), 1);
        assert_eq!(twice.scheduler().blocks, once.scheduler().blocks);
        assert_eq!(snapshot(&twice), snapshot(&once));
        assert_eq!(twice.is_animating(), once.is_animating());
    }

    #[test]
    fn test_hide_while_showing_is_dropped() {
        let mut menu = frame_menu(3);
        menu.toggle();
        menu.advance(0.0);
        menu.hide();
        run_to_completion(&mut menu, 0.1);

        assert_eq!(menu.state(), MenuState::Shown);
        assert!(!menu.is_animating());
    }

    #[test]
    fn test_second_hide_while_running_is_a_no_op() {
        let mut once = recording_menu(4);
        once.hide();

        let mut twice = recording_menu(4);
        twice.hide();
        twice.hide();
        twice.toggle();

        assert_eq!(twice.scheduler().blocks.len(), 1);
        assert_eq!(twice.scheduler().blocks, once.scheduler().blocks);
        assert_eq!(snapshot(&twice), snapshot(&once));
        assert_eq!(twice.is_animating(), once.is_animating());
    }

    #[test]
    fn test_repeated_hide_mid_flight_matches_single_hide() {
        let mut once = frame_menu(4);
        let mut twice = frame_menu(4);
        let initial = snapshot(&once);

        once.toggle();
        let t = run_to_completion(&mut once, 0.0);
        twice.toggle();
        assert_eq!(run_to_completion(&mut twice, 0.0), t);

        once.hide();
        once.advance(t);
        twice.hide();
        twice.advance(t);
        twice.hide();
        twice.toggle();

        once.advance(t + 0.3);
        twice.advance(t + 0.3);
        assert_eq!(snapshot(&twice), snapshot(&once));

        run_to_completion(&mut once, t + 0.3);
        run_to_completion(&mut twice, t + 0.3);
        assert_eq!(snapshot(&twice), snapshot(&once));
        assert_eq!(snapshot(&twice), initial);
        assert_eq!(twice.state(), MenuState::Hidden);
    }

    #[test]
    fn test_hide_starts_with_last_button() {
        let mut menu = recording_menu(5);
        menu.hide();

        let block = &menu.scheduler().blocks[0];
        assert_eq!(block.phase, Phase::Hide);
        let order = block.start_order();
        assert_eq!(order[0], *menu.sub_buttons().last().unwrap());

        let mut reversed = menu.sub_buttons().to_vec();
        reversed.reverse();
        assert_eq!(order, reversed);
    }

    #[test]
    fn test_hide_from_hidden_still_animates() {
        let mut menu = frame_menu(2);
        menu.hide();
        assert!(menu.is_animating());

        run_to_completion(&mut menu, 0.0);
        assert_eq!(menu.state(), MenuState::Hidden);
        for sprite in snapshot(&menu) {
            assert!(sprite.rotation.is_upright());
            assert_eq!(sprite.opacity, 0.0);
        }
    }

    #[test]
    fn test_show_completes_into_shown_state() {
        let mut menu = frame_menu(6);
        menu.toggle();
        run_to_completion(&mut menu, 0.0);

        assert_eq!(menu.state(), MenuState::Shown);
        let layout = ArcLayout::default();
        for (i, sprite) in snapshot(&menu).iter().enumerate() {
            let origin = Rect::square(50.0).with_center(MAIN_CENTER).origin;
            assert_eq!(sprite.frame.origin, layout.target_origin(origin, i, 6));
            assert_eq!(sprite.opacity, 1.0);
            assert!(sprite.rotation.is_upright());
        }
    }

    #[test]
    fn test_round_trip_restores_initial_buttons_exactly() {
        let layouts = [
            ArcLayout::default(),
            ArcLayout {
                distance: 73.5,
                arc_fraction: 1.0,
                rotation_offset: 0.13,
                duration: 0.3,
            },
            ArcLayout {
                distance: 0.0,
                arc_fraction: 0.0,
                rotation_offset: 0.0,
                duration: 1.7,
            },
        ];

        for layout in layouts {
            let mut menu = frame_menu(6);
            let initial = snapshot(&menu);

            menu.show(&layout);
            let now = run_to_completion(&mut menu, 0.0);
            assert_eq!(menu.state(), MenuState::Shown);

            menu.toggle();
            run_to_completion(&mut menu, now + 1.0);
            assert_eq!(menu.state(), MenuState::Hidden);

            assert_eq!(snapshot(&menu), initial, "layout {:?}", layout);
        }
    }

    #[test]
    fn test_hide_reuses_last_show_duration() {
        let mut menu = recording_menu(2);
        let layout = ArcLayout {
            duration: 2.5,
            ..ArcLayout::default()
        };
        menu.show(&layout);
        menu.complete(BlockId::from(1));
        menu.toggle();

        let blocks = &menu.scheduler().blocks;
        assert_eq!(blocks[1].phase, Phase::Hide);
        assert_eq!(blocks[1].duration, 2.5);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut menu = recording_menu(3);
        menu.toggle();
        let first = menu.scheduler().blocks[0].id;
        menu.complete(first);
        assert_eq!(menu.state(), MenuState::Shown);

        menu.toggle();
        menu.complete(first);
        assert!(menu.is_animating());
        assert_eq!(menu.state(), MenuState::Shown);

        let second = menu.scheduler().blocks[1].id;
        menu.complete(second);
        assert_eq!(menu.state(), MenuState::Hidden);
    }

    #[test]
    fn test_single_button_lands_at_rotation_offset() {
        let mut menu = frame_menu(1);
        menu.toggle();
        run_to_completion(&mut menu, 0.0);

        let sprite = &snapshot(&menu)[0];
        let (dx, dy) = (
            sprite.center().x - MAIN_CENTER.x,
            sprite.center().y - MAIN_CENTER.y,
        );
        assert!((dx + 100.0).abs() < 1e-9);
        assert!(dy.abs() < 1e-9);
    }

    #[test]
    fn test_move_anchor_carries_sub_buttons() {
        let mut menu = frame_menu(3);
        menu.toggle();
        run_to_completion(&mut menu, 0.0);
        let before = snapshot(&menu);

        menu.move_anchor(Point::new(210.0, 280.0)).unwrap();

        let main = menu.container().button(menu.main_button()).unwrap();
        assert_eq!(main.center(), Point::new(210.0, 280.0));
        for (old, new) in before.iter().zip(snapshot(&menu)) {
            assert_eq!(new.frame.origin, old.frame.origin.offset(10.0, -20.0));
        }
    }

    #[test]
    fn test_missing_main_button_is_reported() {
        let (stage, _) = stage_with_main();
        let ghost = ButtonId::from(99);
        let mut menu =
            RadialMenuController::new(stage, RecordingScheduler::default(), ghost, ArcLayout::default());

        assert_eq!(
            menu.create_sub_buttons(50.0, 3),
            Err(MenuError::MissingMainButton(ghost))
        );
        menu.toggle();
        assert!(!menu.is_animating());
    }
}
