use super::MAIN_TITLE;
use crate::config::MenuConfig;
use fanout::{
    ButtonContainer, ButtonId, ButtonTitle, FrameScheduler, MenuButton, MenuError, MenuState,
    Point, RadialMenuController, Rect, Sprite, Stage,
};

pub type Controller = RadialMenuController<Stage, FrameScheduler>;

/// The on-screen menu: a controller plus the config it was built from.
///
/// Anything that would rearrange buttons mid-animation (a new config, a new
/// anchor) is parked and applied once the running block finishes.
pub struct Menu {
    controller: Controller,
    config: MenuConfig,
    pending_config: Option<MenuConfig>,
    pending_center: Option<Point>,
}

impl Menu {
    pub fn new(config: MenuConfig, center: Point) -> Result<Self, MenuError> {
        let size = config.main_button_size;
        if !size.is_finite() || size <= 0.0 {
            return Err(MenuError::InvalidButtonSize(size));
        }

        let mut stage = Stage::new();
        let frame = Rect::square(size).with_center(center);
        let main = stage.push(Sprite::new(ButtonTitle::new(MAIN_TITLE), frame));

        let mut controller = RadialMenuController::new(
            stage,
            FrameScheduler::new(config.easing),
            main,
            config.layout(),
        );
        controller.create_sub_buttons(config.button_size, config.count)?;

        Ok(Self {
            controller,
            config,
            pending_config: None,
            pending_center: None,
        })
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn stage(&self) -> &Stage {
        self.controller.container()
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn main_button(&self) -> ButtonId {
        self.controller.main_button()
    }

    pub fn state(&self) -> MenuState {
        self.controller.state()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    fn anchor(&self) -> Point {
        self.stage()
            .button(self.main_button())
            .map(MenuButton::center)
            .unwrap_or_default()
    }

    pub fn hits_main_button(&self, p: Point) -> bool {
        self.stage()
            .button(self.main_button())
            .is_some_and(|b| b.center().distance_to(p) <= b.frame().size.width / 2.0)
    }

    /// A tap anywhere but the main button does nothing.
    /// Returns whether an animation started.
    pub fn tap(&mut self, p: Point) -> bool {
        if !self.hits_main_button(p) {
            return false;
        }
        self.toggle()
    }

    pub fn toggle(&mut self) -> bool {
        self.run(Controller::toggle)
    }

    pub fn show(&mut self) -> bool {
        let layout = self.config.layout();
        self.run(|c| c.show(&layout))
    }

    pub fn hide(&mut self) -> bool {
        self.run(Controller::hide)
    }

    fn run(&mut self, f: impl FnOnce(&mut Controller)) -> bool {
        let was_animating = self.controller.is_animating();
        f(&mut self.controller);
        !was_animating && self.controller.is_animating()
    }

    /// Advances to `now` (seconds). Returns whether more frames are needed.
    pub fn advance(&mut self, now: f64) -> bool {
        if self.controller.advance(now) {
            return true;
        }
        self.apply_pending();
        false
    }

    pub fn recenter(&mut self, center: Point) {
        match self.controller.move_anchor(center) {
            Ok(()) => self.pending_center = None,
            Err(MenuError::Animating) => self.pending_center = Some(center),
            Err(e) => log::error!("Failed to move menu: {}", e),
        }
    }

    pub fn apply_config(&mut self, config: MenuConfig) {
        if self.controller.is_animating() {
            log::info!("Config change deferred until the animation finishes");
            self.pending_config = Some(config);
            return;
        }
        self.reconfigure(config);
    }

    fn apply_pending(&mut self) {
        if let Some(center) = self.pending_center.take() {
            self.recenter(center);
        }
        if let Some(config) = self.pending_config.take() {
            self.reconfigure(config);
        }
    }

    /// All or nothing: a config that fails to build leaves the menu untouched.
    fn reconfigure(&mut self, config: MenuConfig) {
        if config.main_button_size != self.config.main_button_size {
            match Menu::new(config, self.anchor()) {
                Ok(menu) => *self = menu,
                Err(e) => log::error!("Failed to rebuild menu: {}", e),
            }
            return;
        }

        if self.config.needs_rebuild(&config)
            && let Err(e) = self
                .controller
                .create_sub_buttons(config.button_size, config.count)
        {
            log::error!("Failed to rebuild menu: {}", e);
            return;
        }
        self.controller.set_layout(config.layout());
        self.controller.scheduler_mut().set_easing(config.easing);
        self.config = config;
    }
}
