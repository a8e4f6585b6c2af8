use crate::config::{self, WindowConfig};
use crate::events::AppEvent;
use crate::gui::menu::{self, Menu};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use fanout::Point;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub menu: Rc<RefCell<Menu>>,
    pub window: WindowConfig,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Toggle,
    Show,
    Hide,
    Tap(Point),
    Resize(i32, i32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    /// Steps the menu once per frame until its animation settles.
    fn start_frame_clock(&self) {
        let menu = self.menu.clone();
        self.drawing_area.add_tick_callback(move |area, clock| {
            let now = clock.frame_time() as f64 / 1e6;
            let running = menu.borrow_mut().advance(now);
            area.queue_draw();
            if running {
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Menu, WindowConfig, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Bloom"),
            set_default_size: (model.window.width, model.window.height),
            add_css_class: "bloom-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "bloom-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Tap(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (menu, window_config, rx) = init;

        theme::load_css();
        if window_config.overlay {
            window::init_layer_shell(&root);
        }

        let model = AppModel {
            menu: Rc::new(RefCell::new(menu)),
            window: window_config,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let menu_draw = model.menu.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &menu_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let started = match msg {
            AppMsg::Toggle => self.menu.borrow_mut().toggle(),
            AppMsg::Show => self.menu.borrow_mut().show(),
            AppMsg::Hide => self.menu.borrow_mut().hide(),
            AppMsg::Tap(point) => self.menu.borrow_mut().tap(point),
            AppMsg::Resize(width, height) => {
                let center = Point::new(width as f64 / 2.0, height as f64 / 2.0);
                self.menu.borrow_mut().recenter(center);
                false
            }
            AppMsg::ConfigReload => {
                match config::load_config() {
                    Ok(new_config) => {
                        self.menu.borrow_mut().apply_config(new_config.menu);
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
                false
            }
        };

        if started {
            self.start_frame_clock();
        }
        self.drawing_area.queue_draw();
    }
}
