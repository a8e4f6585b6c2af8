use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{KeyboardMode, Layer, LayerShell};

/// Floats the window above everything else. With no anchors the compositor
/// centres it at its requested size.
pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("bloom"));
    window.set_keyboard_mode(KeyboardMode::OnDemand);
}
