use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba, WithAlpha};

pub const BORDER_WIDTH: f64 = 0.5;
pub const MAIN_CORNER_DIVISOR: f64 = 1.8;
pub const FONT_SCALE: f64 = 0.36; // title height relative to button width

pub struct ThemeColors {
    pub border: Srgba<f64>,
    pub surface: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            border: Self::lookup_color(
                context,
                "accent_color",
                Srgb::new(0x76u8, 0xD2, 0xE7)
                    .into_format::<f64>()
                    .with_alpha(1.0),
                None,
            ),
            surface: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                Some(1.0),
            ),
            label: Self::lookup_color(
                context,
                "theme_text_color",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

/// Static look of one button. Not animated.
#[derive(Debug, Clone, Copy)]
pub struct ButtonStyle {
    pub corner_radius: f64,
    pub border_width: f64,
    pub border: Srgba<f64>,
    pub background: Srgba<f64>,
    pub label: Srgba<f64>,
    pub font_size: f64,
}

impl ButtonStyle {
    /// The main button: thin accent border on a plain surface, corners rounded
    /// by `width / 1.8` (which reads as a circle once clamped).
    pub fn main(width: f64, colors: &ThemeColors) -> Self {
        Self {
            corner_radius: width / MAIN_CORNER_DIVISOR,
            ..Self::sub(width, colors)
        }
    }

    pub fn sub(width: f64, colors: &ThemeColors) -> Self {
        Self {
            corner_radius: width / 2.0,
            border_width: BORDER_WIDTH,
            border: colors.border,
            background: colors.surface,
            label: colors.label,
            font_size: width * FONT_SCALE,
        }
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.bloom-window, .bloom-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
