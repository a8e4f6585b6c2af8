use super::Menu;
use crate::gui::theme::{ButtonStyle, ThemeColors};
use cairo::Context;
use fanout::{ButtonId, MenuButton, Sprite};
use palette::Srgba;
use std::f64::consts::PI;

struct ButtonRenderer<'a> {
    sprite: &'a Sprite,
    style: ButtonStyle,
}

impl<'a> ButtonRenderer<'a> {
    fn new(sprite: &'a Sprite, style: ButtonStyle) -> Self {
        Self { sprite, style }
    }

    /// Paints around the sprite's center so rotation spins it in place.
    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        if self.sprite.opacity <= 0.0 {
            return Ok(());
        }
        let center = self.sprite.center();
        let size = self.sprite.frame.size;

        cr.save()?;
        cr.translate(center.x, center.y);
        cr.rotate(self.sprite.rotation.radians());

        cr.push_group();
        self.draw_body(cr, size.width, size.height)?;
        self.draw_title(cr)?;
        cr.pop_group_to_source()?;
        cr.paint_with_alpha(self.sprite.opacity.min(1.0))?;

        cr.restore()
    }

    fn draw_body(&self, cr: &Context, width: f64, height: f64) -> Result<(), cairo::Error> {
        rounded_rect(cr, width, height, self.style.corner_radius);

        set_source(cr, self.style.background);
        cr.fill_preserve()?;

        set_source(cr, self.style.border);
        cr.set_line_width(self.style.border_width);
        cr.stroke()
    }

    fn draw_title(&self, cr: &Context) -> Result<(), cairo::Error> {
        let text = self.sprite.title.as_str();
        set_source(cr, self.style.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.style.font_size);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(
                -(ext.width() / 2.0 + ext.x_bearing()),
                -(ext.height() / 2.0 + ext.y_bearing()),
            );
            cr.show_text(text)?;
        }
        Ok(())
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Path for a `width` x `height` box centred on the origin. The radius is
/// clamped to half the shorter side.
fn rounded_rect(cr: &Context, width: f64, height: f64, radius: f64) {
    let r = radius.clamp(0.0, width.min(height) / 2.0);
    let (x0, y0) = (-width / 2.0, -height / 2.0);
    let (x1, y1) = (width / 2.0, height / 2.0);

    cr.new_sub_path();
    cr.arc(x1 - r, y0 + r, r, -PI / 2.0, 0.0);
    cr.arc(x1 - r, y1 - r, r, 0.0, PI / 2.0);
    cr.arc(x0 + r, y1 - r, r, PI / 2.0, PI);
    cr.arc(x0 + r, y0 + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

fn style_for(id: ButtonId, main: ButtonId, width: f64, colors: &ThemeColors) -> ButtonStyle {
    if id == main {
        ButtonStyle::main(width, colors)
    } else {
        ButtonStyle::sub(width, colors)
    }
}

/// Paints the whole stage back to front.
pub fn draw(cr: &Context, menu: &Menu, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let main = menu.main_button();
    for (id, sprite) in menu.stage().iter() {
        let style = style_for(id, main, sprite.frame.size.width, colors);
        ButtonRenderer::new(sprite, style).draw(cr)?;
    }
    Ok(())
}
