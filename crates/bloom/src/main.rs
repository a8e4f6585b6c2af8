use bloom::config;
use bloom::gui::app::AppModel;
use bloom::gui::menu::Menu;
use bloom::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_default();
    let menu = Menu::new(config.menu, config.window.center())?;

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.bloom");
    app.run::<AppModel>((menu, config.window, rx));
    Ok(())
}
