use fanout::ipc::MenuCommand;

/// Messages from background services to the UI thread.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Toggle,
    Show,
    Hide,
    ConfigReload,
}

impl From<MenuCommand> for AppEvent {
    fn from(cmd: MenuCommand) -> Self {
        match cmd {
            MenuCommand::Toggle => AppEvent::Toggle,
            MenuCommand::Show => AppEvent::Show,
            MenuCommand::Hide => AppEvent::Hide,
        }
    }
}
