use clap::{Parser, Subcommand};
use fanout::ipc::{MenuCommand, SOCKET_PATH};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "fanout", version, about = "Control a running bloom menu", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control socket of the running menu
    #[arg(short = 's', long, default_value = SOCKET_PATH)]
    socket: String,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Open the menu if it is closed, close it if it is open
    Toggle,
    /// Fan the sub-buttons out
    Show,
    /// Pull the sub-buttons back in
    Hide,
}

impl From<Commands> for MenuCommand {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Toggle => MenuCommand::Toggle,
            Commands::Show => MenuCommand::Show,
            Commands::Hide => MenuCommand::Hide,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    send_command(&cli.socket, cli.command.into())
}

fn send_command(socket: &str, cmd: MenuCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to bloom at {}: {}. Is bloom running?",
            socket,
            e
        )
    })?;

    log::debug!("Sending '{}' to {}", cmd, socket);
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
