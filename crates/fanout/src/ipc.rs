use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const SOCKET_PATH: &str = "/tmp/bloom.sock";

/// One line on the control socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum MenuCommand {
    Toggle,
    Show,
    Hide,
}

impl MenuCommand {
    pub fn parse_line(line: &str) -> Option<Self> {
        line.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_commands_round_trip_through_text() {
        for cmd in MenuCommand::iter() {
            assert_eq!(MenuCommand::parse_line(&format!("{}\n", cmd)), Some(cmd));
        }
    }

    #[test]
    fn test_parse_line_is_lenient_about_case_and_space() {
        assert_eq!(MenuCommand::parse_line("  Toggle "), Some(MenuCommand::Toggle));
        assert_eq!(MenuCommand::parse_line("HIDE"), Some(MenuCommand::Hide));
        assert_eq!(MenuCommand::parse_line("spin"), None);
        assert_eq!(MenuCommand::parse_line(""), None);
    }
}
