//! Console command parsing.

use thiserror::Error;
use v2v_events::LinkEvent;

pub const HELP: &str = "\
Commands:
  /driver | /fleet | /emergency | /   switch dashboard (also: go <path>)
  chat open | chat close | chat toggle
  say <text>                          send a chat message
  link up | link down [reason] | link reset
  state                               print the session as JSON
  help
  quit | exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Navigate(String),
    ChatOpen,
    ChatClose,
    ChatToggle,
    Say(String),
    Link(LinkEvent),
    State,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl ShellCommand {
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }
        if input.starts_with('/') {
            return Ok(Self::Navigate(input.to_string()));
        }

        let (word, rest) = match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (input, ""),
        };

        match word.to_lowercase().as_str() {
            "go" if !rest.is_empty() => Ok(Self::Navigate(rest.to_string())),
            "go" => Err(CommandError::Usage("go <path>")),
            "chat" => match rest {
                "open" => Ok(Self::ChatOpen),
                "close" => Ok(Self::ChatClose),
                "toggle" => Ok(Self::ChatToggle),
                _ => Err(CommandError::Usage("chat open|close|toggle")),
            },
            // Empty text is passed through so the overlay reports the rejection
            "say" => Ok(Self::Say(rest.to_string())),
            "link" => Self::parse_link(rest),
            "state" => Ok(Self::State),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }

    fn parse_link(rest: &str) -> Result<Self, CommandError> {
        let (verb, reason) = match rest.split_once(char::is_whitespace) {
            Some((verb, reason)) => (verb, Some(reason.trim().to_string())),
            None => (rest, None),
        };
        let event = match verb {
            "up" => LinkEvent::Connected,
            "down" => LinkEvent::Disconnected {
                reason: reason.filter(|r| !r.is_empty()),
            },
            "reset" => LinkEvent::Reset,
            _ => return Err(CommandError::Usage("link up|down [reason]|reset")),
        };
        Ok(Self::Link(event))
    }
}
