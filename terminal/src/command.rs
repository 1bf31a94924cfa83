//! Parsing of terminal input lines into app actions.

use std::str::FromStr;

use mozik_app::{Action, Destination, Field, MenuItem, NavigationError, Tab};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  go <route>              open a destination (login, signup, video_processor, settings,
                          camera, gallery, face_register, face_list)
  back                    return to the previous screen
  tab <video|camera|gallery>
  menu <settings|info>
  email|password|nickname <text>
  submit                  send the login or signup form
  mosaic|face|plate <on|off>
  blur <0-100>            settings blur intensity
  size <0-10> | level <0-100>   video processor sliders
  register                open face registration
  faces                   open the registered face list
  add                     register a face
  remove <n>              delete entry n of the face list
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action(Action),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{command} expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
    #[error("{command}: invalid argument {value:?}, expected {expected}")]
    InvalidArgument {
        command: String,
        value: String,
        expected: &'static str,
    },
    #[error(transparent)]
    Route(#[from] NavigationError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let verb = verb.to_ascii_lowercase();

        let action = match verb.as_str() {
            "" => return Err(ParseCommandError::Empty),
            "help" | "?" => return Ok(Command::Help),
            "quit" | "exit" => return Ok(Command::Quit),
            "go" => Action::Navigate(required(&verb, rest, "a route")?.parse::<Destination>()?),
            "back" => Action::Back,
            "tab" => Action::SelectTab(parse_tab(&verb, required(&verb, rest, "a tab")?)?),
            "menu" => {
                let item = required(&verb, rest, "settings or info")?;
                Action::Menu(item.parse::<MenuItem>().map_err(|_| invalid(
                    &verb,
                    item,
                    "settings or info",
                ))?)
            }
            "email" => Action::SetField(Field::Email, rest.to_string()),
            "password" => Action::SetField(Field::Password, rest.to_string()),
            "nickname" => Action::SetField(Field::Nickname, rest.to_string()),
            "submit" => Action::Submit,
            "mosaic" => Action::SetMosaic(parse_switch(&verb, rest)?),
            "face" => Action::SetFaceBlur(parse_switch(&verb, rest)?),
            "plate" => Action::SetPlateBlur(parse_switch(&verb, rest)?),
            "blur" => Action::SetBlurIntensity(parse_number(&verb, rest, "a number")?),
            "size" => Action::SetBlurSize(parse_number(&verb, rest, "a whole number")?),
            "level" => Action::SetBlurLevel(parse_number(&verb, rest, "a whole number")?),
            "register" => Action::OpenFaceRegister,
            "faces" => Action::OpenFaceList,
            "add" => Action::AddFace,
            "remove" => {
                let position: usize = parse_number(&verb, rest, "a list position")?;
                let index = position
                    .checked_sub(1)
                    .ok_or_else(|| invalid(&verb, rest, "a list position starting at 1"))?;
                Action::RemoveFace(index)
            }
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };

        Ok(Command::Action(action))
    }
}

fn required<'a>(
    command: &str,
    rest: &'a str,
    expected: &'static str,
) -> Result<&'a str, ParseCommandError> {
    if rest.is_empty() {
        Err(ParseCommandError::MissingArgument {
            command: command.to_string(),
            expected,
        })
    } else {
        Ok(rest)
    }
}

fn invalid(command: &str, value: &str, expected: &'static str) -> ParseCommandError {
    ParseCommandError::InvalidArgument {
        command: command.to_string(),
        value: value.to_string(),
        expected,
    }
}

fn parse_switch(command: &str, rest: &str) -> Result<bool, ParseCommandError> {
    match required(command, rest, "on or off")? {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(invalid(command, other, "on or off")),
    }
}

fn parse_number<T: FromStr>(
    command: &str,
    rest: &str,
    expected: &'static str,
) -> Result<T, ParseCommandError> {
    let value = required(command, rest, expected)?;
    value.parse().map_err(|_| invalid(command, value, expected))
}

fn parse_tab(command: &str, value: &str) -> Result<Tab, ParseCommandError> {
    match value {
        "video" | "video_processor" => Ok(Tab::VideoProcessor),
        "camera" => Ok(Tab::Camera),
        "gallery" => Ok(Tab::Gallery),
        other => Tab::ALL
            .into_iter()
            .find(|tab| tab.label() == other)
            .ok_or_else(|| invalid(command, other, "video, camera or gallery")),
    }
}
