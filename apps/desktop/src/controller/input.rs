//! Line-oriented input: a number picks one of the offered buttons, a field
//! keyword followed by text fills an input, and a few words control the shell.

use shared::{
    domain::Role,
    protocol::{Action, FormField},
};
use thiserror::Error;

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, PartialEq)]
pub enum InputCommand {
    Backend(BackendCommand),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("no option {0} on this screen")]
    NoSuchOption(usize),
    #[error("missing value for `{0}`")]
    MissingValue(&'static str),
}

pub const HELP: &str = "\
Commands:
  <number>             press the numbered button
  <field> <text>       fill a field: email, password, confirm, name, phone,
                       occupation, reset-email, otp, new-password
  <action>             press a button by name: start, worker, supervisor, back,
                       login, signup, submit, forgot, send-otp, verify, reset,
                       upload-picture, take, pick, retake, locate, upload, open
  refresh              redraw the current screen
  help                 show this text
  quit                 exit";

const FIELD_KEYWORDS: &[(&str, FormField)] = &[
    ("email", FormField::Email),
    ("password", FormField::Password),
    ("confirm", FormField::ConfirmPassword),
    ("name", FormField::FullName),
    ("phone", FormField::PhoneNumber),
    ("occupation", FormField::Occupation),
    ("reset-email", FormField::ResetEmail),
    ("otp", FormField::OtpCode),
    ("new-password", FormField::NewPassword),
];

/// `offered` is the action list of the screen currently shown; it resolves
/// numbers and the context-dependent `submit`.
pub fn parse_line(line: &str, offered: &[Action]) -> Result<InputCommand, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(InputCommand::Empty);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let word_lower = word.to_ascii_lowercase();

    if let Ok(choice) = word_lower.parse::<usize>() {
        return choice
            .checked_sub(1)
            .and_then(|index| offered.get(index))
            .map(|action| InputCommand::Backend(BackendCommand::Act(*action)))
            .ok_or(InputError::NoSuchOption(choice));
    }

    if let Some((keyword, field)) = FIELD_KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == word_lower)
    {
        if rest.is_empty() && *field != FormField::OtpCode {
            return Err(InputError::MissingValue(*keyword));
        }
        return Ok(InputCommand::Backend(BackendCommand::SetField {
            field: *field,
            value: rest.to_string(),
        }));
    }

    let action = match word_lower.as_str() {
        "help" | "?" => return Ok(InputCommand::Help),
        "quit" | "exit" => return Ok(InputCommand::Quit),
        "refresh" => return Ok(InputCommand::Backend(BackendCommand::Refresh)),
        "start" => Action::Start,
        "worker" => Action::SelectRole(Role::Worker),
        "supervisor" => Action::SelectRole(Role::Supervisor),
        "back" => Action::Back,
        "login" => Action::OpenLogin,
        "signup" if offered.contains(&Action::SignupLink) => Action::SignupLink,
        "signup" => Action::OpenSignup,
        "submit" => [Action::SubmitLogin, Action::SubmitSignup, Action::SubmitReset]
            .into_iter()
            .find(|candidate| offered.contains(candidate))
            .unwrap_or(Action::SubmitLogin),
        "forgot" => Action::ForgotPassword,
        "send-otp" => Action::SendOtp,
        "verify" => Action::VerifyOtp,
        "reset" => Action::SubmitReset,
        "upload-picture" => Action::UploadPicture,
        "take" => Action::TakePicture,
        "pick" => Action::PickFromDevice,
        "retake" => Action::Retake,
        "locate" => Action::GetLocation,
        "upload" => Action::Upload,
        "open" => Action::Open,
        _ => return Err(InputError::Unknown(word.to_string())),
    };
    Ok(InputCommand::Backend(BackendCommand::Act(action)))
}
