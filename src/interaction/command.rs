//! Parsing of bot mentions and commands out of raw message text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Matches a leading `<@USERID>` mention and captures the rest of the line.
static MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<@(|[WU].+?)>(.*)").expect("invalid regex"));

/// A command addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    User(Option<String>),
    Serial(Option<String>),
    Asset(Option<String>),
    Unknown,
}

/// Split a message into the mentioned user ID and the trimmed remainder.
///
/// Returns `None` when there is no text (edits and deletions carry none) or
/// when the text does not start with a mention.
pub fn parse_mention(text: Option<&str>) -> Option<(&str, &str)> {
    let Some(text) = text else {
        debug!("No message text found.");
        return None;
    };

    let captures = MENTION_REGEX.captures(text)?;
    let mentioned_id = captures.get(1).map_or("", |m| m.as_str());
    let remainder = captures.get(2).map_or("", |m| m.as_str().trim());

    debug!("Mention of `{}` with remainder `{}`.", mentioned_id, remainder);

    Some((mentioned_id, remainder))
}

/// Parse the text following a mention into a command.
///
/// Only the first argument is used; anything after it is ignored.
pub fn parse_command(remainder: &str) -> Command {
    let lowered = remainder.to_lowercase();
    let mut tokens = lowered.split_whitespace();

    let keyword = tokens.next().unwrap_or_default();
    let argument = tokens.next().map(str::to_string);

    match keyword {
        "help" => Command::Help,
        "user" => Command::User(argument),
        "serial" => Command::Serial(argument),
        "asset" => Command::Asset(argument),
        _ => Command::Unknown,
    }
}
