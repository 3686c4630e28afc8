//! Event handling and user interactions for snipeit-bot.
//!
//! This module provides functionality for handling chat message events:
//! - Detecting @-mentions of the bot and parsing commands
//! - Dispatching commands to inventory lookups
//! - Formatting lookup results as chat replies

pub mod chat_event;
pub mod command;
pub mod format;
