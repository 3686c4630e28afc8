//! Dispatch of incoming chat messages to inventory lookups.

use tracing::{Instrument, debug, error, info, instrument, warn};

use crate::{
    base::{
        responses::{DEFAULT_RESPONSE, HELP_RESPONSE},
        types::{InboundMessage, LookupKind, LookupResult, Void},
    },
    interaction::{
        command::{Command, parse_command, parse_mention},
        format::format_lookup,
    },
    service::{chat::ChatClient, inventory::InventoryClient},
};

/// Handles a chat message event.
///
/// Spawns a new task so the event listener is never blocked on a lookup.
#[instrument(skip_all)]
pub fn handle_chat_event(message: InboundMessage, inventory: InventoryClient, chat: ChatClient) {
    tokio::spawn(async move {
        // Process the event.
        let result = process_message(message, &inventory, &chat).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    });
}

/// Build the reply for a message and post it back to the originating channel.
///
/// Sends nothing when the message is not addressed to the chat client's bot user.
#[instrument(skip_all, fields(channel_id = %message.channel_id))]
pub async fn process_message(message: InboundMessage, inventory: &InventoryClient, chat: &ChatClient) -> Void {
    let Some(reply) = build_reply(chat.bot_user_id(), message.text.as_deref(), inventory).await else {
        debug!("Nothing to do.");
        return Ok(());
    };

    chat.send_message(&message.channel_id, &reply).await
}

/// Compute the reply text for a message, or `None` when the bot is not mentioned.
pub async fn build_reply(bot_id: &str, text: Option<&str>, inventory: &InventoryClient) -> Option<String> {
    let (mentioned_id, remainder) = parse_mention(text)?;

    if mentioned_id != bot_id {
        return None;
    }

    let command = parse_command(remainder);
    info!("Received command: {:?}", command);

    let reply = match command {
        Command::Help => HELP_RESPONSE.to_string(),
        Command::User(Some(username)) => {
            let result = inventory.lookup_user_assets(&username).await;
            log_lookup_error(LookupKind::Username, &username, &result);
            format_lookup(LookupKind::Username, &username, &result)
        }
        Command::Serial(Some(serial)) => {
            let result = inventory.lookup_asset_by_serial(&serial).await;
            log_lookup_error(LookupKind::Serial, &serial, &result);
            format_lookup(LookupKind::Serial, &serial, &result)
        }
        Command::Asset(Some(tag)) => {
            let result = inventory.lookup_asset_by_tag(&tag).await;
            log_lookup_error(LookupKind::AssetTag, &tag, &result);
            format_lookup(LookupKind::AssetTag, &tag, &result)
        }
        Command::User(None) => missing_argument(LookupKind::Username),
        Command::Serial(None) => missing_argument(LookupKind::Serial),
        Command::Asset(None) => missing_argument(LookupKind::AssetTag),
        Command::Unknown => DEFAULT_RESPONSE.to_string(),
    };

    Some(reply)
}

fn missing_argument(kind: LookupKind) -> String {
    let article = if kind == LookupKind::AssetTag { "an" } else { "a" };
    format!("ERROR: missing argument, please provide {article} {kind}.")
}

fn log_lookup_error(kind: LookupKind, term: &str, result: &LookupResult) {
    if let Err(err) = result {
        warn!("Lookup for {} `{}` failed: {}", kind, term, err);
    }
}
