//! Slack implementation of the chat client.
//!
//! Events arrive over Socket Mode; replies go out through `chat.postMessage`.

use crate::{
    base::{
        config::Config,
        types::{InboundMessage, Res, Void},
    },
    interaction,
    service::inventory::InventoryClient,
};
use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::prelude::*;
use tracing::{debug, info, instrument, warn};

use std::sync::Arc;

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub async fn slack(config: &Config, inventory: InventoryClient) -> Res<Self> {
        let client = SlackChatClient::new(config, inventory).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<SlackChatClient> for ChatClient {
    fn from(client: SlackChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// User state for the slack socket client.
struct SlackUserState {
    inventory: InventoryClient,
    chat: ChatClient,
}

/// Slack client implementation.
#[derive(Clone)]
struct SlackChatClient {
    pub app_token: SlackApiToken,
    pub bot_token: SlackApiToken,
    pub bot_user_id: String,
    pub client: Arc<FullClient>,
    pub inventory: InventoryClient,
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    pub async fn new(config: &Config, inventory: InventoryClient) -> Res<Self> {
        // Initialize tokens.

        let app_token = SlackApiToken::new(SlackApiTokenValue(config.slack.app_token.clone()));
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack.api_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        // Check the bot token against the configured bot ID.

        let session = client.open_session(&bot_token);
        let bot_user = session.auth_test().await?;
        let bot_user_id = config.slack.bot_id.clone();

        if bot_user.user_id.0 != bot_user_id {
            warn!("Configured bot ID `{}` differs from the token's user ID `{}`.", bot_user_id, bot_user.user_id.0);
        }

        info!("Slack bot user ID: {}", bot_user_id);

        Ok(Self {
            app_token,
            bot_token,
            bot_user_id,
            client,
            inventory,
        })
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    fn bot_user_id(&self) -> &str {
        &self.bot_user_id
    }

    async fn start(&self) -> Void {
        // Initialize the socket mode listener.

        let socket_mode_callbacks = SlackSocketModeListenerCallbacks::new().with_push_events(handle_push_event);

        // Initialize the socket mode listener environment.

        let listener_environment = Arc::new(SlackClientEventsListenerEnvironment::new(self.client.clone()).with_user_state(SlackUserState {
            inventory: self.inventory.clone(),
            chat: ChatClient::from(self.clone()),
        }));

        let socket_mode_listener = Arc::new(SlackClientSocketModeListener::new(
            &SlackClientSocketModeConfig::new(),
            listener_environment.clone(),
            socket_mode_callbacks,
        ));

        // Register an app token to listen for events,
        socket_mode_listener.listen_for(&self.app_token).await?;

        // Start WS connections and wait for Ctrl-C to shutdown.
        socket_mode_listener.serve().await;

        Ok(())
    }

    #[instrument(skip(self, text))]
    async fn send_message(&self, channel_id: &str, text: &str) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string());

        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel_id.to_string()), message);

        let session = self.client.open_session(&self.bot_token);

        let _ = session.chat_post_message(&request).await.map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }
}

// Socket mode listener callbacks for Slack.

/// Handles push events from Slack.
#[instrument(skip_all)]
async fn handle_push_event(event_callback: SlackPushEventCallback, _client: Arc<SlackHyperClient>, states: SlackClientEventsUserState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let event = event_callback.event;
    let states = states.read().await;
    let user_state = states.get_user_state::<SlackUserState>().ok_or(anyhow::anyhow!("Failed to get user state"))?;

    match event {
        SlackEventCallbackBody::Message(slack_message_event) => {
            if is_edit_or_deletion(slack_message_event.subtype.as_ref()) {
                debug!("Skipping message event with subtype {:?}.", slack_message_event.subtype);
                return Ok(());
            }

            if slack_message_event.sender.bot_id.is_some() {
                debug!("Skipping message event from a bot.");
                return Ok(());
            }

            let channel_id = slack_message_event.origin.channel.as_ref().ok_or(anyhow::anyhow!("Failed to get channel ID"))?.0.to_owned();
            let text = slack_message_event.content.as_ref().and_then(|c| c.text.clone());

            interaction::chat_event::handle_chat_event(
                InboundMessage { channel_id, text },
                user_state.inventory.clone(),
                user_state.chat.clone(),
            );
        }
        _ => {
            debug!("Received unhandled push event.")
        }
    }

    Ok(())
}

/// Edit and deletion events; these never get a reply.
fn is_edit_or_deletion(subtype: Option<&SlackMessageEventType>) -> bool {
    matches!(subtype, Some(SlackMessageEventType::MessageChanged | SlackMessageEventType::MessageDeleted))
}

// Tests.
