#![cfg(test)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use snipeit_bot::{
    base::{
        responses::{DEFAULT_RESPONSE, HELP_RESPONSE},
        types::{AssetStatus, AssetSummary, InboundMessage, Lookup, LookupError, LookupResult, Void},
    },
    interaction::chat_event::{build_reply, process_message},
    service::{
        chat::{ChatClient, GenericChatClient},
        inventory::{GenericInventoryClient, InventoryClient},
    },
};

const BOT_ID: &str = "U0BOT";
const CHANNEL_ID: &str = "C01TEST";

// Mocks.

mock! {
    pub Chat {}

    #[async_trait]
    impl GenericChatClient for Chat {
        fn bot_user_id(&self) -> &str;
        async fn start(&self) -> Void;
        async fn send_message(&self, channel_id: &str, text: &str) -> Void;
    }
}

mock! {
    pub Inventory {}

    #[async_trait]
    impl GenericInventoryClient for Inventory {
        async fn lookup_user_assets(&self, username: &str) -> LookupResult;
        async fn lookup_asset_by_serial(&self, serial: &str) -> LookupResult;
        async fn lookup_asset_by_tag(&self, tag: &str) -> LookupResult;
    }
}

/// A chat mock that records every message it is asked to send.
fn get_recording_chat(sent: Arc<Mutex<Vec<(String, String)>>>) -> ChatClient {
    let mut mock = MockChat::new();

    mock.expect_bot_user_id().return_const(BOT_ID.to_string());
    mock.expect_send_message().returning(move |channel_id, text| {
        sent.lock().unwrap().push((channel_id.to_string(), text.to_string()));
        Ok(())
    });

    ChatClient::new(Arc::new(mock))
}

/// A chat mock that fails the test if anything is sent.
fn get_silent_chat() -> ChatClient {
    let mut mock = MockChat::new();

    mock.expect_bot_user_id().return_const(BOT_ID.to_string());
    mock.expect_send_message().never();

    ChatClient::new(Arc::new(mock))
}

/// An inventory mock that must not be queried.
fn get_idle_inventory() -> InventoryClient {
    let mut mock = MockInventory::new();

    mock.expect_lookup_user_assets().never();
    mock.expect_lookup_asset_by_serial().never();
    mock.expect_lookup_asset_by_tag().never();

    InventoryClient::new(Arc::new(mock))
}

fn asset(id: u64, status: AssetStatus, assignee: Option<&str>) -> AssetSummary {
    AssetSummary {
        id,
        asset_tag: format!("0000{id}"),
        serial: format!("C02SERIAL{id}"),
        model_name: "MacBook Pro 14".to_string(),
        status,
        assigned_to_name: assignee.map(str::to_string),
        link: format!("https://assets.example.com/hardware/{id}"),
    }
}

fn message(text: Option<&str>) -> InboundMessage {
    InboundMessage {
        channel_id: CHANNEL_ID.to_string(),
        text: text.map(str::to_string),
    }
}

#[tokio::test]
async fn test_unaddressed_messages_get_no_reply() {
    let chat = get_silent_chat();
    let inventory = get_idle_inventory();

    for text in [Some("user jdoe"), Some("hey <@U0BOT> help"), Some("<@U0OTHER> help"), None] {
        process_message(message(text), &inventory, &chat).await.unwrap();
    }
}

#[tokio::test]
async fn test_bot_id_comes_from_chat_client() {
    let mut mock = MockChat::new();
    mock.expect_bot_user_id().times(1).return_const("U0OTHER".to_string());
    mock.expect_send_message().withf(|channel_id, text| channel_id == CHANNEL_ID && text == HELP_RESPONSE).times(1).returning(|_, _| Ok(()));
    let chat = ChatClient::new(Arc::new(mock));

    process_message(message(Some("<@U0OTHER> help")), &get_idle_inventory(), &chat).await.unwrap();
}

#[tokio::test]
async fn test_help_ignores_trailing_text() {
    let inventory = get_idle_inventory();

    assert_eq!(build_reply(BOT_ID, Some("<@U0BOT> help"), &inventory).await.as_deref(), Some(HELP_RESPONSE));
    assert_eq!(build_reply(BOT_ID, Some("<@U0BOT> HELP user jdoe"), &inventory).await.as_deref(), Some(HELP_RESPONSE));
}

#[tokio::test]
async fn test_unknown_command_gets_default_reply() {
    let inventory = get_idle_inventory();

    assert_eq!(build_reply(BOT_ID, Some("<@U0BOT> hello there"), &inventory).await.as_deref(), Some(DEFAULT_RESPONSE));
    assert_eq!(build_reply(BOT_ID, Some("<@U0BOT>"), &inventory).await.as_deref(), Some(DEFAULT_RESPONSE));
}

#[tokio::test]
async fn test_missing_arguments_get_error_reply() {
    let inventory = get_idle_inventory();

    let user = build_reply(BOT_ID, Some("<@U0BOT> user"), &inventory).await.unwrap();
    let serial = build_reply(BOT_ID, Some("<@U0BOT> serial"), &inventory).await.unwrap();
    let asset = build_reply(BOT_ID, Some("<@U0BOT> asset   "), &inventory).await.unwrap();

    assert!(user.contains("please provide a username"));
    assert!(serial.contains("please provide a serial number"));
    assert!(asset.contains("please provide an asset tag"));
}

#[tokio::test]
async fn test_user_not_found() {
    let mut mock = MockInventory::new();
    mock.expect_lookup_user_assets().withf(|username| username == "nobody").times(1).returning(|_| Ok(Lookup::NotFound));
    let inventory = InventoryClient::new(Arc::new(mock));

    let reply = build_reply(BOT_ID, Some("<@U0BOT> user nobody"), &inventory).await.unwrap();

    assert!(reply.contains("Sorry"));
    assert!(reply.contains("`nobody`"));
    assert!(!reply.contains("*Model:*"));
}

#[tokio::test]
async fn test_user_with_two_assets_is_sent_to_channel() {
    let mut mock = MockInventory::new();
    mock.expect_lookup_user_assets().withf(|username| username == "jdoe").times(1).returning(|_| {
        Ok(Lookup::UserAssets {
            user_name: "Jane Doe".to_string(),
            total: 2,
            assets: vec![asset(1, AssetStatus::Deployed, Some("Jane Doe")), asset(2, AssetStatus::Deployed, Some("Jane Doe"))],
        })
    });
    let inventory = InventoryClient::new(Arc::new(mock));

    let sent = Arc::new(Mutex::new(Vec::new()));
    let chat = get_recording_chat(sent.clone());

    process_message(message(Some("<@U0BOT> user JDoe")), &inventory, &chat).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);

    let (channel_id, text) = &sent[0];
    assert_eq!(channel_id, CHANNEL_ID);
    assert!(text.contains("Returned *2* results for Jane Doe"));
    assert_eq!(text.matches("*Model:*").count(), 2);
    assert_eq!(text.matches("*Serial Number:*").count(), 2);
    assert_eq!(text.matches("*Asset Tag:*").count(), 2);
    assert!(text.contains("https://assets.example.com/hardware/1\n"));
    assert!(text.contains("https://assets.example.com/hardware/1/checkin"));
    assert!(text.contains("https://assets.example.com/hardware/2\n"));
    assert!(text.contains("https://assets.example.com/hardware/2/checkin"));
}

#[tokio::test]
async fn test_serial_deployed() {
    let mut mock = MockInventory::new();
    mock.expect_lookup_asset_by_serial()
        .withf(|serial| serial == "c02serial7")
        .times(1)
        .returning(|_| Ok(Lookup::BySerial(vec![asset(7, AssetStatus::Deployed, Some("Jane Doe"))])));
    let inventory = InventoryClient::new(Arc::new(mock));

    let reply = build_reply(BOT_ID, Some("<@U0BOT> serial C02SERIAL7"), &inventory).await.unwrap();

    assert!(reply.contains("Checked out to `Jane Doe`"));
    assert!(reply.contains("https://assets.example.com/hardware/7/checkin"));
}

#[tokio::test]
async fn test_asset_tag_not_found() {
    let mut mock = MockInventory::new();
    mock.expect_lookup_asset_by_tag().times(1).returning(|_| Ok(Lookup::NotFound));
    let inventory = InventoryClient::new(Arc::new(mock));

    let reply = build_reply(BOT_ID, Some("<@U0BOT> asset 404404"), &inventory).await.unwrap();

    assert_eq!(reply, "Sorry, couldn't find anything for asset tag `404404`.");
}

#[tokio::test]
async fn test_lookup_failure_is_reported_not_raised() {
    let mut mock = MockInventory::new();
    mock.expect_lookup_asset_by_tag().times(1).returning(|_| {
        Err(LookupError::Shape {
            endpoint: "hardware/bytag/0101".to_string(),
            detail: "asset 3 has no model name".to_string(),
        })
    });
    let inventory = InventoryClient::new(Arc::new(mock));

    let sent = Arc::new(Mutex::new(Vec::new()));
    let chat = get_recording_chat(sent.clone());

    process_message(message(Some("<@U0BOT> asset 0101")), &inventory, &chat).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("failed"));
    assert!(sent[0].1.contains("`0101`"));
}

#[tokio::test]
async fn test_same_command_twice_is_identical() {
    let mut mock = MockInventory::new();
    mock.expect_lookup_asset_by_tag()
        .times(2)
        .returning(|_| Ok(Lookup::ByTag(asset(9, AssetStatus::Deployable, None))));
    let inventory = InventoryClient::new(Arc::new(mock));

    let sent = Arc::new(Mutex::new(Vec::new()));
    let chat = get_recording_chat(sent.clone());

    process_message(message(Some("<@U0BOT> asset 00009")), &inventory, &chat).await.unwrap();
    process_message(message(Some("<@U0BOT> asset 00009")), &inventory, &chat).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], sent[1]);
    assert!(sent[0].1.contains("/hardware/9/checkout"));
}
