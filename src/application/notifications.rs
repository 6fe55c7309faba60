// src/application/notifications.rs
//
// Turns domain events into transient notifications for the webview.
// There is no retry and no fatal state: every outcome is one toast.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::AssetKind;
use crate::events::{
    AssetTransferred, EventBus, FavoriteToggled, FeePaid, NftBurned, NftCollectionDeployed,
    NftMinted, OperationFailed, TokenDeployed, TokensBurned, TokensMinted,
};

/// Name of the webview event carrying a [`Notification`]
pub const NOTIFICATION_EVENT: &str = "notification";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: String) -> Self {
        Self {
            level: NotificationLevel::Success,
            message,
        }
    }

    pub fn info(message: String) -> Self {
        Self {
            level: NotificationLevel::Info,
            message,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            level: NotificationLevel::Error,
            message,
        }
    }
}

/// Where notifications go (the Tauri window in the desktop build)
pub type NotificationSink = Arc<dyn Fn(Notification) + Send + Sync>;

/// Subscribe `sink` to every success and failure event
pub fn register_notification_handlers(bus: &EventBus, sink: NotificationSink) {
    let s = sink.clone();
    bus.subscribe::<FeePaid, _>(move |e| {
        s(Notification::success(format!(
            "Payment successful! {} {} paid for {}.",
            e.amount, e.currency, e.scope
        )))
    });

    let s = sink.clone();
    bus.subscribe::<TokenDeployed, _>(move |e| {
        s(Notification::success(format!("Successfully deployed {} token!", e.name)))
    });

    let s = sink.clone();
    bus.subscribe::<NftCollectionDeployed, _>(move |e| {
        s(Notification::success(format!("Successfully deployed {} collection!", e.name)))
    });

    let s = sink.clone();
    bus.subscribe::<TokensMinted, _>(move |e| {
        s(Notification::success(format!(
            "Successfully minted {} {} tokens!",
            e.amount, e.symbol
        )))
    });

    let s = sink.clone();
    bus.subscribe::<TokensBurned, _>(move |e| {
        s(Notification::success(format!(
            "Successfully burned {} {} tokens!",
            e.amount, e.symbol
        )))
    });

    let s = sink.clone();
    bus.subscribe::<NftMinted, _>(move |e| {
        s(Notification::success(format!("Successfully minted {} NFT!", e.collection_name)))
    });

    let s = sink.clone();
    bus.subscribe::<NftBurned, _>(move |e| {
        s(Notification::success(format!("Successfully burned token #{}", e.token_id)))
    });

    let s = sink.clone();
    bus.subscribe::<AssetTransferred, _>(move |e| {
        let message = match e.kind {
            AssetKind::Token => "Tokens sent successfully!",
            AssetKind::NftCollection => "NFT sent successfully!",
        };
        s(Notification::success(message.to_string()))
    });

    let s = sink.clone();
    bus.subscribe::<FavoriteToggled, _>(move |e| {
        let message = if e.is_favorite {
            "Added to favorites"
        } else {
            "Removed from favorites"
        };
        s(Notification::info(message.to_string()))
    });

    bus.subscribe::<OperationFailed, _>(move |e| sink(Notification::error(e.message.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::OperationKind;
    use std::sync::Mutex;

    fn collecting_bus() -> (EventBus, Arc<Mutex<Vec<Notification>>>) {
        let bus = EventBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink_store = received.clone();
        register_notification_handlers(
            &bus,
            Arc::new(move |n: Notification| sink_store.lock().unwrap().push(n)),
        );
        (bus, received)
    }

    #[test]
    fn test_success_messages() {
        let (bus, received) = collecting_bus();

        bus.emit(TokenDeployed::new(
            "0xabc".to_string(),
            "Magic".to_string(),
            "MGC".to_string(),
        ));
        bus.emit(TokensMinted::new(
            "0xabc".to_string(),
            "MGC".to_string(),
            "10".to_string(),
        ));
        bus.emit(NftBurned::new("0xdef".to_string(), "7".to_string()));

        let received = received.lock().unwrap();
        assert_eq!(
            *received,
            vec![
                Notification::success("Successfully deployed Magic token!".to_string()),
                Notification::success("Successfully minted 10 MGC tokens!".to_string()),
                Notification::success("Successfully burned token #7".to_string()),
            ]
        );
    }

    #[test]
    fn test_failure_message_is_forwarded_verbatim() {
        let (bus, received) = collecting_bus();

        bus.emit(OperationFailed::new(
            OperationKind::Transfer,
            Some("0xabc".to_string()),
            "Failed to send: caller is not token owner".to_string(),
        ));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].level, NotificationLevel::Error);
        assert_eq!(received[0].message, "Failed to send: caller is not token owner");
    }

    #[test]
    fn test_transfer_message_depends_on_kind() {
        let (bus, received) = collecting_bus();
        bus.emit(AssetTransferred::new(
            AssetKind::NftCollection,
            "0xdef".to_string(),
            "0x01".to_string(),
            "3".to_string(),
        ));
        assert_eq!(received.lock().unwrap()[0].message, "NFT sent successfully!");
    }

    #[test]
    fn test_level_wire_format() {
        let json = serde_json::to_string(&Notification::info("hi".to_string())).unwrap();
        assert_eq!(json, r#"{"level":"info","message":"hi"}"#);
    }
}
