//! Starter configurations written by `noti init`.

use contracts::{
    ConfigVersion, CustomFormat, DeliverySettings, Destination, FormatSpec, HttpMethod,
    NotiConfig, Redirect, StreamSettings,
};
use indexmap::IndexMap;

const DISCORD_PLACEHOLDER_URL: &str = "https://discord.com/api/webhooks/<CHANNEL_ID>/<WEBHOOK_ID>";

/// Kind of starter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Starter {
    Desktop,
    Webhook,
    CustomWebhook,
}

/// Build a starter configuration
pub fn starter(kind: Starter) -> NotiConfig {
    let destination = match kind {
        Starter::Desktop => Destination::Desktop {
            summary: "Noti".into(),
            persistent: false,
        },
        Starter::Webhook => Destination::Webhook {
            url: DISCORD_PLACEHOLDER_URL.into(),
            format: FormatSpec::Discord,
        },
        Starter::CustomWebhook => Destination::Webhook {
            url: DISCORD_PLACEHOLDER_URL.into(),
            format: FormatSpec::Custom(CustomFormat {
                content_type: "application/json".into(),
                template: r#"{"content": "$(message)"}"#.into(),
                escape: true,
                method: HttpMethod::Post,
                headers: IndexMap::new(),
            }),
        },
    };

    NotiConfig {
        version: ConfigVersion::V1,
        destinations: vec![destination],
        stream: StreamSettings {
            enabled: false,
            matching: None,
            redirect: Some(Redirect::Stdout),
        },
        delivery: DeliverySettings::default(),
    }
}
