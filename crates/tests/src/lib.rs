//! # Integration Tests
//!
//! Cross-crate end-to-end tests.
//!
//! Covers:
//! - Config text through the loader into the shared data model
//! - Stream filter -> dispatcher -> mock HTTP endpoints

#[cfg(test)]
mod contract_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{Destination, FormatSpec, HttpMethod, Redirect};

    #[test]
    fn test_full_config_loads() {
        let toml = r#"
[[destinations]]
type = "webhook"
url = "https://discord.com/api/webhooks/1/abc"
format = "discord"

[[destinations]]
type = "webhook"
url = "https://example.com/hook"

[destinations.format.custom]
content_type = "application/json"
template = '{"text": "$(message)"}'
escape = true
method = "PUT"

[destinations.format.custom.headers]
Authorization = "Bearer t"

[[destinations]]
type = "desktop"
persistent = true

[stream]
enabled = true
matching = "^ERROR: (.*)"
redirect = "stderr"

[delivery]
timeout_secs = 3
"#;

        let config = ConfigLoader::load_from_str(toml, ConfigFormat::Toml).unwrap();

        assert_eq!(config.destinations.len(), 3);
        match &config.destinations[1] {
            Destination::Webhook {
                format: FormatSpec::Custom(custom),
                ..
            } => {
                assert_eq!(custom.method, HttpMethod::Put);
                assert_eq!(custom.headers["Authorization"], "Bearer t");
            }
            other => panic!("unexpected destination: {other:?}"),
        }
        assert_eq!(
            config.destinations[2],
            Destination::Desktop {
                summary: "noti".into(),
                persistent: true
            }
        );
        assert_eq!(config.stream.redirect, Some(Redirect::Stderr));
        assert_eq!(config.delivery.timeout_secs, 3);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{DeliverySettings, Destination, FormatSpec, Message, SendError};
    use dispatcher::create_dispatcher;
    use futures::StreamExt;
    use mockito::Matcher;
    use stream_filter::{StreamConfig, StreamFilter};
    use tokio::task::JoinSet;

    /// End-to-end: stdin lines -> StreamFilter -> Dispatcher -> webhooks
    ///
    /// Verifies the full data flow:
    /// 1. Only matching lines become messages, using the participating group
    /// 2. Every line is echoed to the redirect target in input order
    /// 3. Each message reaches every webhook in its own format
    #[tokio::test]
    async fn test_e2e_stream_to_webhooks() {
        let mut server = mockito::Server::new_async().await;

        let discord_warn = server
            .mock("POST", "/discord")
            .match_body(Matcher::Json(
                serde_json::json!({"content": "WARN: disk \"sda\" low"}),
            ))
            .with_status(204)
            .expect(1)
            .create_async()
            .await;
        let discord_error = server
            .mock("POST", "/discord")
            .match_body(Matcher::Json(serde_json::json!({"content": "ERROR: crash"})))
            .with_status(204)
            .expect(1)
            .create_async()
            .await;
        let custom = server
            .mock("POST", "/custom")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Regex(r#"^\{"alert": "(WARN|ERROR): .*"\}$"#.into()))
            .with_status(200)
            .expect(2)
            .create_async()
            .await;

        let toml = format!(
            r#"
[[destinations]]
type = "webhook"
url = "{base}/discord"
format = "discord"

[[destinations]]
type = "webhook"
url = "{base}/custom"

[destinations.format.custom]
content_type = "application/json"
template = '{{"alert": "$(message)"}}'
escape = true

[stream]
enabled = true
matching = '^(WARN:.*)|^(ERROR:.*)'
redirect = "stdout"
"#,
            base = server.url()
        );
        let config = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();

        let stream_config = StreamConfig::from_settings(&config.stream).unwrap();
        let dispatcher = create_dispatcher(config.destinations.clone(), config.delivery.clone());
        let dispatcher = Arc::new(dispatcher.unwrap());

        let input = "INFO: start\nWARN: disk \"sda\" low\nINFO: still going\nERROR: crash\n";
        let mut echo = Vec::new();
        let mut reports = Vec::new();

        {
            let filter = StreamFilter::new(input.as_bytes(), &stream_config, Some(&mut echo));
            let mut messages = Box::pin(filter.into_stream());
            let mut in_flight = JoinSet::new();

            while let Some(message) = messages.next().await {
                let message = message.unwrap();
                let dispatcher = Arc::clone(&dispatcher);
                in_flight.spawn(async move { dispatcher.dispatch(&message).await });
            }
            while let Some(report) = in_flight.join_next().await {
                reports.push(report.unwrap());
            }
        }

        assert_eq!(String::from_utf8(echo).unwrap(), input);
        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert_eq!(report.len(), 2);
            assert_eq!(report.succeeded(), 2, "report: {report:?}");
        }

        discord_warn.assert_async().await;
        discord_error.assert_async().await;
        custom.assert_async().await;
    }

    /// A destination that never answers times out without holding up the
    /// others, and the report keeps destination order.
    #[tokio::test]
    async fn test_e2e_slow_destination_is_isolated() {
        let silent = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let silent_addr = silent.local_addr().unwrap();
        let silent_task = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = silent.accept().await {
                held.push(socket);
            }
        });

        let mut server = mockito::Server::new_async().await;
        let fast = server
            .mock("POST", "/")
            .match_header("content-type", "text/plain")
            .match_body("deploy done")
            .with_status(200)
            .create_async()
            .await;

        let destinations = vec![
            Destination::Webhook {
                url: format!("http://{silent_addr}/"),
                format: FormatSpec::PlainText,
            },
            Destination::Webhook {
                url: server.url(),
                format: FormatSpec::PlainText,
            },
        ];
        let delivery = DeliverySettings {
            timeout_secs: 1,
            ..Default::default()
        };

        let dispatcher = create_dispatcher(destinations, delivery).unwrap();
        let report = tokio::time::timeout(
            Duration::from_secs(10),
            dispatcher.dispatch(&Message::from("deploy done")),
        )
        .await
        .unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.results()[0].error, Some(SendError::Timeout));
        assert!(report.results()[1].ok);
        assert!(!report.all_failed());
        fast.assert_async().await;

        silent_task.abort();
    }

    /// Every destination rejecting the message yields an all-failed report
    #[tokio::test]
    async fn test_e2e_all_destinations_fail() {
        let mut server = mockito::Server::new_async().await;
        let rejected = server
            .mock("POST", Matcher::Any)
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let destinations = vec![
            Destination::Webhook {
                url: format!("{}/a", server.url()),
                format: FormatSpec::GoogleChat,
            },
            Destination::Webhook {
                url: format!("{}/b", server.url()),
                format: FormatSpec::Discord,
            },
        ];

        let dispatcher = create_dispatcher(destinations, DeliverySettings::default()).unwrap();
        let report = dispatcher.dispatch(&Message::from("nobody home")).await;

        assert!(report.all_failed());
        assert!(report
            .iter()
            .all(|r| r.error == Some(SendError::HttpStatus { status: 503 })));
        rejected.assert_async().await;
    }
}
