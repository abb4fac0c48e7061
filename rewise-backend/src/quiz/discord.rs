//! Discord webhook delivery.

use super::{ChatMessage, ChatNotifier};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{Value, json};

/// Discord embed limits.
const MAX_TITLE_CHARS: usize = 256;
const MAX_DESCRIPTION_CHARS: usize = 4096;

pub const QUIZ_COLOR: u32 = 0x5865F2;

pub struct DiscordWebhook {
    url: String,
    client: reqwest::Client,
}

impl DiscordWebhook {
    pub fn new(config: &Config) -> Result<Self, String> {
        Ok(Self {
            url: config.discord_webhook_url.clone(),
            client: crate::http::build_client(config.http_timeout_secs)?,
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Webhook payload carrying the message as a single embed.
fn embed_payload(message: &ChatMessage) -> Value {
    json!({
        "embeds": [{
            "title": truncate(&message.title, MAX_TITLE_CHARS),
            "description": truncate(&message.body, MAX_DESCRIPTION_CHARS),
            "color": message.color,
            "footer": { "text": message.footer },
        }]
    })
}

#[async_trait]
impl ChatNotifier for DiscordWebhook {
    async fn post(&self, message: &ChatMessage) -> Result<(), String> {
        let resp = self
            .client
            .post(&self.url)
            .json(&embed_payload(message))
            .send()
            .await
            .map_err(|e| format!("Discord webhook unavailable: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Discord webhook HTTP {}: {}", status, body));
        }

        log::info!("[DISCORD] Posted '{}'", message.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_payload() {
        let payload = embed_payload(&ChatMessage {
            title: "📚 Rewise MCQs (2026-10-16) - Traits".to_string(),
            body: "Q1: What?".to_string(),
            color: QUIZ_COLOR,
            footer: "5 questions".to_string(),
        });
        let embed = &payload["embeds"][0];
        assert_eq!(embed["title"], "📚 Rewise MCQs (2026-10-16) - Traits");
        assert_eq!(embed["description"], "Q1: What?");
        assert_eq!(embed["color"], QUIZ_COLOR);
        assert_eq!(embed["footer"]["text"], "5 questions");
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(MAX_DESCRIPTION_CHARS + 100);
        let payload = embed_payload(&ChatMessage {
            title: "t".to_string(),
            body,
            color: 0,
            footer: String::new(),
        });
        let description = payload["embeds"][0]["description"].as_str().unwrap();
        assert_eq!(description.chars().count(), MAX_DESCRIPTION_CHARS);
        assert!(description.ends_with('…'));
    }
}
