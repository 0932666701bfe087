use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;
use serde_json::json;
use tracing::{instrument, Level};

use super::{format_message, split_message, Notify};
use crate::{fetch::make_client, grade::GradeRecord};

pub const API_BASE: &str = "https://discord.com/api/v10";
/// Discord rejects message contents longer than this many characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Sends grade notifications as a direct message from a bot account.
#[derive(Clone)]
pub struct Discord {
    token: Option<String>,
    user_id: Option<u64>,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct DmChannel {
    id: String,
}

impl Discord {
    pub fn new(token: Option<String>, user_id: Option<u64>) -> Self {
        Self {
            token,
            user_id,
            api_base: API_BASE.to_owned(),
        }
    }

    #[cfg(test)]
    fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_owned();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_base)
    }

    #[instrument(skip(self, token, message), level = Level::TRACE)]
    async fn send(&self, token: &str, user_id: u64, message: &str) -> crate::Result<()> {
        let client = make_client()?;
        let authorization = format!("Bot {token}");

        let channel: DmChannel = client
            .post(self.endpoint("users/@me/channels"))
            .header(AUTHORIZATION, &authorization)
            .json(&json!({ "recipient_id": user_id.to_string() }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let messages_url = self.endpoint(&format!("channels/{}/messages", channel.id));
        for chunk in split_message(message, MESSAGE_LIMIT) {
            post_message(&client, &messages_url, &authorization, &chunk).await?;
        }
        Ok(())
    }
}

async fn post_message(
    client: &Client,
    url: &str,
    authorization: &str,
    content: &str,
) -> Result<(), reqwest::Error> {
    client
        .post(url)
        .header(AUTHORIZATION, authorization)
        .json(&json!({ "content": content }))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

impl Notify for Discord {
    async fn notify(&self, grades: &[GradeRecord]) -> bool {
        if grades.is_empty() {
            log::info!("No new grades to notify about");
            return true;
        }
        let (Some(token), Some(user_id)) = (self.token.as_deref(), self.user_id) else {
            log::error!("DISCORD_TOKEN and DISCORD_USER_ID must both be set to send notifications");
            return false;
        };

        match self.send(token, user_id, &format_message(grades)).await {
            Ok(()) => {
                log::info!("Sent a notification to Discord user {user_id}");
                true
            }
            Err(e) => {
                log::error!("Failed to send the Discord notification: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        net::SocketAddr,
        sync::{Arc, Mutex},
    };

    use axum::{
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::Value;
    use tokio::net::TcpListener;

    use super::*;

    const TOKEN: &str = "bot-token";
    const USER_ID: u64 = 123_456_789;

    #[derive(Default)]
    struct Sent {
        recipients: Vec<String>,
        messages: Vec<(String, String)>,
    }

    type Shared = Arc<Mutex<Sent>>;

    fn authorized(headers: &HeaderMap) -> bool {
        headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bot bot-token")
    }

    async fn open_dm(
        State(sent): State<Shared>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Result<Json<Value>, StatusCode> {
        if !authorized(&headers) {
            return Err(StatusCode::UNAUTHORIZED);
        }
        let recipient = body["recipient_id"].as_str().unwrap_or_default().to_owned();
        sent.lock().unwrap().recipients.push(recipient);
        Ok(Json(json!({ "id": "42", "type": 1 })))
    }

    async fn create_message(
        State(sent): State<Shared>,
        Path(channel): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> StatusCode {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED;
        }
        let content = body["content"].as_str().unwrap_or_default().to_owned();
        sent.lock().unwrap().messages.push((channel, content));
        StatusCode::OK
    }

    async fn spawn_fake_discord() -> (SocketAddr, Shared) {
        let sent = Shared::default();
        let app = Router::new()
            .route("/users/@me/channels", post(open_dm))
            .route("/channels/:channel/messages", post(create_message))
            .with_state(Arc::clone(&sent));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (addr, sent)
    }

    #[tokio::test]
    async fn test_notify() {
        let (addr, sent) = spawn_fake_discord().await;
        let discord = Discord::new(Some(TOKEN.into()), Some(USER_ID))
            .with_api_base(&format!("http://{addr}/"));
        let grades = [GradeRecord::new("CS101", "exam", "5.0", "2024-01-10")];
        assert!(discord.notify(&grades).await);

        let sent = sent.lock().unwrap();
        assert_eq!(sent.recipients, ["123456789"]);
        assert_eq!(sent.messages.len(), 1);
        assert_eq!(sent.messages[0].0, "42");
        assert_eq!(sent.messages[0].1, format_message(&grades));
    }

    #[tokio::test]
    async fn test_long_message_is_split() {
        let (addr, sent) = spawn_fake_discord().await;
        let discord = Discord::new(Some(TOKEN.into()), Some(USER_ID))
            .with_api_base(&format!("http://{addr}"));
        let grades: Vec<_> = (0..60)
            .map(|i| GradeRecord::new(format!("Przedmiot {i}"), "Wykład", "4.5", "2024-01-10"))
            .collect();
        assert!(discord.notify(&grades).await);

        let sent = sent.lock().unwrap();
        assert!(sent.messages.len() > 1);
        assert!(sent
            .messages
            .iter()
            .all(|(_, m)| m.chars().count() <= MESSAGE_LIMIT));
    }

    #[tokio::test]
    async fn test_rejected_token() {
        let (addr, sent) = spawn_fake_discord().await;
        let discord = Discord::new(Some("stolen".into()), Some(USER_ID))
            .with_api_base(&format!("http://{addr}"));
        let grades = [GradeRecord::new("CS101", "exam", "5.0", "2024-01-10")];
        assert!(!discord.notify(&grades).await);
        assert!(sent.lock().unwrap().messages.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let grades = [GradeRecord::new("CS101", "exam", "5.0", "2024-01-10")];
        assert!(!Discord::new(None, Some(USER_ID)).notify(&grades).await);
        assert!(!Discord::new(Some(TOKEN.into()), None).notify(&grades).await);
    }

    #[tokio::test]
    async fn test_nothing_to_send() {
        assert!(Discord::new(None, None).notify(&[]).await);
    }
}
