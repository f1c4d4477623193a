use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardMarkup, InputFile, MessageId},
};
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

use super::{POST_TEXT, Poster, build_keyboard};
use crate::config::AppConfig;

/// One normalized failure channel for a delivery attempt. Telegram transport
/// errors and API-level `ok: false` rejections both surface as
/// [`teloxide::RequestError`], so the fallback logic branches on a single
/// outcome instead of inspecting HTTP status and response body separately.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("qr fetch failed: {0}")]
    QrFetch(#[from] reqwest::Error),
    #[error("qr fetch returned status {0}")]
    QrStatus(reqwest::StatusCode),
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Sends the promotional post through the Telegram Bot API and pins it.
pub struct TelegramPoster {
    // None when BOT_TOKEN or CHAT_ID is unconfigured; deliver() then no-ops.
    target: Option<(Bot, ChatId)>,
    http: reqwest::Client,
    payment_url: Url,
    keyboard: InlineKeyboardMarkup,
}

impl TelegramPoster {
    pub fn from_config(cfg: &AppConfig) -> Self {
        let target = match (&cfg.token, cfg.chat_id) {
            (Some(token), Some(chat_id)) => {
                let mut bot = Bot::new(token.clone());
                if let Some(api_url) = &cfg.api_url {
                    bot = bot.set_api_url(api_url.clone());
                }
                Some((bot, chat_id))
            }
            _ => None,
        };

        TelegramPoster {
            target,
            http: reqwest::Client::new(),
            payment_url: cfg.payment_url.clone(),
            keyboard: build_keyboard(&cfg.payment_url, cfg.support_url.as_ref()),
        }
    }

    /// The payment link doubles as the QR image source, so it is fetched at
    /// send time rather than bundled with the binary.
    async fn fetch_qr(&self) -> Result<Vec<u8>, DeliveryError> {
        let resp = self.http.get(self.payment_url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(DeliveryError::QrStatus(resp.status()));
        }
        Ok(resp.bytes().await?.to_vec())
    }

    async fn send_photo_post(&self, bot: &Bot, chat_id: ChatId) -> Result<MessageId, DeliveryError> {
        let qr = self.fetch_qr().await?;
        let photo = InputFile::memory(qr).file_name("qr.png");
        let msg = bot
            .send_photo(chat_id, photo)
            .caption(POST_TEXT)
            .reply_markup(self.keyboard.clone())
            .await?;
        Ok(msg.id)
    }

    async fn send_text_post(&self, bot: &Bot, chat_id: ChatId) -> Result<MessageId, DeliveryError> {
        let msg = bot
            .send_message(chat_id, POST_TEXT)
            .reply_markup(self.keyboard.clone())
            .await?;
        Ok(msg.id)
    }

    async fn pin(&self, bot: &Bot, chat_id: ChatId, message_id: MessageId) {
        // A failed pin does not demote the delivery; the post is already up.
        match bot
            .pin_chat_message(chat_id, message_id)
            .disable_notification(true)
            .await
        {
            Ok(_) => info!(message_id = message_id.0, "post pinned"),
            Err(e) => warn!(message_id = message_id.0, "pin failed: {e}"),
        }
    }
}

#[async_trait]
impl Poster for TelegramPoster {
    async fn deliver(&self) {
        let Some((bot, chat_id)) = &self.target else {
            warn!("delivery skipped: BOT_TOKEN or CHAT_ID not configured");
            return;
        };

        // Prefer the QR photo for the nicer rendering; any failure on that
        // path falls back to a plain text post with the same keyboard.
        let message_id = match self.send_photo_post(bot, *chat_id).await {
            Ok(id) => {
                info!(message_id = id.0, "photo post sent");
                Some(id)
            }
            Err(e) => {
                warn!("photo post failed, falling back to text: {e}");
                match self.send_text_post(bot, *chat_id).await {
                    Ok(id) => {
                        info!(message_id = id.0, "text post sent");
                        Some(id)
                    }
                    Err(e) => {
                        error!("text post failed: {e}");
                        None
                    }
                }
            }
        };

        if let Some(id) = message_id {
            self.pin(bot, *chat_id, id).await;
        }
    }
}
