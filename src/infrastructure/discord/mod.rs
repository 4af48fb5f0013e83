//! REST adapter for Discord, the shipped chat platform.
//!
//! One client lives for the whole process. `connect` performs the identity
//! handshake; until it completes, `identity()` stays `None` and order intake
//! fails fast instead of using an unauthenticated handle.

pub mod types;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::domain::entities::upload::StoredUpload;
use crate::interfaces::gateways::chat::{
    ChatPlatform, CreatedChannel, Mention, OrderSummary, PlatformError, PlatformGuild,
    PlatformUser, TicketChannelSpec,
};
use types::{
    ApiErrorBody, AttachmentRef, Channel, CreateChannelRequest, CreateMessagePayload, Embed,
    EmbedField, EmbedFooter, Guild, PermissionOverwrite, User, GUILD_TEXT, OVERWRITE_MEMBER,
    OVERWRITE_ROLE, READ_MESSAGE_HISTORY, SEND_MESSAGES, VIEW_CHANNEL,
};

const API_BASE: &str = "https://discord.com/api/v10";

const EMBED_COLOR: u32 = 0xffaa00;
const GREETING: &str =
    "ขอบคุณที่สั่งซื้อสินค้ากับเรา Admin จะรีบติดต่อกลับให้เร็วที่สุดครับ";

pub struct DiscordClient {
    http: reqwest::Client,
    token: String,
    identity: OnceCell<PlatformUser>,
}

impl DiscordClient {
    pub fn new(token: impl Into<String>) -> Self {
        DiscordClient {
            http: reqwest::Client::new(),
            token: token.into(),
            identity: OnceCell::new(),
        }
    }

    /// Identity handshake: fetches the bot's own account and opens the
    /// readiness gate. Called once at startup.
    pub async fn connect(&self) -> Result<PlatformUser, PlatformError> {
        let me: User = self.get_json("/users/@me").await?;
        let user = PlatformUser {
            id: me.id,
            username: me.username,
        };
        tracing::info!("🤖 Discord bot logged in as {}", user.username);
        let _ = self.identity.set(user.clone());
        Ok(user)
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PlatformError> {
        let response = self
            .http
            .get(format!("{API_BASE}{path}"))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PlatformError> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| PlatformError::Network(e.to_string()))
        } else {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| status.to_string());
            Err(PlatformError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn overwrites(
        &self,
        guild: &PlatformGuild,
        customer_id: Option<&str>,
    ) -> Result<Vec<PermissionOverwrite>, PlatformError> {
        let bot = self.identity.get().ok_or(PlatformError::NotReady)?;

        let mut overwrites = vec![
            // Hide the ticket from the default role; the guild id doubles as
            // the @everyone role id.
            PermissionOverwrite::deny(guild.id.clone(), OVERWRITE_ROLE, VIEW_CHANNEL),
            PermissionOverwrite::allow(
                bot.id.clone(),
                OVERWRITE_MEMBER,
                VIEW_CHANNEL | SEND_MESSAGES,
            ),
        ];

        if let Some(customer) = customer_id {
            overwrites.push(PermissionOverwrite::allow(
                customer,
                OVERWRITE_MEMBER,
                VIEW_CHANNEL | SEND_MESSAGES | READ_MESSAGE_HISTORY,
            ));
        }

        Ok(overwrites)
    }

    fn summary_embed(channel_id: &str, summary: &OrderSummary) -> Embed {
        Embed {
            title: "🛍️ New Order Ticket".to_string(),
            description: format!("Channel for order: **{}**", summary.customer_name),
            color: EMBED_COLOR,
            timestamp: chrono::Utc::now().to_rfc3339(),
            fields: vec![
                EmbedField::inline(
                    "👤 Customer",
                    format!("{} ({})", summary.customer_name, summary.customer_display),
                ),
                EmbedField::inline("💰 Price", summary.price.clone()),
                EmbedField::inline("💳 Payment", summary.payment_method.clone()),
                EmbedField::inline("📦 Service", summary.service.clone()),
                EmbedField::inline("🧩 Part", summary.part.clone()),
                EmbedField::inline("🆔 Channel", format!("<#{channel_id}>")),
            ],
            footer: EmbedFooter {
                text: "Skinshop Order System".to_string(),
            },
        }
    }
}

#[async_trait]
impl ChatPlatform for DiscordClient {
    fn identity(&self) -> Option<PlatformUser> {
        self.identity.get().cloned()
    }

    async fn fetch_guild(&self, guild_id: &str) -> Result<PlatformGuild, PlatformError> {
        match self.get_json::<Guild>(&format!("/guilds/{guild_id}")).await {
            Ok(guild) => Ok(PlatformGuild {
                id: guild.id,
                name: guild.name,
            }),
            Err(PlatformError::Api { status: 404, .. }) => Err(PlatformError::NotFound {
                entity: "guild",
                id: guild_id.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn fetch_user(&self, user_id: &str) -> Result<Option<PlatformUser>, PlatformError> {
        match self.get_json::<User>(&format!("/users/{user_id}")).await {
            Ok(user) => Ok(Some(PlatformUser {
                id: user.id,
                username: user.username,
            })),
            Err(PlatformError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_ticket_channel(
        &self,
        guild: &PlatformGuild,
        spec: TicketChannelSpec,
    ) -> Result<CreatedChannel, PlatformError> {
        let request = CreateChannelRequest {
            name: spec.name,
            kind: GUILD_TEXT,
            parent_id: spec.parent_id,
            permission_overwrites: self.overwrites(guild, spec.customer_id.as_deref())?,
        };

        let response = self
            .http
            .post(format!("{API_BASE}/guilds/{}/channels", guild.id))
            .header("Authorization", self.auth_header())
            .json(&request)
            .send()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        let channel: Channel = Self::decode(response).await?;
        Ok(CreatedChannel {
            id: channel.id,
            name: channel.name,
        })
    }

    async fn send_order_summary(
        &self,
        channel: &CreatedChannel,
        mention: Mention,
        summary: OrderSummary,
        attachments: &[StoredUpload],
    ) -> Result<(), PlatformError> {
        let user_tag = match mention {
            Mention::User(id) => format!("<@{id}>"),
            Mention::Here => "@here".to_string(),
        };

        let payload = CreateMessagePayload {
            content: format!("สวัสดีครับ {user_tag} ! {GREETING}"),
            embeds: vec![Self::summary_embed(&channel.id, &summary)],
            attachments: attachments
                .iter()
                .enumerate()
                .map(|(id, upload)| AttachmentRef {
                    id,
                    filename: upload.file_name.clone(),
                })
                .collect(),
        };

        let payload_json = serde_json::to_string(&payload)
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        let mut form = Form::new().text("payload_json", payload_json);
        for (id, upload) in attachments.iter().enumerate() {
            let bytes = tokio::fs::read(&upload.path)
                .await
                .map_err(|e| PlatformError::Network(format!("attachment read failed: {e}")))?;
            let mut part = Part::bytes(bytes).file_name(upload.file_name.clone());
            if let Some(mime) = &upload.mime_type {
                part = part
                    .mime_str(mime)
                    .map_err(|e| PlatformError::Network(e.to_string()))?;
            }
            form = form.part(format!("files[{id}]"), part);
        }

        let response = self
            .http
            .post(format!("{API_BASE}/channels/{}/messages", channel.id))
            .header("Authorization", self.auth_header())
            .multipart(form)
            .send()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        let _: serde_json::Value = Self::decode(response).await?;
        Ok(())
    }
}
