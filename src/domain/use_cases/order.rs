use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::order::{OrderSubmission, OrderTicket};
use crate::domain::entities::upload::StoredUpload;
use crate::errors::OrderError;
use crate::infrastructure::uploads;
use crate::interfaces::gateways::chat::{
    ChatPlatform, Mention, OrderSummary, PlatformUser, TicketChannelSpec,
};
use crate::settings::AppConfig;

/// Numeric snowflake shape; only handles matching this are worth a lookup.
static SNOWFLAKE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Everything outside the channel-name allow-list (ASCII alphanumerics plus
/// Thai script) collapses to a separator.
static CHANNEL_NAME_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9ก-๙]").expect("valid regex"));

/// Channel name for a ticket, derived from the customer name. Channel
/// creation never receives an empty name: a missing customer name falls back
/// to a placeholder token.
pub fn ticket_channel_name(customer_name: &str) -> String {
    let safe = if customer_name.is_empty() {
        "unknown".to_string()
    } else {
        CHANNEL_NAME_DISALLOWED
            .replace_all(customer_name, "-")
            .to_lowercase()
    };
    format!("ticket-{safe}-website")
}

/// Outcome of the best-effort customer lookup. Only `Resolved` changes the
/// rest of the flow; the other two degrade to a generic mention and never
/// fail the request.
#[derive(Debug, Clone, PartialEq)]
pub enum UserResolution {
    Resolved(PlatformUser),
    Unresolved,
    Failed(String),
}

impl UserResolution {
    pub fn user(&self) -> Option<&PlatformUser> {
        match self {
            UserResolution::Resolved(user) => Some(user),
            _ => None,
        }
    }

    pub fn mention(&self) -> Mention {
        match self.user() {
            Some(user) => Mention::User(user.id.clone()),
            None => Mention::Here,
        }
    }
}

/// Drives one order submission through the platform: config check, guild
/// resolution, ticket channel creation, summary message, file cleanup.
pub struct OrderHandler<C>
where
    C: ChatPlatform,
{
    pub platform: C,
    configured: bool,
    guild_id: String,
    category_id: String,
}

impl<C> OrderHandler<C>
where
    C: ChatPlatform,
{
    pub fn new(platform: C, config: &AppConfig) -> Self {
        OrderHandler {
            platform,
            configured: config.discord_configured(),
            guild_id: config.discord_guild_id.clone(),
            category_id: config.discord_category_id.clone(),
        }
    }

    /// Processes one submission and unconditionally removes the transient
    /// uploads afterwards, on success and on every fatal step alike.
    pub async fn place_order(
        &self,
        submission: OrderSubmission,
        uploads: Vec<StoredUpload>,
    ) -> Result<OrderTicket, OrderError> {
        let result = self.process(&submission, &uploads).await;
        uploads::remove_stored_uploads(&uploads).await;
        result
    }

    async fn process(
        &self,
        submission: &OrderSubmission,
        uploads: &[StoredUpload],
    ) -> Result<OrderTicket, OrderError> {
        if !self.configured {
            return Err(OrderError::MissingConfiguration);
        }

        if self.platform.identity().is_none() {
            return Err(OrderError::PlatformNotReady);
        }

        let guild = self
            .platform
            .fetch_guild(&self.guild_id)
            .await
            .map_err(|e| OrderError::Resolution(e.to_string()))?;
        tracing::info!("✅ Guild found: {}", guild.name);

        let channel_name = ticket_channel_name(&submission.name);

        let resolution = self.resolve_customer(&submission.discord_id).await;

        let channel = self
            .platform
            .create_ticket_channel(
                &guild,
                TicketChannelSpec {
                    name: channel_name,
                    parent_id: self.category_id.clone(),
                    customer_id: resolution.user().map(|u| u.id.clone()),
                },
            )
            .await
            .map_err(|e| OrderError::PlatformOperation(e.to_string()))?;
        tracing::info!("✅ Channel created: {} ({})", channel.name, channel.id);

        let summary = OrderSummary {
            customer_name: submission.name.clone(),
            customer_display: resolution
                .user()
                .map(|u| u.username.clone())
                .unwrap_or_else(|| submission.discord_id.clone()),
            price: submission.price.clone(),
            payment_method: submission.payment_method.clone(),
            service: submission.scale.clone(),
            part: submission.part.clone(),
        };

        self.platform
            .send_order_summary(&channel, resolution.mention(), summary, uploads)
            .await
            .map_err(|e| OrderError::PlatformOperation(e.to_string()))?;
        tracing::info!("✅ Order summary sent to channel {}", channel.id);

        Ok(OrderTicket {
            channel_id: channel.id,
        })
    }

    /// Best-effort: a lookup only happens for numeric handles, and no failure
    /// here may fail the request.
    async fn resolve_customer(&self, contact_handle: &str) -> UserResolution {
        let handle = contact_handle.trim();

        if !SNOWFLAKE_RE.is_match(handle) {
            tracing::info!("⚠️ Non-numeric contact handle, keeping as display tag: {handle}");
            return UserResolution::Unresolved;
        }

        match self.platform.fetch_user(handle).await {
            Ok(Some(user)) => {
                tracing::info!("✅ Customer resolved: {}", user.username);
                UserResolution::Resolved(user)
            }
            Ok(None) => {
                tracing::warn!("⚠️ No account found for id {handle}");
                UserResolution::Unresolved
            }
            Err(e) => {
                tracing::warn!("⚠️ Could not fetch user {handle}: {e}");
                UserResolution::Failed(e.to_string())
            }
        }
    }
}
