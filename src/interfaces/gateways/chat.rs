use async_trait::async_trait;
use derive_more::Display;
use mockall::automock;

use crate::domain::entities::upload::StoredUpload;

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformGuild {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformUser {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedChannel {
    pub id: String,
    pub name: String,
}

/// What the intake flow needs from a ticket channel, independent of how the
/// platform spells out permissions. The adapter denies the default role,
/// grants itself access, and grants `customer_id` (when resolved) view, send
/// and history access.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketChannelSpec {
    pub name: String,
    pub parent_id: String,
    pub customer_id: Option<String>,
}

/// Who the greeting addresses.
#[derive(Debug, Clone, PartialEq)]
pub enum Mention {
    /// A resolved platform account.
    User(String),
    /// Generic broadcast (`@here`) when the handle never resolved.
    Here,
}

/// Platform-agnostic order summary rendered by the adapter into its native
/// message format (embed card on Discord).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub customer_name: String,
    /// Resolved username, or the raw contact handle when unresolved.
    pub customer_display: String,
    pub price: String,
    pub payment_method: String,
    pub service: String,
    pub part: String,
}

#[derive(Debug, Display)]
pub enum PlatformError {
    #[display("platform connection not ready")]
    NotReady,

    #[display("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[display("platform API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[display("platform request failed: {_0}")]
    Network(String),
}

/// Capability surface the order flow needs from the external chat platform.
/// Any platform with guild/user lookup, permissioned channel creation and
/// attachment-bearing messages can stand in; Discord is the shipped adapter.
#[automock]
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Identity of the authenticated bot account, once the startup handshake
    /// has finished. `None` means the readiness gate is still closed.
    fn identity(&self) -> Option<PlatformUser>;

    async fn fetch_guild(&self, guild_id: &str) -> Result<PlatformGuild, PlatformError>;

    /// Lookup by numeric account ID. `Ok(None)` is an ordinary miss; `Err` is
    /// an API failure. Callers treat both as non-fatal.
    async fn fetch_user(&self, user_id: &str) -> Result<Option<PlatformUser>, PlatformError>;

    async fn create_ticket_channel(
        &self,
        guild: &PlatformGuild,
        spec: TicketChannelSpec,
    ) -> Result<CreatedChannel, PlatformError>;

    async fn send_order_summary(
        &self,
        channel: &CreatedChannel,
        mention: Mention,
        summary: OrderSummary,
        attachments: &[StoredUpload],
    ) -> Result<(), PlatformError>;
}

// The process-wide client is shared between the request handlers and the
// startup handshake task, so the handler side works through an Arc.
#[async_trait]
impl<C> ChatPlatform for std::sync::Arc<C>
where
    C: ChatPlatform + ?Sized,
{
    fn identity(&self) -> Option<PlatformUser> {
        (**self).identity()
    }

    async fn fetch_guild(&self, guild_id: &str) -> Result<PlatformGuild, PlatformError> {
        (**self).fetch_guild(guild_id).await
    }

    async fn fetch_user(&self, user_id: &str) -> Result<Option<PlatformUser>, PlatformError> {
        (**self).fetch_user(user_id).await
    }

    async fn create_ticket_channel(
        &self,
        guild: &PlatformGuild,
        spec: TicketChannelSpec,
    ) -> Result<CreatedChannel, PlatformError> {
        (**self).create_ticket_channel(guild, spec).await
    }

    async fn send_order_summary(
        &self,
        channel: &CreatedChannel,
        mention: Mention,
        summary: OrderSummary,
        attachments: &[StoredUpload],
    ) -> Result<(), PlatformError> {
        (**self)
            .send_order_summary(channel, mention, summary, attachments)
            .await
    }
}
