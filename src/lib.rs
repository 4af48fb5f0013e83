use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, pricing, use_cases};
pub use interfaces::{gateways, handlers, routes};
pub use infrastructure::{discord, uploads};

use discord::DiscordClient;
use settings::AppConfig;
use use_cases::order::OrderHandler;

pub type AppOrderHandler = OrderHandler<Arc<DiscordClient>>;

pub struct AppState {
    pub config: AppConfig,
    /// Process-wide platform client, shared with the startup handshake task.
    pub discord: Arc<DiscordClient>,
    pub order_handler: AppOrderHandler,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let discord = Arc::new(DiscordClient::new(config.discord_bot_token.clone()));
        let order_handler = OrderHandler::new(discord.clone(), config);

        AppState {
            config: config.clone(),
            discord,
            order_handler,
        }
    }
}
