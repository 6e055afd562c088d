//! Outbound notification channels for mower status changes.
//!
//! - [`DiscordWebhook`]: posts messages to a Discord channel webhook.
//! - [`LogNotifier`]: writes messages to the tracing log; used when no
//!   webhook is configured.
//!
//! Both implement [`mowwatch_core::Notifier`].

pub mod delivery;

pub use delivery::discord::{DiscordKeys, DiscordWebhook, DISCORD_WEBHOOK_BASE_URL};
pub use delivery::log::LogNotifier;
