use crate::{
    intent::{Intent, classify},
    stop::StopSwitch,
};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info, instrument};
use weather_core::{LookupError, WeatherProvider, weather_reply};

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub const WELCOME: &str = "👋 Привіт! Я WeatherBot. Напиши назву міста, і я дам тобі погоду!";
pub const GREETING: &str = "👋 Привіт! Напиши назву міста, щоб дізнатися погоду.";
pub const FAREWELL: &str = "👋 Дякую за спілкування! Бот зупиняється.";

pub async fn start(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, WELCOME).await?;
    Ok(())
}

/// Says goodbye, then halts the whole bot, not just this chat.
pub async fn stop(bot: Bot, msg: Message, switch: Arc<StopSwitch>) -> HandlerResult {
    bot.send_message(msg.chat.id, FAREWELL).await?;

    if switch.trigger() {
        info!(chat_id = %msg.chat.id, "stop requested");
    }
    Ok(())
}

#[instrument(skip_all, fields(chat_id = %msg.chat.id))]
pub async fn handle_text(
    bot: Bot,
    msg: Message,
    text: String,
    provider: Arc<dyn WeatherProvider>,
) -> HandlerResult {
    if let Some(reply) = reply_for_text(provider.as_ref(), &text).await? {
        bot.send_message(msg.chat.id, reply).await?;
    }
    Ok(())
}

/// What to answer to free text, if anything.
pub async fn reply_for_text(
    provider: &dyn WeatherProvider,
    text: &str,
) -> Result<Option<String>, LookupError> {
    match classify(text) {
        Intent::Greeting => Ok(Some(GREETING.to_string())),
        Intent::City(city) => {
            debug!(city, "looking up weather");
            weather_reply(provider, &city).await.map(Some)
        }
        Intent::Ignore => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CHAT_ID, Recording, bot_with_api, message, sent_texts};
    use weather_core::CITY_NOT_FOUND;

    #[tokio::test]
    async fn start_sends_welcome() {
        let (bot, server) = bot_with_api().await;

        start(bot.clone(), message("/start")).await.unwrap();
        start(bot, message("/start")).await.unwrap();

        assert_eq!(sent_texts(&server).await, vec![WELCOME, WELCOME]);

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["chat_id"], CHAT_ID);
    }

    #[tokio::test]
    async fn stop_replies_then_trips_switch_once() {
        let (bot, server) = bot_with_api().await;
        let switch = Arc::new(StopSwitch::new());

        stop(bot.clone(), message("/stop"), switch.clone()).await.unwrap();
        assert_eq!(sent_texts(&server).await, vec![FAREWELL]);
        assert!(switch.is_stopped());

        stop(bot, message("/stop"), switch.clone()).await.unwrap();
        assert_eq!(sent_texts(&server).await, vec![FAREWELL, FAREWELL]);
        assert!(!switch.trigger());
    }

    #[tokio::test]
    async fn stop_does_not_halt_when_farewell_fails() {
        let server = wiremock::MockServer::start().await;
        let bot = Bot::new("T").set_api_url(server.uri().parse().unwrap());
        let switch = Arc::new(StopSwitch::new());

        assert!(stop(bot, message("/stop"), switch.clone()).await.is_err());
        assert!(!switch.is_stopped());
    }

    #[tokio::test]
    async fn greeting_skips_lookup() {
        let provider = Recording::default();

        let reply = reply_for_text(&provider, "Привіт, бот").await.unwrap();

        assert_eq!(reply.as_deref(), Some(GREETING));
        assert!(provider.queried().is_empty());
    }

    #[tokio::test]
    async fn city_is_looked_up_lowercased() {
        let provider = Recording::default();

        let reply = reply_for_text(&provider, "  ODESA ").await.unwrap().unwrap();

        assert_eq!(provider.queried(), vec!["odesa".to_string()]);
        assert!(reply.starts_with("Погода в населенному пункті Odesa / Odesa:"));
        assert!(reply.contains("☀️"));
        assert!(reply.contains("UTC +03:00"));
    }

    #[tokio::test]
    async fn rejected_lookup_relays_city_not_found() {
        let provider = Recording { status: Some(404), ..Default::default() };

        let reply = reply_for_text(&provider, "atlantis").await.unwrap();
        assert_eq!(reply.as_deref(), Some(CITY_NOT_FOUND));
    }

    #[tokio::test]
    async fn unknown_command_gets_no_reply() {
        let provider = Recording::default();

        assert_eq!(reply_for_text(&provider, "/forecast").await.unwrap(), None);
        assert!(provider.queried().is_empty());
    }
}
