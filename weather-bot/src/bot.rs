use crate::{commands::Command, handlers, stop::StopSwitch};
use std::sync::Arc;
use teloxide::{
    dispatching::{ShutdownToken, UpdateHandler},
    prelude::*,
    types::Me,
};
use tracing::{info, warn};
use weather_core::{Settings, WeatherProvider, provider::OpenWeatherProvider};

/// Run long polling until `/stop` or Ctrl-C.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let bot = Bot::new(&settings.telegram_token);
    let provider: Arc<dyn WeatherProvider> = Arc::new(OpenWeatherProvider::from_settings(&settings)?);
    let switch = Arc::new(StopSwitch::new());

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![provider, switch.clone()])
        .enable_ctrlc_handler()
        .build();

    let supervisor = tokio::spawn(halt_on_stop(switch.clone(), dispatcher.shutdown_token()));

    info!("🤖 WeatherBot запущено!");
    dispatcher.dispatch().await;

    if switch.is_stopped() {
        if let Err(e) = supervisor.await {
            warn!(error = %e, "stop supervisor failed");
        }
    } else {
        supervisor.abort();
    }
    Ok(())
}

/// Waits for `/stop`, then shuts the dispatcher down from outside any handler.
async fn halt_on_stop(switch: Arc<StopSwitch>, token: ShutdownToken) {
    switch.wait().await;
    match token.shutdown() {
        Ok(done) => {
            done.await;
            info!("dispatcher stopped");
        }
        Err(e) => warn!(error = %e, "dispatcher was not running"),
    }
}

/// Dispatch table, tried in order: commands, then any other text.
fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = dptree::filter_map(|msg: Message, me: Me| {
        let username = me.user.username.as_deref().unwrap_or_default();
        Command::from_message_text(msg.text()?, username)
    })
    .branch(case![Command::Start].endpoint(handlers::start))
    .branch(case![Command::Stop].endpoint(handlers::stop));

    Update::filter_message()
        .branch(command_handler)
        .branch(Message::filter_text().endpoint(handlers::handle_text))
}
