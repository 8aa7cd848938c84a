use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Stop the bot")]
    Stop,
}

impl Command {
    /// Match the leading `/command` of a message; anything after it is ignored.
    pub fn from_message_text(text: &str, bot_username: &str) -> Option<Self> {
        let head = text.split_whitespace().next()?;
        Self::parse(head, bot_username).ok()
    }
}
