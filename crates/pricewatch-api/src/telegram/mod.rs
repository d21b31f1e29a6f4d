//! Telegram bot front end.
//!
//! Long-polls the Bot API, turns each recognised command into a
//! [`ChatCommand`] for the sender and sends back the replies in order.
//! Command execution itself lives in `pricewatch-core::chat`.

use secrecy::{ExposeSecret, SecretString};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use pricewatch_core::chat::command::{ChatCommand, execute};
use pricewatch_types::product::OwnerId;

use crate::state::AppState;

/// Commands understood by the bot. Arguments are passed through unparsed.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Price monitoring commands:")]
pub enum Command {
    #[command(description = "show this message.")]
    Start,
    #[command(description = "show this message.")]
    Help,
    #[command(description = "start monitoring a product page: /add <url>")]
    Add(String),
    #[command(description = "stop monitoring a product: /remove <id>")]
    Remove(String),
    #[command(description = "show monitored products.")]
    List,
    #[command(description = "show recorded prices: /history <id>")]
    History(String),
}

impl From<Command> for ChatCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Start | Command::Help => ChatCommand::Help,
            Command::Add(args) => ChatCommand::Add(args),
            Command::Remove(args) => ChatCommand::Remove(args),
            Command::List => ChatCommand::List,
            Command::History(args) => ChatCommand::History(args),
        }
    }
}

/// Run the bot until Ctrl+C.
pub async fn run(state: AppState, token: &SecretString) -> anyhow::Result<()> {
    let bot = Bot::new(token.expose_secret());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(error = %e, "failed to register bot command list");
    }

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_command);

    tracing::info!("telegram bot started");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    tracing::info!("telegram bot stopped");

    Ok(())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    command: Command,
    state: AppState,
) -> ResponseResult<()> {
    let Some(owner) = sender(&msg) else {
        tracing::debug!(chat_id = msg.chat.id.0, "ignoring message without sender");
        return Ok(());
    };

    let replies = execute(&state.product_service, &owner, command.into()).await;
    for reply in replies {
        bot.send_message(msg.chat.id, reply).await?;
    }
    Ok(())
}

fn sender(msg: &Message) -> Option<OwnerId> {
    msg.from.as_ref().map(|user| OwnerId::from_telegram(user.id.0))
}
