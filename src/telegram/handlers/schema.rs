//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{InlineQuery, Message};

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::admin::handle_command;
use crate::telegram::bot::Command;
use crate::telegram::inline::handle_inline_query;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same tree is used in production and in tests.
///
/// # Arguments
/// * `deps` - Handler dependencies (store, membership lists)
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(inline_query_handler(deps.clone()))
        .branch(command_handler(deps))
}

/// Handler for inline queries. Always answers, store failures are only logged.
fn inline_query_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_inline_query().endpoint(move |bot: Bot, query: InlineQuery| {
        let deps = deps.clone();
        async move {
            handle_inline_query(&bot, &query, &deps).await;
            Ok(())
        }
    })
}

/// Handler for slash commands in private chats and groups.
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                if let Err(e) = handle_command(&bot, &msg, cmd, &deps).await {
                    log::error!("Failed to reply to command in chat {}: {}", msg.chat.id, e);
                }
                Ok(())
            }
        })
}
