//! Commands: sponsors list and its admin-only management
//!
//! Replies are built by [`command_reply`] so the routing and authorization can be
//! tested without a Bot API; the dispatcher endpoint only sends the text.

use teloxide::prelude::*;
use url::Url;

use crate::core::error::{AppError, AppResult};
use crate::core::metrics;
use crate::storage::Sponsor;
use crate::telegram::bot::Command;
use crate::telegram::handlers::HandlerDeps;

pub const START_TEXT: &str = "Привет! Я меряю Апщу 📏\n\
Набери @ и моё имя в любом чате, и я покажу твой размер на сегодня и среднее за всё время.";

pub const NOT_ADMIN_TEXT: &str = "⛔ Эта команда только для администраторов.";

/// Maximum sponsor name length in characters
const MAX_SPONSOR_NAME_LEN: usize = 64;

/// Parses `/addsponsor` arguments: `<name> <url>`.
pub fn parse_add_sponsor_args(args: &str) -> AppResult<(String, Url)> {
    let mut parts = args.split_whitespace();
    let (Some(name), Some(raw_url), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AppError::Validation(
            "использование: /addsponsor <имя> <ссылка>".to_string(),
        ));
    };

    let name = validate_sponsor_name(name)?;
    let url = Url::parse(raw_url)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "ссылка должна начинаться с http:// или https://, получено {}",
            url.scheme()
        )));
    }
    Ok((name, url))
}

/// Parses `/removesponsor` arguments: `<name>`.
pub fn parse_remove_sponsor_args(args: &str) -> AppResult<String> {
    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(name), None) => validate_sponsor_name(name),
        _ => Err(AppError::Validation("использование: /removesponsor <имя>".to_string())),
    }
}

fn validate_sponsor_name(name: &str) -> AppResult<String> {
    if name.chars().count() > MAX_SPONSOR_NAME_LEN {
        return Err(AppError::Validation(format!(
            "имя спонсора длиннее {} символов",
            MAX_SPONSOR_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

pub fn format_sponsors(sponsors: &[Sponsor]) -> String {
    if sponsors.is_empty() {
        return "Спонсоров пока нет 🤷".to_string();
    }
    let mut text = String::from("Наши спонсоры:\n");
    for sponsor in sponsors {
        text.push_str(&format!("• {} - {}\n", sponsor.name, sponsor.url));
    }
    text.trim_end().to_string()
}

/// Builds the reply for a command sent by `user_id`.
pub async fn command_reply(cmd: &Command, user_id: i64, deps: &HandlerDeps) -> String {
    match cmd {
        Command::Start => START_TEXT.to_string(),
        Command::Help => {
            use teloxide::utils::command::BotCommands;
            Command::descriptions().to_string()
        }
        Command::Sponsors => match deps.store.list_sponsors().await {
            Ok(sponsors) => format_sponsors(&sponsors),
            Err(e) => {
                metrics::record_store_failure("sponsors");
                log::error!("Failed to list sponsors: {}", e);
                "❌ Не удалось загрузить список спонсоров".to_string()
            }
        },
        Command::AddSponsor(args) => {
            if !deps.membership.is_admin(user_id) {
                log::warn!("User {} tried /addsponsor without admin rights", user_id);
                return NOT_ADMIN_TEXT.to_string();
            }
            let (name, url) = match parse_add_sponsor_args(args) {
                Ok(parsed) => parsed,
                Err(e) => return format!("❌ {}", e),
            };
            match deps.store.add_sponsor(&name, url.as_str()).await {
                Ok(()) => {
                    log::info!("Admin {} added sponsor {} ({})", user_id, name, url);
                    format!("✅ Спонсор {} добавлен", name)
                }
                Err(e) => {
                    metrics::record_store_failure("sponsors");
                    log::error!("Failed to add sponsor {}: {}", name, e);
                    format!("❌ Не удалось добавить спонсора {}", name)
                }
            }
        }
        Command::RemoveSponsor(args) => {
            if !deps.membership.is_admin(user_id) {
                log::warn!("User {} tried /removesponsor without admin rights", user_id);
                return NOT_ADMIN_TEXT.to_string();
            }
            let name = match parse_remove_sponsor_args(args) {
                Ok(name) => name,
                Err(e) => return format!("❌ {}", e),
            };
            match deps.store.remove_sponsor(&name).await {
                Ok(true) => {
                    log::info!("Admin {} removed sponsor {}", user_id, name);
                    format!("✅ Спонсор {} удалён", name)
                }
                Ok(false) => format!("🤷 Спонсора {} нет в списке", name),
                Err(e) => {
                    metrics::record_store_failure("sponsors");
                    log::error!("Failed to remove sponsor {}: {}", name, e);
                    format!("❌ Не удалось удалить спонсора {}", name)
                }
            }
        }
    }
}

/// Dispatcher endpoint body for commands.
pub async fn handle_command(bot: &Bot, msg: &Message, cmd: Command, deps: &HandlerDeps) -> Result<(), teloxide::RequestError> {
    let user_id = msg.from.as_ref().and_then(|u| i64::try_from(u.id.0).ok()).unwrap_or(0);
    log::info!("/{} from user {}", cmd.name(), user_id);
    metrics::record_command(cmd.name());

    let reply = command_reply(&cmd, user_id, deps).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::membership::{IdSet, Membership};
    use crate::storage::{MemoryStore, Store};
    use std::sync::Arc;

    const ADMIN: i64 = 1;
    const STRANGER: i64 = 2;

    fn deps() -> (Arc<MemoryStore>, HandlerDeps) {
        let store = Arc::new(MemoryStore::new());
        let membership = Membership::new(IdSet::new([ADMIN]), IdSet::default(), IdSet::default());
        let deps = HandlerDeps::new(store.clone(), Arc::new(membership));
        (store, deps)
    }

    #[test]
    fn test_parse_add_sponsor_args() {
        let (name, url) = parse_add_sponsor_args("  acme   https://acme.example/path ").unwrap();
        assert_eq!(name, "acme");
        assert_eq!(url.as_str(), "https://acme.example/path");
    }

    #[test]
    fn test_parse_add_sponsor_args_rejects_bad_input() {
        assert!(parse_add_sponsor_args("").is_err());
        assert!(parse_add_sponsor_args("acme").is_err());
        assert!(parse_add_sponsor_args("acme https://a.example extra").is_err());
        assert!(matches!(parse_add_sponsor_args("acme nope"), Err(AppError::Url(_))));
        assert!(matches!(
            parse_add_sponsor_args("acme ftp://acme.example"),
            Err(AppError::Validation(_))
        ));
        let long_name = "x".repeat(MAX_SPONSOR_NAME_LEN + 1);
        assert!(parse_add_sponsor_args(&format!("{} https://a.example", long_name)).is_err());
    }

    #[test]
    fn test_parse_remove_sponsor_args() {
        assert_eq!(parse_remove_sponsor_args(" acme ").unwrap(), "acme");
        assert!(parse_remove_sponsor_args("").is_err());
        assert!(parse_remove_sponsor_args("a b").is_err());
    }

    #[test]
    fn test_format_empty_sponsors() {
        assert_eq!(format_sponsors(&[]), "Спонсоров пока нет 🤷");
    }

    #[tokio::test]
    async fn test_admin_manages_sponsors() {
        let (_store, deps) = deps();

        let reply = command_reply(&Command::AddSponsor("acme https://acme.example".into()), ADMIN, &deps).await;
        assert!(reply.starts_with("✅"), "{reply}");

        let reply = command_reply(&Command::Sponsors, STRANGER, &deps).await;
        assert!(reply.contains("acme - https://acme.example/"), "{reply}");

        let reply = command_reply(&Command::RemoveSponsor("acme".into()), ADMIN, &deps).await;
        assert!(reply.starts_with("✅"), "{reply}");

        let reply = command_reply(&Command::RemoveSponsor("acme".into()), ADMIN, &deps).await;
        assert!(reply.starts_with("🤷"), "{reply}");
    }

    #[tokio::test]
    async fn test_non_admin_is_refused() {
        let (store, deps) = deps();

        let reply = command_reply(&Command::AddSponsor("acme https://acme.example".into()), STRANGER, &deps).await;
        assert_eq!(reply, NOT_ADMIN_TEXT);
        assert!(store.list_sponsors().await.unwrap().is_empty());

        store.add_sponsor("acme", "https://acme.example").await.unwrap();
        let reply = command_reply(&Command::RemoveSponsor("acme".into()), STRANGER, &deps).await;
        assert_eq!(reply, NOT_ADMIN_TEXT);
        assert_eq!(store.list_sponsors().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported_not_raised() {
        let (store, deps) = deps();
        store.set_failing(true);

        let reply = command_reply(&Command::Sponsors, STRANGER, &deps).await;
        assert!(reply.starts_with("❌"));
        let reply = command_reply(&Command::AddSponsor("acme https://acme.example".into()), ADMIN, &deps).await;
        assert!(reply.starts_with("❌"));
    }

    #[tokio::test]
    async fn test_help_lists_commands() {
        let (_store, deps) = deps();
        let reply = command_reply(&Command::Help, STRANGER, &deps).await;
        assert!(reply.contains("sponsors"));
        assert_eq!(command_reply(&Command::Start, STRANGER, &deps).await, START_TEXT);
    }
}
