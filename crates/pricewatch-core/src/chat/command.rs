//! Chat command execution.
//!
//! A command carries its raw argument text as typed by the user. Execution
//! validates the argument, calls the product service on behalf of the
//! sender and returns the reply messages in the order they must be sent.

use pricewatch_types::error::ProductError;
use pricewatch_types::product::{OwnerId, ProductId};

use super::format::{price_entry, product_entry};
use super::paginate::{MAX_MESSAGE_CHARS, paginate};
use crate::repository::price_history::PriceHistoryRepository;
use crate::repository::product::ProductRepository;
use crate::service::product::ProductService;

pub const HELP_TEXT: &str = "Price monitoring bot.\n\n\
    /add <url> - start monitoring a product page\n\
    /remove <id> - stop monitoring a product\n\
    /list - show monitored products\n\
    /history <id> - show recorded prices of a product\n\
    /help - show this message";

pub const ADD_USAGE: &str = "Usage: /add <product url>";
pub const REMOVE_USAGE: &str = "Usage: /remove <product id>";
pub const HISTORY_USAGE: &str = "Usage: /history <product id>";
pub const EMPTY_LIST: &str = "You are not monitoring any products yet. Use /add <url>.";
pub const GENERIC_FAILURE: &str = "Something went wrong, please try again later.";

/// A chat command with its unparsed argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    Add(String),
    Remove(String),
    List,
    History(String),
}

impl ChatCommand {
    fn name(&self) -> &'static str {
        match self {
            ChatCommand::Help => "help",
            ChatCommand::Add(_) => "add",
            ChatCommand::Remove(_) => "remove",
            ChatCommand::List => "list",
            ChatCommand::History(_) => "history",
        }
    }
}

/// Run `command` for `owner` and return the replies to send.
///
/// Missing or malformed arguments produce a usage hint without touching
/// storage. Failures are logged and turned into reply text; this function
/// never returns an error.
pub async fn execute<P, H>(
    service: &ProductService<P, H>,
    owner: &OwnerId,
    command: ChatCommand,
) -> Vec<String>
where
    P: ProductRepository,
    H: PriceHistoryRepository,
{
    let name = command.name();
    let result = match command {
        ChatCommand::Help => Ok(vec![HELP_TEXT.to_string()]),

        ChatCommand::Add(args) => match first_arg(&args) {
            None => Ok(vec![ADD_USAGE.to_string()]),
            Some(url) => service
                .add_product(owner, url)
                .await
                .map(|p| vec![format!("Product added for monitoring (ID {}): {}", p.id, p.url)]),
        },

        ChatCommand::Remove(args) => match parse_id(&args) {
            None => Ok(vec![REMOVE_USAGE.to_string()]),
            Some(id) => service
                .remove_product(owner, id)
                .await
                .map(|()| vec![format!("Product with ID {id} removed.")]),
        },

        ChatCommand::List => service.list_products(owner).await.map(|products| {
            if products.is_empty() {
                vec![EMPTY_LIST.to_string()]
            } else {
                paginate(products.iter().map(product_entry), MAX_MESSAGE_CHARS)
            }
        }),

        ChatCommand::History(args) => match parse_id(&args) {
            None => Ok(vec![HISTORY_USAGE.to_string()]),
            Some(id) => service
                .price_history(owner, id)
                .await
                .map(|records| paginate(records.iter().map(price_entry), MAX_MESSAGE_CHARS)),
        },
    };

    result.unwrap_or_else(|e| vec![reply_for_error(name, owner, &e)])
}

/// Map a product error to the text shown in chat.
pub fn reply_for_error(command: &str, owner: &OwnerId, err: &ProductError) -> String {
    match err {
        ProductError::NotFound | ProductError::NoPriceHistory => {
            "Product not found.".to_string()
        }
        ProductError::InvalidUrl(msg) | ProductError::InvalidSnapshot(msg) => {
            format!("Invalid input: {msg}")
        }
        ProductError::Storage(msg) => {
            tracing::error!(command, owner = %owner, error = %msg, "chat command failed");
            GENERIC_FAILURE.to_string()
        }
    }
}

fn first_arg(args: &str) -> Option<&str> {
    args.split_whitespace().next()
}

fn parse_id(args: &str) -> Option<ProductId> {
    first_arg(args)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{failing_service, service};
    use pricewatch_types::product::ProductSnapshot;
    use rust_decimal::Decimal;

    fn alice() -> OwnerId {
        OwnerId::from_telegram(1001)
    }

    fn bob() -> OwnerId {
        OwnerId::from_telegram(2002)
    }

    #[tokio::test]
    async fn test_missing_arguments_reply_with_usage() {
        let svc = service();
        assert_eq!(
            execute(&svc, &alice(), ChatCommand::Add(String::new())).await,
            vec![ADD_USAGE]
        );
        assert_eq!(
            execute(&svc, &alice(), ChatCommand::Remove("  ".to_string())).await,
            vec![REMOVE_USAGE]
        );
        assert_eq!(
            execute(&svc, &alice(), ChatCommand::History("abc".to_string())).await,
            vec![HISTORY_USAGE]
        );
        assert!(svc.list_products(&alice()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let svc = service();
        let reply = execute(
            &svc,
            &alice(),
            ChatCommand::Add("http://example.com/p1 trailing words".to_string()),
        )
        .await;
        assert_eq!(reply.len(), 1);
        assert!(reply[0].contains("http://example.com/p1"));

        let listed = execute(&svc, &alice(), ChatCommand::List).await;
        assert_eq!(listed.len(), 1);
        assert!(listed[0].contains("URL: http://example.com/p1\n"));

        let other = execute(&svc, &bob(), ChatCommand::List).await;
        assert_eq!(other, vec![EMPTY_LIST]);
    }

    #[tokio::test]
    async fn test_remove_foreign_and_unknown_look_the_same() {
        let svc = service();
        let p = svc.add_product(&alice(), "http://x").await.unwrap();

        let foreign = execute(&svc, &bob(), ChatCommand::Remove(p.id.to_string())).await;
        let unknown = execute(&svc, &bob(), ChatCommand::Remove("424242".to_string())).await;
        assert_eq!(foreign, unknown);

        let removed = execute(&svc, &alice(), ChatCommand::Remove(p.id.to_string())).await;
        assert_eq!(removed, vec![format!("Product with ID {} removed.", p.id)]);
        assert!(svc.list_products(&alice()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_replies() {
        let svc = service();
        let p = svc.add_product(&alice(), "http://x").await.unwrap();

        let empty = execute(&svc, &alice(), ChatCommand::History(p.id.to_string())).await;
        assert_eq!(empty, vec!["Product not found."]);

        svc.record_price(
            p.id,
            ProductSnapshot {
                price: Some(Decimal::new(4999, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let history = execute(&svc, &alice(), ChatCommand::History(p.id.to_string())).await;
        assert_eq!(history.len(), 1);
        assert!(history[0].contains("Price: 49.99"));

        let foreign = execute(&svc, &bob(), ChatCommand::History(p.id.to_string())).await;
        assert_eq!(foreign, vec!["Product not found."]);
    }

    #[tokio::test]
    async fn test_long_list_is_paginated() {
        let svc = service();
        let url = format!("http://example.com/{}", "x".repeat(200));
        for _ in 0..60 {
            svc.add_product(&alice(), &url).await.unwrap();
        }

        let replies = execute(&svc, &alice(), ChatCommand::List).await;
        assert!(replies.len() > 1);
        for reply in &replies {
            assert!(reply.chars().count() <= MAX_MESSAGE_CHARS);
            assert!(reply.starts_with("ID: "));
        }
        let entries: usize = replies.iter().map(|r| r.matches("ID: ").count()).sum();
        assert_eq!(entries, 60);
    }

    #[tokio::test]
    async fn test_help() {
        let svc = service();
        let reply = execute(&svc, &alice(), ChatCommand::Help).await;
        assert_eq!(reply, vec![HELP_TEXT]);
    }

    #[tokio::test]
    async fn test_storage_failure_replies_generic_text() {
        let svc = failing_service();
        let commands = [
            ChatCommand::Add("http://example.com/p1".to_string()),
            ChatCommand::Remove("1".to_string()),
            ChatCommand::List,
            ChatCommand::History("1".to_string()),
        ];
        for command in commands {
            let reply = execute(&svc, &alice(), command).await;
            assert_eq!(reply, vec![GENERIC_FAILURE]);
            assert!(!reply[0].contains("database is locked"));
        }
    }

    #[tokio::test]
    async fn test_usage_hint_does_not_touch_storage() {
        let svc = failing_service();
        assert_eq!(
            execute(&svc, &alice(), ChatCommand::Remove("x".to_string())).await,
            vec![REMOVE_USAGE]
        );
        assert_eq!(
            execute(&svc, &alice(), ChatCommand::Help).await,
            vec![HELP_TEXT]
        );
    }
}
