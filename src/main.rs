use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use apchu::cli::{Cli, Commands};
use apchu::core::{config, init_logger, log_startup_configuration, metrics, web_server, Membership};
use apchu::measure::{classify, generate_sample_with, Entropy, SeededEntropy, ThreadEntropy};
use apchu::storage::{create_pool, db, get_connection, SqliteStore, Store};
use apchu::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
/// Without a subcommand the bot is started.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env before any config value is read
    let _ = dotenv();

    match cli.command {
        Some(Commands::Roll { count, seed, verbose }) => {
            match seed {
                Some(seed) => run_roll(&mut SeededEntropy::new(seed), count, verbose),
                None => run_roll(&mut ThreadEntropy, count, verbose),
            }
            Ok(())
        }
        Some(Commands::Sponsors { json }) => run_list_sponsors(json),
        Some(Commands::Run) | None => {
            // Log panics from dispatcher tasks instead of losing them on stderr
            std::panic::set_hook(Box::new(|panic_info| {
                log::error!("Panic caught: {:?}", panic_info);
                if let Some(location) = panic_info.location() {
                    log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
                }
            }));

            init_logger(&config::LOG_FILE_PATH)?;
            run_bot().await
        }
    }
}

/// Print `count` generated sizes with their labels
fn run_roll(entropy: &mut impl Entropy, count: usize, verbose: bool) {
    for _ in 0..count {
        let m = generate_sample_with(entropy);
        if verbose {
            println!(
                "{:>2}см. {}  (sample {:?}, index {}, biased {})",
                m.size,
                classify(m.size),
                m.sorted_sample,
                m.index,
                m.biased
            );
        } else {
            println!("{}см. {}", m.size, classify(m.size));
        }
    }
}

/// Print the sponsors table from the configured database
fn run_list_sponsors(json: bool) -> Result<()> {
    let pool = create_pool(&config::DATABASE_PATH)?;
    let conn = get_connection(&pool)?;
    let sponsors = db::get_all_sponsors(&conn)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sponsors)?);
    } else if sponsors.is_empty() {
        println!("No sponsors stored in {}", config::DATABASE_PATH.as_str());
    } else {
        for sponsor in sponsors {
            println!("{}\t{}\t{}", sponsor.name, sponsor.url, sponsor.created_at.to_rfc3339());
        }
    }
    Ok(())
}

/// Run the Telegram bot with the HTTP health server alongside
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");
    metrics::init_metrics();
    log_startup_configuration();

    let db_pool = Arc::new(create_pool(&config::DATABASE_PATH)?);
    let store: Arc<dyn Store> = Arc::new(SqliteStore::new(Arc::clone(&db_pool)));
    let membership = Arc::new(Membership::from_env());

    let port = *config::PORT;
    tokio::spawn(async move {
        if let Err(e) = web_server::start_web_server(port).await {
            log::error!("Web server error: {}", e);
        }
    });

    let bot = create_bot()?;
    let me = bot.get_me().await?;
    log::info!("Bot username: {:?}, Bot ID: {}", me.username, me.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let deps = HandlerDeps::new(store, membership);
    let mut dispatcher = Dispatcher::builder(bot, schema(deps))
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error from the update listener"))
        .enable_ctrlc_handler()
        .build();

    #[cfg(unix)]
    {
        let shutdown_token = dispatcher.shutdown_token();
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("Failed to install SIGTERM handler: {}", e);
                    return;
                }
            };
            sigterm.recv().await;
            log::info!("SIGTERM received, stopping dispatcher");
            match shutdown_token.shutdown() {
                Ok(done) => done.await,
                Err(e) => log::warn!("Dispatcher shutdown failed: {:?}", e),
            }
        });
    }

    log::info!("Bot is running");
    dispatcher.dispatch().await;

    log::info!("Bot stopped");
    Ok(())
}
